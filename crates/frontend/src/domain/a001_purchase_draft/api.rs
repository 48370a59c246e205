use crate::shared::api_utils::{api_url, api_url_with_query, delete, get_raw, path_segment, post_json};
use crate::shared::errors::AppError;
use contracts::domain::a001_purchase_draft::{ConvertDraftRequest, PurchaseDraft};
use contracts::shared::list::{ListPage, ListQuery};
use contracts::shared::response::unwrap_data;
use serde_json::Value;

const DRAFTS_PATH: &str = "/api/purchases/drafts";

/// Fetch one page of drafts
pub async fn fetch_drafts(query: &ListQuery) -> Result<ListPage<PurchaseDraft>, AppError> {
    let url = api_url_with_query(DRAFTS_PATH, query)?;
    let body = get_raw(&url).await?;
    Ok(serde_json::from_value(unwrap_data(body))?)
}

/// Convert a draft into a purchase order; returns the raw response for validation
pub async fn convert_draft(draft_id: &str, request: &ConvertDraftRequest) -> Result<Value, AppError> {
    let url = api_url(&format!("{}/{}/convert", DRAFTS_PATH, path_segment(draft_id)));
    let response = post_json(&url, request).await?;
    log::info!("Draft {} converted", draft_id);
    Ok(response)
}

pub async fn delete_draft(draft_id: &str) -> Result<(), AppError> {
    let url = api_url(&format!("{}/{}", DRAFTS_PATH, path_segment(draft_id)));
    delete(&url).await?;
    log::info!("Draft {} deleted", draft_id);
    Ok(())
}
