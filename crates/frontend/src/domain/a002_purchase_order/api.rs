//! HTTP-доступ к закупкам.
//!
//! Все обращения идут через `PurchaseGateway`, чтобы сценарии из `workflow`
//! можно было проверять без сети.

use crate::domain::a001_purchase_draft::api as drafts_api;
use crate::shared::api_utils::{api_url, api_url_with_query, delete, get_raw, path_segment, post_json};
use crate::shared::errors::AppError;
use async_trait::async_trait;
use contracts::domain::a001_purchase_draft::{ConvertDraftRequest, PurchaseDraft};
use contracts::domain::a002_purchase_order::{PaymentRequest, PurchaseOrder};
use contracts::shared::list::{ListPage, ListQuery};
use contracts::shared::response::unwrap_data;
use serde_json::Value;

const ORDERS_PATH: &str = "/api/purchases/orders";

#[async_trait(?Send)]
pub trait PurchaseGateway {
    async fn fetch_drafts(&self, query: &ListQuery) -> Result<ListPage<PurchaseDraft>, AppError>;

    /// Заказы одной вкладки; вкладка передаётся в `query.scope`
    async fn fetch_orders(&self, query: &ListQuery) -> Result<ListPage<PurchaseOrder>, AppError>;

    async fn convert_draft(
        &self,
        draft_id: &str,
        request: &ConvertDraftRequest,
    ) -> Result<Value, AppError>;

    async fn delete_draft(&self, draft_id: &str) -> Result<(), AppError>;

    async fn delete_order(&self, order_id: &str) -> Result<(), AppError>;

    async fn record_payment(
        &self,
        order_id: &str,
        request: &PaymentRequest,
    ) -> Result<Value, AppError>;
}

/// Реальный backend через gloo-net
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpGateway;

#[async_trait(?Send)]
impl PurchaseGateway for HttpGateway {
    async fn fetch_drafts(&self, query: &ListQuery) -> Result<ListPage<PurchaseDraft>, AppError> {
        drafts_api::fetch_drafts(query).await
    }

    async fn fetch_orders(&self, query: &ListQuery) -> Result<ListPage<PurchaseOrder>, AppError> {
        fetch_orders(query).await
    }

    async fn convert_draft(
        &self,
        draft_id: &str,
        request: &ConvertDraftRequest,
    ) -> Result<Value, AppError> {
        drafts_api::convert_draft(draft_id, request).await
    }

    async fn delete_draft(&self, draft_id: &str) -> Result<(), AppError> {
        drafts_api::delete_draft(draft_id).await
    }

    async fn delete_order(&self, order_id: &str) -> Result<(), AppError> {
        delete_order(order_id).await
    }

    async fn record_payment(
        &self,
        order_id: &str,
        request: &PaymentRequest,
    ) -> Result<Value, AppError> {
        record_payment(order_id, request).await
    }
}

pub async fn fetch_orders(query: &ListQuery) -> Result<ListPage<PurchaseOrder>, AppError> {
    let url = api_url_with_query(ORDERS_PATH, query)?;
    let body = get_raw(&url).await?;
    Ok(serde_json::from_value(unwrap_data(body))?)
}

pub async fn delete_order(order_id: &str) -> Result<(), AppError> {
    let url = api_url(&format!("{}/{}", ORDERS_PATH, path_segment(order_id)));
    delete(&url).await?;
    log::info!("Purchase order {} deleted", order_id);
    Ok(())
}

pub async fn record_payment(order_id: &str, request: &PaymentRequest) -> Result<Value, AppError> {
    let url = api_url(&format!("{}/{}/payments", ORDERS_PATH, path_segment(order_id)));
    let response = post_json(&url, request).await?;
    log::info!(
        "Payment of {:.2} recorded for order {}",
        request.amount,
        order_id
    );
    Ok(response)
}
