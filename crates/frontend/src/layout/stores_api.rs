use crate::shared::api_utils::{api_url, get_typed};
use crate::shared::errors::AppError;
use contracts::domain::common::StoreRef;
use serde::Deserialize;

/// Ответ `/api/stores`: либо `{ data: [...] }`, либо голый массив
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoresResponse {
    Wrapped { data: Vec<StoreRef> },
    Plain(Vec<StoreRef>),
}

impl From<StoresResponse> for Vec<StoreRef> {
    fn from(response: StoresResponse) -> Self {
        match response {
            StoresResponse::Wrapped { data } => data,
            StoresResponse::Plain(stores) => stores,
        }
    }
}

pub async fn fetch_stores() -> Result<Vec<StoreRef>, AppError> {
    let response: StoresResponse = get_typed(&api_url("/api/stores")).await?;
    Ok(response.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stores_response_shapes() {
        let wrapped: StoresResponse =
            serde_json::from_str(r#"{"data":[{"id":1,"name":"Main"}]}"#).unwrap();
        let plain: StoresResponse =
            serde_json::from_str(r#"[{"id":"2","name":"Branch","address":"Road 5"}]"#).unwrap();

        let wrapped: Vec<StoreRef> = wrapped.into();
        let plain: Vec<StoreRef> = plain.into();
        assert_eq!(wrapped[0].id.as_str(), "1");
        assert_eq!(plain[0].address.as_deref(), Some("Road 5"));
    }
}
