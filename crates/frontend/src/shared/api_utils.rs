//! API utilities for frontend-backend communication
//!
//! URL construction plus the shared request/response handling used by
//! every domain `api.rs`.

use crate::config::config;
use crate::shared::errors::AppError;
use contracts::shared::response::server_message;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Get the base URL for API requests
///
/// Uses `[api] base_url` from the config when set, otherwise builds it
/// from the current window location and `[api] port`.
///
/// # Returns
/// - API base URL like "http://localhost:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let api = &config().api;
    if !api.base_url.is_empty() {
        return api.base_url.trim_end_matches('/').to_string();
    }

    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, api.port)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/purchases/orders");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Build a full API URL with a query string serialized by `serde_qs`
pub fn api_url_with_query<Q: Serialize>(path: &str, query: &Q) -> Result<String, AppError> {
    let qs = serde_qs::to_string(query)
        .map_err(|e| AppError::Validation(format!("Invalid query: {}", e)))?;
    if qs.is_empty() {
        Ok(api_url(path))
    } else {
        Ok(format!("{}?{}", api_url(path), qs))
    }
}

/// Resolve a relative storage path (product image etc.) against the configured base.
///
/// Absolute URLs are returned untouched.
pub fn storage_url(base: &str, path: &str) -> String {
    let path = path.trim();
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("data:") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Percent-encode a single path segment (ids from the backend are not trusted as URL-safe)
pub fn path_segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

/// Turn a response into JSON or an `AppError` carrying the server message
pub async fn read_json(response: Response) -> Result<Value, AppError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    if !response.ok() {
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| server_message(&v));
        log::warn!("API error {}: {:?}", status, message);
        return Err(AppError::Server { status, message });
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    // Не-JSON при статусе 2xx (например, HTML-страница прокси) считаем битым ответом
    serde_json::from_str::<Value>(&text)
        .map_err(|_| AppError::MalformedResponse("response body is not JSON".to_string()))
}

/// GET, returns raw JSON
pub async fn get_raw(url: &str) -> Result<Value, AppError> {
    log::debug!("GET {}", url);
    let response = Request::get(url)
        .header("Accept", "application/json")
        .header("Cache-Control", "no-cache")
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    read_json(response).await
}

/// GET + typed decode
pub async fn get_typed<T: DeserializeOwned>(url: &str) -> Result<T, AppError> {
    let value = get_raw(url).await?;
    Ok(serde_json::from_value(value)?)
}

/// POST JSON body, returns raw JSON for defensive unwrapping by the caller
pub async fn post_json<B: Serialize>(url: &str, body: &B) -> Result<Value, AppError> {
    log::debug!("POST {}", url);
    let response = Request::post(url)
        .header("Accept", "application/json")
        .json(body)
        .map_err(|e| AppError::Validation(format!("Failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    read_json(response).await
}

pub async fn delete(url: &str) -> Result<Value, AppError> {
    log::debug!("DELETE {}", url);
    let response = Request::delete(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    read_json(response).await
}
