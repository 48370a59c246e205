//! Ошибки клиентских операций.
//!
//! Ни одна из них не фатальна: списки показывают баннер,
//! мутации: диалог с текстом из `user_message()`.

use contracts::domain::a002_purchase_order::{DeleteBlocked, PaymentValidationError};
use contracts::shared::response::MalformedResponse;
use thiserror::Error;

pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";
pub const LIST_LOAD_ERROR: &str = "Could not load data. Please try again.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// Запрос не дошёл до сервера
    #[error("network error: {0}")]
    Network(String),

    /// Сервер ответил ошибкой
    #[error("server error {status}")]
    Server { status: u16, message: Option<String> },

    /// Проверка на клиенте, запрос не отправлялся
    #[error("{0}")]
    Validation(String),

    /// HTTP успех, но в ответе нет ключевых полей
    #[error("unexpected server response: {0}")]
    MalformedResponse(String),

    /// Нарушено бизнес-правило, проверенное на клиенте
    #[error("{0}")]
    BusinessRule(String),

    #[error("failed to parse response: {0}")]
    Decode(String),
}

impl AppError {
    /// Текст для диалога
    pub fn user_message(&self) -> String {
        match self {
            AppError::Server {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => msg.clone(),
            AppError::Validation(msg) | AppError::BusinessRule(msg) => msg.clone(),
            AppError::MalformedResponse(_) => {
                "The server returned an unexpected response. Please refresh and check the result."
                    .to_string()
            }
            _ => GENERIC_ERROR.to_string(),
        }
    }

    /// Ошибка возникла до отправки запроса
    pub fn is_client_side(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::BusinessRule(_))
    }
}

impl From<MalformedResponse> for AppError {
    fn from(e: MalformedResponse) -> Self {
        AppError::MalformedResponse(e.to_string())
    }
}

impl From<PaymentValidationError> for AppError {
    fn from(e: PaymentValidationError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<DeleteBlocked> for AppError {
    fn from(e: DeleteBlocked) -> Self {
        AppError::BusinessRule(format!("This order cannot be deleted: {}.", e))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_preferred() {
        let err = AppError::Server {
            status: 422,
            message: Some("Draft already converted".into()),
        };
        assert_eq!(err.user_message(), "Draft already converted");

        let blank = AppError::Server {
            status: 500,
            message: Some("  ".into()),
        };
        assert_eq!(blank.user_message(), GENERIC_ERROR);
    }

    #[test]
    fn test_network_uses_generic_message() {
        let err = AppError::Network("timeout".into());
        assert_eq!(err.user_message(), GENERIC_ERROR);
        assert!(!err.is_client_side());
    }

    #[test]
    fn test_delete_blocked_conversion() {
        let err: AppError = DeleteBlocked::PaymentRecorded("partial").into();
        assert!(err.is_client_side());
        assert!(err.user_message().contains("partial"));
    }
}
