//! Разбор ответов мутаций.
//!
//! Мутации backend возвращают либо плоский объект, либо `{ data: {...} }`.
//! Успешный HTTP статус ещё не значит успех: страница ошибки прокси тоже
//! приходит с 200, поэтому ключевые поля проверяются явно.

use serde_json::Value;
use thiserror::Error;

/// Ответ помечен как успешный, но в нём нет обязательного поля
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed response: missing `{field}`")]
pub struct MalformedResponse {
    pub field: &'static str,
}

/// Снять обёртку `data`, если она есть
pub fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) => match map.remove("data") {
            Some(inner @ Value::Object(_)) => inner,
            Some(other) => {
                map.insert("data".to_string(), other);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Найти вложенный объект по одному из ключей (`order`, `purchase_order` ...)
pub fn nested_object<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| value.get(*k))
        .find(|v| v.is_object())
}

/// Непустое строковое (или числовое) поле
pub fn required_field(value: &Value, field: &'static str) -> Result<String, MalformedResponse> {
    optional_field(value, field).ok_or(MalformedResponse { field })
}

pub fn optional_field(value: &Value, field: &str) -> Option<String> {
    match value.get(field)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Текст ошибки от сервера (`message`, `error` или первая из `errors`)
pub fn server_message(value: &Value) -> Option<String> {
    let value = match value.get("data") {
        Some(inner) if inner.get("message").is_some() => inner,
        _ => value,
    };

    if let Some(msg) = optional_field(value, "message") {
        return Some(msg);
    }
    if let Some(msg) = optional_field(value, "error") {
        return Some(msg);
    }

    // Laravel-подобный формат: { errors: { field: ["msg", ...] } }
    value
        .get("errors")
        .and_then(|e| e.as_object())
        .and_then(|errors| errors.values().next())
        .and_then(|first| match first {
            Value::Array(arr) => arr.first().and_then(|v| v.as_str()).map(String::from),
            Value::String(s) => Some(s.clone()),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_data_wrapped_and_flat() {
        let wrapped = json!({ "data": { "id": 1 }, "message": "ok" });
        assert_eq!(unwrap_data(wrapped), json!({ "id": 1 }));

        let flat = json!({ "id": 1 });
        assert_eq!(unwrap_data(flat.clone()), flat);
    }

    #[test]
    fn test_unwrap_data_keeps_non_object_data() {
        let v = json!({ "data": null, "id": 7 });
        let out = unwrap_data(v);
        assert_eq!(out["id"], 7);
    }

    #[test]
    fn test_required_field() {
        let v = json!({ "invoice_number": "PO-0001", "id": 12, "empty": "  " });
        assert_eq!(required_field(&v, "invoice_number").unwrap(), "PO-0001");
        assert_eq!(required_field(&v, "id").unwrap(), "12");
        assert_eq!(
            required_field(&v, "empty"),
            Err(MalformedResponse { field: "empty" })
        );
        assert!(required_field(&v, "missing").is_err());
    }

    #[test]
    fn test_server_message_variants() {
        assert_eq!(
            server_message(&json!({ "message": "Draft not found" })).as_deref(),
            Some("Draft not found")
        );
        assert_eq!(
            server_message(&json!({ "error": "Forbidden" })).as_deref(),
            Some("Forbidden")
        );
        assert_eq!(
            server_message(&json!({ "errors": { "amount": ["Amount is too large"] } })).as_deref(),
            Some("Amount is too large")
        );
        assert_eq!(server_message(&json!({ "ok": true })), None);
    }
}
