use crate::shared::response::{nested_object, required_field, unwrap_data, MalformedResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Тело запроса на конвертацию черновика в заказ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvertDraftRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ConvertDraftRequest {
    pub fn new(note: &str) -> Self {
        let note = note.trim();
        Self {
            note: (!note.is_empty()).then(|| note.to_string()),
        }
    }
}

/// Минимум, который должен вернуть backend после конвертации
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedOrder {
    pub id: String,
    pub invoice_number: String,
}

/// Проверить ответ конвертации.
///
/// Принимаются формы `{data:{...}}`, плоский объект, а также заказ,
/// вложенный в `order` / `purchase_order`. Без `invoice_number` ответ
/// считается ошибкой, даже если HTTP статус был успешным.
pub fn parse_converted_order(value: Value) -> Result<ConvertedOrder, MalformedResponse> {
    let body = unwrap_data(value);
    let order = nested_object(&body, &["purchase_order", "order"]).unwrap_or(&body);

    let invoice_number = required_field(order, "invoice_number")?;
    let id = required_field(order, "id")?;

    Ok(ConvertedOrder { id, invoice_number })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_note_is_trimmed_and_optional() {
        assert_eq!(ConvertDraftRequest::new("   ").note, None);
        assert_eq!(
            ConvertDraftRequest::new(" urgent ").note.as_deref(),
            Some("urgent")
        );
        assert_eq!(
            serde_json::to_string(&ConvertDraftRequest::default()).unwrap(),
            "{}"
        );
    }

    #[test]
    fn test_parse_wrapped_and_nested() {
        let wrapped = json!({ "data": { "id": 9, "invoice_number": "PO-0009" } });
        assert_eq!(
            parse_converted_order(wrapped).unwrap(),
            ConvertedOrder { id: "9".into(), invoice_number: "PO-0009".into() }
        );

        let nested = json!({ "success": true, "order": { "id": "a1", "invoice_number": "PO-1" } });
        assert_eq!(parse_converted_order(nested).unwrap().invoice_number, "PO-1");
    }

    #[test]
    fn test_missing_invoice_number_is_error() {
        let html_like = json!({ "message": "Server Error" });
        assert_eq!(
            parse_converted_order(html_like),
            Err(MalformedResponse { field: "invoice_number" })
        );

        let no_id = json!({ "invoice_number": "PO-2" });
        assert_eq!(
            parse_converted_order(no_id),
            Err(MalformedResponse { field: "id" })
        );
    }
}
