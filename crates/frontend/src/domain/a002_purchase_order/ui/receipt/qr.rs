//! Сканируемый код на квитанции: JSON с реквизитами платежа, закодированный в QR.

use qrcode::types::Color;
use qrcode::QrCode;
use serde::Serialize;

/// Поля, которые попадают в QR-код квитанции
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptPayload {
    pub receipt_id: String,
    pub order_ref: String,
    pub store: String,
    pub supplier: String,
    pub amount: f64,
    pub payment_method: String,
    pub date: String,
}

impl ReceiptPayload {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Белая рамка вокруг кода, в модулях
const QUIET_ZONE: usize = 4;

/// QR-код как inline SVG; размер задаётся CSS, SVG масштабируется без потерь
pub fn qr_svg(data: &str) -> Result<String, String> {
    let code = QrCode::new(data.as_bytes()).map_err(|e| format!("Failed to build QR code: {}", e))?;

    let width = code.width();
    let size = width + QUIET_ZONE * 2;

    let mut path = String::new();
    for (i, color) in code.to_colors().iter().enumerate() {
        if *color == Color::Dark {
            let x = i % width + QUIET_ZONE;
            let y = i / width + QUIET_ZONE;
            path.push_str(&format!("M{x},{y}h1v1h-1z"));
        }
    }

    Ok(format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {size} {size}" shape-rendering="crispEdges" class="receipt-qr"><rect width="{size}" height="{size}" fill="#fff"/><path d="{path}" fill="#000"/></svg>"##
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_json_field_names() {
        let payload = ReceiptPayload {
            receipt_id: "TXN-1".into(),
            order_ref: "PO-000101".into(),
            store: "Main".into(),
            supplier: "Acme".into(),
            amount: 250.5,
            payment_method: "cash".into(),
            date: "2024-03-15".into(),
        };
        let json = payload.to_json();
        assert!(json.starts_with(r#"{"receipt_id":"TXN-1","order_ref":"PO-000101""#));
        assert!(json.contains(r#""amount":250.5"#));
    }

    #[test]
    fn test_qr_svg_is_inline_svg() {
        let svg = qr_svg(r#"{"receipt_id":"TXN-1"}"#).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("h1v1h-1z"));
    }
}
