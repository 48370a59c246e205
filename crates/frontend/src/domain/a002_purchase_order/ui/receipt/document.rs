//! Денежная квитанция (money receipt) как самостоятельный HTML-документ.
//!
//! Один и тот же документ печатается через скрытый iframe и скачивается файлом,
//! поэтому стили встроены, а ссылок на страницу приложения нет.

use super::qr::{qr_svg, ReceiptPayload};
use crate::config::AppConfig;
use crate::shared::amount_words::amount_in_words;
use crate::shared::date_utils::{format_datetime, iso_date};
use crate::shared::money::format_currency_with;
use contracts::domain::a002_purchase_order::{PurchaseOrder, Transaction};

/// Всё, что показывается на квитанции, уже в виде строк
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptModel {
    pub receipt_id: String,
    pub order_ref: String,
    pub company_name: String,
    pub company_address: String,
    pub footer_note: String,
    pub store_name: String,
    pub supplier_name: String,
    pub supplier_phone: Option<String>,
    pub paid_at: String,
    pub payment_method: String,
    pub amount: String,
    pub amount_in_words: String,
    pub grand_total: String,
    pub total_paid: String,
    pub amount_due: String,
    pub payment_status: String,
    pub notes: Option<String>,
    pub payload: ReceiptPayload,
    /// None, если QR не удалось построить; квитанция печатается и без него
    pub qr_svg: Option<String>,
}

impl ReceiptModel {
    /// `order`: снимок заказа уже после этого платежа
    pub fn new(order: &PurchaseOrder, txn: &Transaction, config: &AppConfig) -> Self {
        let currency = &config.currency;
        let money = |value: f64| format_currency_with(value, currency);

        let payload = ReceiptPayload {
            receipt_id: txn.id.to_string(),
            order_ref: order.invoice_number.clone(),
            store: order.store_name(),
            supplier: order.supplier_name(),
            amount: txn.amount,
            payment_method: txn.payment_method.as_str().to_string(),
            date: iso_date(&txn.paid_at),
        };

        let qr_svg = match qr_svg(&payload.to_json()) {
            Ok(svg) => Some(svg),
            Err(e) => {
                log::warn!("Receipt {} has no QR code: {}", txn.id, e);
                None
            }
        };

        Self {
            receipt_id: txn.id.to_string(),
            order_ref: order.invoice_number.clone(),
            company_name: config.receipt.company_name.clone(),
            company_address: config.receipt.address.clone(),
            footer_note: config.receipt.footer_note.clone(),
            store_name: order.store_name(),
            supplier_name: order.supplier_name(),
            supplier_phone: order.supplier.as_ref().and_then(|s| s.phone.clone()),
            paid_at: format_datetime(&txn.paid_at),
            payment_method: txn.payment_method.label().to_string(),
            amount: money(txn.amount),
            amount_in_words: amount_in_words(txn.amount, &currency.name),
            grand_total: money(order.grand_total),
            total_paid: money(order.amount_paid),
            amount_due: money(order.amount_due),
            payment_status: order.payment_status.label().to_string(),
            notes: txn.notes.clone().filter(|n| !n.trim().is_empty()),
            payload,
            qr_svg,
        }
    }

    /// Имя файла при скачивании, без расширения
    pub fn file_stem(&self) -> String {
        format!("receipt-{}-{}", self.order_ref, self.receipt_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentMode {
    /// Документ сам открывает диалог печати после загрузки
    Print,
    Download,
}

const RECEIPT_STYLE: &str = r#"
* { box-sizing: border-box; }
body { font-family: Arial, Helvetica, sans-serif; color: #111; margin: 0; padding: 24px; }
.receipt { max-width: 720px; margin: 0 auto; border: 1px solid #ccc; padding: 24px; }
.receipt__head { display: flex; justify-content: space-between; align-items: flex-start; border-bottom: 2px solid #111; padding-bottom: 12px; }
.receipt__company { font-size: 20px; font-weight: bold; }
.receipt__address { font-size: 12px; color: #555; }
.receipt__title { text-align: right; font-size: 18px; font-weight: bold; text-transform: uppercase; }
.receipt__meta { width: 100%; border-collapse: collapse; margin: 16px 0; font-size: 14px; }
.receipt__meta td { padding: 4px 0; vertical-align: top; }
.receipt__meta td:first-child { color: #555; width: 40%; }
.receipt__amount { font-size: 22px; font-weight: bold; }
.receipt__words { font-style: italic; padding: 8px; background: #f5f5f5; margin-bottom: 16px; }
.receipt__foot { display: flex; justify-content: space-between; align-items: flex-end; margin-top: 24px; }
.receipt-qr { width: 120px; height: 120px; }
.receipt__sign { border-top: 1px solid #111; padding-top: 4px; width: 200px; text-align: center; font-size: 12px; }
.receipt__note { font-size: 12px; color: #555; text-align: center; margin-top: 16px; }
@media print { body { padding: 0; } .receipt { border: none; } }
"#;

const PRINT_SCRIPT: &str =
    "<script>window.addEventListener('load',function(){window.focus();window.print();});</script>";

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn meta_row(label: &str, value: &str) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td></tr>",
        escape_html(label),
        escape_html(value)
    )
}

/// Полный HTML-документ квитанции
pub fn receipt_document(model: &ReceiptModel, mode: DocumentMode) -> String {
    let mut rows = vec![
        meta_row("Receipt No.", &model.receipt_id),
        meta_row("Purchase order", &model.order_ref),
        meta_row("Date", &model.paid_at),
        meta_row("Store", &model.store_name),
        meta_row("Paid to", &model.supplier_name),
    ];
    if let Some(phone) = &model.supplier_phone {
        rows.push(meta_row("Phone", phone));
    }
    rows.push(meta_row("Payment method", &model.payment_method));
    rows.push(meta_row("Order total", &model.grand_total));
    rows.push(meta_row("Total paid", &model.total_paid));
    rows.push(meta_row("Balance due", &model.amount_due));
    rows.push(meta_row("Payment status", &model.payment_status));
    if let Some(notes) = &model.notes {
        rows.push(meta_row("Notes", notes));
    }

    let address = if model.company_address.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="receipt__address">{}</div>"#,
            escape_html(&model.company_address)
        )
    };
    let footer = if model.footer_note.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="receipt__note">{}</div>"#,
            escape_html(&model.footer_note)
        )
    };
    let script = match mode {
        DocumentMode::Print => PRINT_SCRIPT,
        DocumentMode::Download => "",
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Money Receipt {receipt_id}</title>
<style>{style}</style>
</head>
<body>
<div class="receipt">
<div class="receipt__head">
<div><div class="receipt__company">{company}</div>{address}</div>
<div class="receipt__title">Money Receipt</div>
</div>
<table class="receipt__meta">{rows}</table>
<div class="receipt__amount">Amount: {amount}</div>
<div class="receipt__words">{words}</div>
<div class="receipt__foot">
<div>{qr}</div>
<div class="receipt__sign">Authorized signature</div>
</div>
{footer}
</div>
{script}
</body>
</html>"#,
        receipt_id = escape_html(&model.receipt_id),
        style = RECEIPT_STYLE,
        company = escape_html(&model.company_name),
        address = address,
        rows = rows.join(""),
        amount = escape_html(&model.amount),
        words = escape_html(&model.amount_in_words),
        qr = model.qr_svg.as_deref().unwrap_or(""),
        footer = footer,
        script = script,
    )
}
