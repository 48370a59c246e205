pub mod document;
pub mod qr;

use self::document::{receipt_document, DocumentMode, ReceiptModel};
use crate::config::config;
use crate::shared::export::{download_html, print_html, safe_filename};
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;
use contracts::domain::a002_purchase_order::{PurchaseOrder, Transaction};
use leptos::prelude::*;
use thaw::*;

/// Квитанция об оплате: просмотр, печать, скачивание HTML
#[component]
pub fn ReceiptModal(
    /// Заказ в состоянии после платежа
    order: PurchaseOrder,
    transaction: Transaction,
    on_close: Callback<()>,
) -> impl IntoView {
    let model = ReceiptModel::new(&order, &transaction, config());
    let (action_error, set_action_error) = signal::<Option<String>>(None);

    let print_model = model.clone();
    let on_print = move |_: leptos::ev::MouseEvent| {
        let html = receipt_document(&print_model, DocumentMode::Print);
        if let Err(e) = print_html(&html) {
            log::error!("Receipt print failed: {}", e);
            set_action_error.set(Some("Could not open the print dialog.".to_string()));
        }
    };

    let download_model = model.clone();
    let on_download = move |_: leptos::ev::MouseEvent| {
        let html = receipt_document(&download_model, DocumentMode::Download);
        let filename = safe_filename(&download_model.file_stem(), "html");
        if let Err(e) = download_html(&html, &filename) {
            log::error!("Receipt download failed: {}", e);
            set_action_error.set(Some("Could not download the receipt.".to_string()));
        }
    };

    let title = format!("Money Receipt {}", model.receipt_id);
    let qr = model.qr_svg.clone().unwrap_or_default();

    view! {
        <ModalFrame
            title=title
            on_close=on_close
            modal_class="receipt-modal"
            header_actions=std::sync::Arc::new(move || {
                let on_print = on_print.clone();
                let on_download = on_download.clone();
                view! {
                    <Button appearance=ButtonAppearance::Primary on_click=on_print>
                        {icon("printer")}
                        " Print"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=on_download>
                        {icon("download")}
                        " Download HTML"
                    </Button>
                }
                .into_any()
            })
        >
            {move || action_error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

            <div class="receipt-view">
                <div class="receipt-view__head">
                    <div>
                        <div class="receipt-view__company">{model.company_name.clone()}</div>
                        <div class="receipt-view__address">{model.company_address.clone()}</div>
                    </div>
                    <div class="receipt-view__amount">{model.amount.clone()}</div>
                </div>

                <dl class="receipt-view__meta">
                    <dt>"Receipt No."</dt><dd>{model.receipt_id.clone()}</dd>
                    <dt>"Purchase order"</dt><dd>{model.order_ref.clone()}</dd>
                    <dt>"Date"</dt><dd>{model.paid_at.clone()}</dd>
                    <dt>"Store"</dt><dd>{model.store_name.clone()}</dd>
                    <dt>"Paid to"</dt><dd>{model.supplier_name.clone()}</dd>
                    <dt>"Payment method"</dt><dd>{model.payment_method.clone()}</dd>
                    <dt>"Order total"</dt><dd>{model.grand_total.clone()}</dd>
                    <dt>"Total paid"</dt><dd>{model.total_paid.clone()}</dd>
                    <dt>"Balance due"</dt><dd>{model.amount_due.clone()}</dd>
                    <dt>"Payment status"</dt><dd>{model.payment_status.clone()}</dd>
                    {model.notes.clone().map(|notes| view! { <dt>"Notes"</dt><dd>{notes}</dd> })}
                </dl>

                <div class="receipt-view__words">{model.amount_in_words.clone()}</div>

                <div class="receipt-view__foot">
                    <div class="receipt-view__qr" inner_html=qr></div>
                    <div class="receipt-view__sign">"Authorized signature"</div>
                </div>
            </div>
        </ModalFrame>
    }
}
