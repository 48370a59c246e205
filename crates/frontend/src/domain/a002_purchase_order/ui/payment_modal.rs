use crate::domain::a002_purchase_order::api::HttpGateway;
use crate::domain::a002_purchase_order::workflow::{collect_payment, PaymentForm, PaymentOutcome};
use crate::shared::date_utils::now_utc;
use crate::shared::errors::AppError;
use crate::shared::modal_frame::ModalFrame;
use crate::shared::money::{format_amount, format_money};
use contracts::domain::a002_purchase_order::{PaymentMethod, PaymentMode, PurchaseOrder};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Приём оплаты по заказу: частичная сумма или полный остаток
#[component]
pub fn PaymentModal(
    order: PurchaseOrder,
    /// Режим при открытии (кнопки "Pay" и "Pay in full" в таблице)
    initial_mode: PaymentMode,
    on_close: Callback<()>,
    on_paid: Callback<PaymentOutcome>,
    /// Ошибка сервера; показывается диалогом поверх формы
    on_failed: Callback<AppError>,
) -> impl IntoView {
    let title = format!("Collect payment · {}", order.invoice_number);
    let due = order.amount_due;
    let order = StoredValue::new(order);

    let mode = RwSignal::new(initial_mode);
    let amount = RwSignal::new(match initial_mode {
        PaymentMode::Full => format_amount(due),
        PaymentMode::Partial => String::new(),
    });
    let method = RwSignal::new(PaymentMethod::default().as_str().to_string());
    let notes = RwSignal::new(String::new());
    let saving = RwSignal::new(false);
    let (field_error, set_field_error) = signal::<Option<String>>(None);

    let set_mode = move |next: PaymentMode| {
        mode.set(next);
        set_field_error.set(None);
        match next {
            PaymentMode::Full => amount.set(format_amount(due)),
            PaymentMode::Partial => amount.set(String::new()),
        }
    };

    let submit = move || {
        if saving.get_untracked() {
            return;
        }
        let form = PaymentForm {
            mode: mode.get_untracked(),
            amount_input: amount.get_untracked(),
            payment_method: PaymentMethod::from_code(&method.get_untracked()),
            notes: notes.get_untracked(),
        };
        set_field_error.set(None);
        saving.set(true);

        spawn_local(async move {
            let order = order.get_value();
            let result = collect_payment(&HttpGateway, &order, &form, now_utc()).await;
            saving.set(false);
            match result {
                Ok(outcome) => on_paid.run(outcome),
                Err(e) if e.is_client_side() => set_field_error.set(Some(e.user_message())),
                Err(e) => {
                    log::error!("Payment for {} failed: {}", order.invoice_number, e);
                    on_failed.run(e);
                }
            }
        });
    };

    let is_full = move || mode.get() == PaymentMode::Full;

    view! {
        <ModalFrame title=title on_close=on_close busy=Signal::derive(move || saving.get()) modal_class="payment-modal">
            <div class="payment-summary">
                <span>"Amount due"</span>
                <strong>{format_money(due)}</strong>
            </div>

            <div class="payment-mode">
                <Button
                    appearance=Signal::derive(move || if is_full() { ButtonAppearance::Secondary } else { ButtonAppearance::Primary })
                    on_click=move |_| set_mode(PaymentMode::Partial)
                    disabled=Signal::derive(move || saving.get())
                >
                    "Partial payment"
                </Button>
                <Button
                    appearance=Signal::derive(move || if is_full() { ButtonAppearance::Primary } else { ButtonAppearance::Secondary })
                    on_click=move |_| set_mode(PaymentMode::Full)
                    disabled=Signal::derive(move || saving.get())
                >
                    "Full payment"
                </Button>
            </div>

            <div class="form__group">
                <Label>"Amount"</Label>
                <Input
                    value=amount
                    placeholder="0.00"
                    readonly=Signal::derive(is_full)
                    disabled=Signal::derive(move || saving.get())
                />
                {move || field_error.get().map(|e| view! { <div class="form__error">{e}</div> })}
            </div>

            <div class="form__group">
                <Label>"Payment method"</Label>
                <Select value=method>
                    {PaymentMethod::ALL
                        .iter()
                        .map(|m| view! { <option value=m.as_str()>{m.label()}</option> })
                        .collect_view()}
                </Select>
            </div>

            <div class="form__group">
                <Label>"Notes"</Label>
                <Textarea value=notes placeholder="Optional" attr:rows=2 />
            </div>

            <div class="modal-actions">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_close.run(())
                    disabled=Signal::derive(move || saving.get())
                >
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| submit()
                    disabled=Signal::derive(move || saving.get())
                >
                    {move || if saving.get() { "Saving..." } else { "Record payment" }}
                </Button>
            </div>
        </ModalFrame>
    }
}
