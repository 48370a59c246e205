//! Сценарии действий над закупками: загрузка вкладки, конвертация черновика,
//! удаление, приём оплаты.
//!
//! Клиентские проверки выполняются до обращения к `PurchaseGateway`:
//! если проверка не прошла, запрос не отправляется.

use super::api::PurchaseGateway;
use super::ui::list::state::{FetchTicket, TabPage};
use crate::shared::errors::AppError;
use chrono::{DateTime, Utc};
use contracts::domain::a001_purchase_draft::{parse_converted_order, ConvertDraftRequest, ConvertedOrder};
use contracts::domain::a002_purchase_order::{
    apply_payment, parse_amount_input, synthesize_transaction, validate_payment_amount,
    PaymentMethod, PaymentMode, PaymentRequest, PurchaseOrder, Transaction,
};

/// Результат успешной оплаты: локальный снимок заказа и запись для квитанции
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentOutcome {
    pub order: PurchaseOrder,
    pub transaction: Transaction,
}

/// Данные формы оплаты
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentForm {
    pub mode: PaymentMode,
    /// Строка из поля ввода; в режиме `Full` не используется
    pub amount_input: String,
    pub payment_method: PaymentMethod,
    pub notes: String,
}

pub async fn fetch_tab<G: PurchaseGateway + ?Sized>(
    gateway: &G,
    ticket: &FetchTicket,
) -> Result<TabPage, AppError> {
    if ticket.tab.is_drafts() {
        Ok(TabPage::Drafts(gateway.fetch_drafts(&ticket.query).await?))
    } else {
        Ok(TabPage::Orders(gateway.fetch_orders(&ticket.query).await?))
    }
}

/// Черновик → заказ. Ответ без `invoice_number` или `id` считается ошибкой.
pub async fn convert_draft<G: PurchaseGateway + ?Sized>(
    gateway: &G,
    draft_id: &str,
    note: &str,
) -> Result<ConvertedOrder, AppError> {
    let request = ConvertDraftRequest::new(note);
    let response = gateway.convert_draft(draft_id, &request).await?;
    let converted = parse_converted_order(response).map_err(|e| {
        log::error!("Convert response for draft {} is malformed: {}", draft_id, e);
        AppError::from(e)
    })?;
    log::info!(
        "Draft {} became purchase order {}",
        draft_id,
        converted.invoice_number
    );
    Ok(converted)
}

pub async fn delete_draft<G: PurchaseGateway + ?Sized>(
    gateway: &G,
    draft_id: &str,
) -> Result<(), AppError> {
    gateway.delete_draft(draft_id).await
}

/// Удаление заказа: только неоплаченный заказ в статусе "ordered"
pub async fn delete_order<G: PurchaseGateway + ?Sized>(
    gateway: &G,
    order: &PurchaseOrder,
) -> Result<(), AppError> {
    if let Err(blocked) = order.deletion_check() {
        log::warn!("Delete of {} blocked: {}", order.invoice_number, blocked);
        return Err(blocked.into());
    }
    gateway.delete_order(order.id.as_str()).await
}

/// Приём оплаты. При ошибке валидации запрос не отправляется;
/// при ошибке сервера заказ не меняется.
pub async fn collect_payment<G: PurchaseGateway + ?Sized>(
    gateway: &G,
    order: &PurchaseOrder,
    form: &PaymentForm,
    now: DateTime<Utc>,
) -> Result<PaymentOutcome, AppError> {
    let entered = parse_amount_input(&form.amount_input);
    let amount = validate_payment_amount(order, form.mode, entered)?;

    let notes = form.notes.trim();
    let request = PaymentRequest {
        amount,
        payment_method: form.payment_method,
        mode: form.mode,
        notes: (!notes.is_empty()).then(|| notes.to_string()),
    };

    let response = gateway.record_payment(order.id.as_str(), &request).await?;
    let transaction = synthesize_transaction(response, &request, now);
    let order = apply_payment(order, &transaction);

    Ok(PaymentOutcome { order, transaction })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_purchase_order::ui::list::state::{PurchaseListState, PurchaseTab};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use contracts::domain::a001_purchase_draft::PurchaseDraft;
    use contracts::domain::a002_purchase_order::{OrderStatus, PaymentStatus};
    use contracts::shared::list::{ListPage, ListQuery};
    use futures::executor::block_on;
    use serde_json::{json, Value};
    use std::cell::RefCell;

    /// Записывает вызовы и отвечает заранее заданным JSON
    #[derive(Default)]
    struct RecordingGateway {
        calls: RefCell<Vec<String>>,
        response: Value,
        fail_with: Option<AppError>,
    }

    impl RecordingGateway {
        fn responding(response: Value) -> Self {
            Self {
                response,
                ..Default::default()
            }
        }

        fn failing(error: AppError) -> Self {
            Self {
                fail_with: Some(error),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: String) -> Result<(), AppError> {
            self.calls.borrow_mut().push(call);
            match &self.fail_with {
                Some(error) => Err(error.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait(?Send)]
    impl PurchaseGateway for RecordingGateway {
        async fn fetch_drafts(&self, query: &ListQuery) -> Result<ListPage<PurchaseDraft>, AppError> {
            self.record(format!("fetch_drafts page={}", query.page))?;
            Ok(ListPage {
                items: vec![],
                pagination: None,
                stats: None,
            })
        }

        async fn fetch_orders(&self, query: &ListQuery) -> Result<ListPage<PurchaseOrder>, AppError> {
            self.record(format!(
                "fetch_orders scope={}",
                query.scope.clone().unwrap_or_default()
            ))?;
            Ok(ListPage {
                items: vec![order(PaymentStatus::Pending, OrderStatus::Ordered)],
                pagination: None,
                stats: None,
            })
        }

        async fn convert_draft(
            &self,
            draft_id: &str,
            _request: &ConvertDraftRequest,
        ) -> Result<Value, AppError> {
            self.record(format!("convert {draft_id}"))?;
            Ok(self.response.clone())
        }

        async fn delete_draft(&self, draft_id: &str) -> Result<(), AppError> {
            self.record(format!("delete_draft {draft_id}"))
        }

        async fn delete_order(&self, order_id: &str) -> Result<(), AppError> {
            self.record(format!("delete_order {order_id}"))
        }

        async fn record_payment(
            &self,
            order_id: &str,
            request: &PaymentRequest,
        ) -> Result<Value, AppError> {
            self.record(format!("pay {order_id} {:.2}", request.amount))?;
            Ok(self.response.clone())
        }
    }

    fn order(payment: PaymentStatus, status: OrderStatus) -> PurchaseOrder {
        serde_json::from_value(json!({
            "id": 101,
            "invoice_number": "PO-000101",
            "supplier": { "id": 5, "name": "Acme Traders" },
            "grand_total": 1000.0,
            "amount_paid": 0.0,
            "amount_due": 1000.0,
            "payment_status": payment,
            "order_status": status,
            "created_at": "2024-03-15T10:00:00Z"
        }))
        .unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    fn form(mode: PaymentMode, amount: &str) -> PaymentForm {
        PaymentForm {
            mode,
            amount_input: amount.to_string(),
            payment_method: PaymentMethod::Cash,
            notes: String::new(),
        }
    }

    #[test]
    fn test_partial_payment_above_due_sends_nothing() {
        let gateway = RecordingGateway::default();
        let order = order(PaymentStatus::Pending, OrderStatus::Ordered);

        let result = block_on(collect_payment(
            &gateway,
            &order,
            &form(PaymentMode::Partial, "1500"),
            now(),
        ));

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(gateway.calls().is_empty());
    }

    #[test]
    fn test_sub_cent_amounts_are_rounded_before_sending() {
        let gateway = RecordingGateway::responding(Value::Null);
        let order = order(PaymentStatus::Pending, OrderStatus::Ordered);

        let over = block_on(collect_payment(
            &gateway,
            &order,
            &form(PaymentMode::Partial, "1000.004"),
            now(),
        ));
        assert!(matches!(over, Err(AppError::Validation(_))));
        assert!(gateway.calls().is_empty());

        let outcome = block_on(collect_payment(
            &gateway,
            &order,
            &form(PaymentMode::Partial, "999.999"),
            now(),
        ))
        .unwrap();
        assert_eq!(outcome.transaction.amount, 1000.0);
        assert_eq!(outcome.order.amount_paid, 1000.0);
        assert_eq!(outcome.order.payment_status, PaymentStatus::Paid);
        assert_eq!(gateway.calls().len(), 1);
    }

    #[test]
    fn test_invalid_amount_sends_nothing() {
        let gateway = RecordingGateway::default();
        let order = order(PaymentStatus::Pending, OrderStatus::Ordered);

        for input in ["", "abc", "0", "-5"] {
            let result = block_on(collect_payment(
                &gateway,
                &order,
                &form(PaymentMode::Partial, input),
                now(),
            ));
            assert!(result.is_err(), "input {input:?} must be rejected");
        }
        assert!(gateway.calls().is_empty());
    }

    #[test]
    fn test_partial_equal_to_due_marks_paid() {
        let gateway = RecordingGateway::responding(json!({ "data": { "id": "TX-9" } }));
        let order = order(PaymentStatus::Pending, OrderStatus::Ordered);

        let outcome = block_on(collect_payment(
            &gateway,
            &order,
            &form(PaymentMode::Partial, "1,000.00"),
            now(),
        ))
        .unwrap();

        assert_eq!(gateway.calls(), vec!["pay 101 1000.00".to_string()]);
        assert_eq!(outcome.order.payment_status, PaymentStatus::Paid);
        assert_eq!(outcome.order.amount_due, 0.0);
        assert_eq!(outcome.transaction.id.as_str(), "TX-9");
        assert_eq!(outcome.order.transactions.len(), 1);
    }

    #[test]
    fn test_full_mode_ignores_input_and_pays_due() {
        let gateway = RecordingGateway::responding(Value::Null);
        let mut order = order(PaymentStatus::Partial, OrderStatus::Ordered);
        order.amount_paid = 400.0;
        order.amount_due = 600.0;

        let outcome = block_on(collect_payment(
            &gateway,
            &order,
            &form(PaymentMode::Full, "not used"),
            now(),
        ))
        .unwrap();

        assert_eq!(outcome.transaction.amount, 600.0);
        assert_eq!(outcome.order.payment_status, PaymentStatus::Paid);
        assert_eq!(
            outcome.transaction.id.as_str(),
            format!("TXN-{}", now().timestamp_millis())
        );
    }

    #[test]
    fn test_server_failure_leaves_order_untouched() {
        let gateway = RecordingGateway::failing(AppError::Server {
            status: 422,
            message: Some("Cash register is closed".to_string()),
        });
        let order = order(PaymentStatus::Pending, OrderStatus::Ordered);

        let err = block_on(collect_payment(
            &gateway,
            &order,
            &form(PaymentMode::Partial, "250"),
            now(),
        ))
        .unwrap_err();

        assert_eq!(err.user_message(), "Cash register is closed");
        assert_eq!(order.amount_due, 1000.0);
    }

    #[test]
    fn test_delete_partial_order_is_blocked_without_request() {
        let gateway = RecordingGateway::default();
        let order = order(PaymentStatus::Partial, OrderStatus::Ordered);

        let result = block_on(delete_order(&gateway, &order));

        assert!(matches!(result, Err(AppError::BusinessRule(_))));
        assert!(gateway.calls().is_empty());
    }

    #[test]
    fn test_delete_received_order_is_blocked() {
        let gateway = RecordingGateway::default();
        let order = order(PaymentStatus::Pending, OrderStatus::Received);

        let err = block_on(delete_order(&gateway, &order)).unwrap_err();
        assert!(err.user_message().contains("received"));
        assert!(gateway.calls().is_empty());
    }

    #[test]
    fn test_delete_unpaid_ordered_order() {
        let gateway = RecordingGateway::default();
        let order = order(PaymentStatus::Pending, OrderStatus::Ordered);

        block_on(delete_order(&gateway, &order)).unwrap();
        assert_eq!(gateway.calls(), vec!["delete_order 101".to_string()]);
    }

    #[test]
    fn test_convert_without_invoice_number_is_error() {
        let gateway = RecordingGateway::responding(json!({ "data": { "id": 55 } }));

        let result = block_on(convert_draft(&gateway, "12", "urgent"));

        assert!(matches!(result, Err(AppError::MalformedResponse(_))));
        assert_eq!(gateway.calls(), vec!["convert 12".to_string()]);
    }

    #[test]
    fn test_convert_success() {
        let gateway = RecordingGateway::responding(json!({
            "message": "Converted",
            "data": { "purchase_order": { "id": 55, "invoice_number": "PO-000055" } }
        }));

        let converted = block_on(convert_draft(&gateway, "12", "")).unwrap();
        assert_eq!(converted.id, "55");
        assert_eq!(converted.invoice_number, "PO-000055");
    }

    #[test]
    fn test_fetch_tab_uses_endpoint_of_tab() {
        let gateway = RecordingGateway::default();
        let mut state = PurchaseListState::new(20);

        let drafts = state.begin_request(PurchaseTab::Drafts, None);
        let progress = state.begin_request(PurchaseTab::Progress, None);

        assert!(matches!(block_on(fetch_tab(&gateway, &drafts)), Ok(TabPage::Drafts(_))));
        assert!(matches!(block_on(fetch_tab(&gateway, &progress)), Ok(TabPage::Orders(_))));
        assert_eq!(
            gateway.calls(),
            vec!["fetch_drafts page=1".to_string(), "fetch_orders scope=progress".to_string()]
        );
    }
}
