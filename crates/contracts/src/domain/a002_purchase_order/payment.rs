//! Приём оплаты по заказу поставщику: валидация суммы до запроса
//! и локальный (оптимистичный) пересчёт заказа после успешного ответа.

use super::aggregate::{PaymentMethod, PaymentStatus, PurchaseOrder, Transaction};
use crate::domain::common::EntityId;
use crate::shared::response::{nested_object, optional_field, unwrap_data};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Точность сравнения денежных сумм (полкопейки)
pub const AMOUNT_EPSILON: f64 = 0.005;

/// Погрешность f64 при сравнении уже округлённых сумм
const CENT_NOISE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    /// Пользователь вводит сумму сам
    Partial,
    /// Сумма зафиксирована и равна остатку долга
    Full,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub mode: PaymentMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PaymentValidationError {
    #[error("Enter a valid amount")]
    NotANumber,
    #[error("Amount must be greater than zero")]
    NotPositive,
    #[error("Amount cannot exceed the amount due ({due:.2})")]
    ExceedsDue { due: f64 },
    #[error("This order has nothing left to pay")]
    NothingDue,
}

/// Проверка суммы до отправки запроса.
///
/// В режиме `Full` сумма всегда равна остатку, введённое значение игнорируется.
/// Возвращается сумма, округлённая до копеек: именно она уходит на сервер.
/// Сумма больше остатка отклоняется даже на долю копейки.
pub fn validate_payment_amount(
    order: &PurchaseOrder,
    mode: PaymentMode,
    entered: f64,
) -> Result<f64, PaymentValidationError> {
    let due_cents = to_cents(order.amount_due);
    if due_cents <= 0 {
        return Err(PaymentValidationError::NothingDue);
    }
    let due = from_cents(due_cents);

    let amount = match mode {
        PaymentMode::Full => due,
        PaymentMode::Partial => entered,
    };

    if !amount.is_finite() {
        return Err(PaymentValidationError::NotANumber);
    }
    if amount > due + CENT_NOISE {
        return Err(PaymentValidationError::ExceedsDue { due });
    }
    let cents = to_cents(amount);
    if cents <= 0 {
        return Err(PaymentValidationError::NotPositive);
    }
    if cents > due_cents {
        return Err(PaymentValidationError::ExceedsDue { due });
    }

    Ok(from_cents(cents))
}

/// Разобрать строку из поля ввода ("1,250.50" тоже допустимо)
pub fn parse_amount_input(input: &str) -> f64 {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    cleaned.parse::<f64>().unwrap_or(f64::NAN)
}

/// Локальный снимок заказа после оплаты.
///
/// Сервер остаётся источником истины: снимок живёт до следующей загрузки списка.
pub fn apply_payment(order: &PurchaseOrder, txn: &Transaction) -> PurchaseOrder {
    let mut next = order.clone();
    next.amount_paid = round2(order.amount_paid + txn.amount);

    let due = round2(order.grand_total - next.amount_paid);
    next.amount_due = if due <= AMOUNT_EPSILON { 0.0 } else { due };

    next.payment_status = if next.amount_due <= AMOUNT_EPSILON {
        PaymentStatus::Paid
    } else if next.amount_paid > AMOUNT_EPSILON {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Pending
    };

    next.transactions.push(txn.clone());
    next
}

/// Запись о платеже для квитанции.
///
/// id берётся из ответа (`id`, `transaction_id` или `transaction.id`),
/// иначе строится из времени: `TXN-<unix millis>`.
pub fn synthesize_transaction(
    response: Value,
    request: &PaymentRequest,
    now: DateTime<Utc>,
) -> Transaction {
    let body = unwrap_data(response);
    let source = nested_object(&body, &["transaction", "payment"]).unwrap_or(&body);

    let id = optional_field(source, "id")
        .or_else(|| optional_field(&body, "transaction_id"))
        .unwrap_or_else(|| format!("TXN-{}", now.timestamp_millis()));

    let paid_at = optional_field(source, "paid_at").unwrap_or_else(|| now.to_rfc3339());

    Transaction {
        id: EntityId::new(id),
        amount: request.amount,
        payment_method: request.payment_method,
        paid_at,
        notes: request.notes.clone(),
    }
}

fn round2(value: f64) -> f64 {
    from_cents(to_cents(value))
}

/// Сумма в целых копейках (половина округляется от нуля)
pub fn to_cents(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

pub fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_purchase_order::aggregate::tests::sample_order;
    use crate::domain::a002_purchase_order::aggregate::OrderStatus;
    use chrono::TimeZone;
    use serde_json::json;

    fn request(amount: f64) -> PaymentRequest {
        PaymentRequest {
            amount,
            payment_method: PaymentMethod::Cash,
            mode: PaymentMode::Partial,
            notes: None,
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_partial_over_due_rejected() {
        let order = sample_order(PaymentStatus::Pending, OrderStatus::Ordered);
        assert_eq!(
            validate_payment_amount(&order, PaymentMode::Partial, 1000.01),
            Err(PaymentValidationError::ExceedsDue { due: 1000.0 })
        );
    }

    #[test]
    fn test_sub_cent_over_due_rejected() {
        let order = sample_order(PaymentStatus::Pending, OrderStatus::Ordered);
        assert_eq!(
            validate_payment_amount(&order, PaymentMode::Partial, 1000.004),
            Err(PaymentValidationError::ExceedsDue { due: 1000.0 })
        );
    }

    #[test]
    fn test_amount_rounded_to_cents_before_sending() {
        let order = sample_order(PaymentStatus::Pending, OrderStatus::Ordered);
        let amount = validate_payment_amount(&order, PaymentMode::Partial, 999.999).unwrap();
        assert_eq!(amount, 1000.0);

        let amount = validate_payment_amount(&order, PaymentMode::Partial, 250.555).unwrap();
        assert_eq!(to_cents(amount), 25056);

        // снимок считается от той же суммы, что ушла на сервер
        let rounded = validate_payment_amount(&order, PaymentMode::Partial, 999.994).unwrap();
        assert_eq!(rounded, 999.99);
        let txn = synthesize_transaction(json!({}), &request(rounded), fixed_now());
        let snapshot = apply_payment(&order, &txn);
        assert_eq!(snapshot.payment_status, PaymentStatus::Partial);
        assert_eq!(snapshot.amount_due, 0.01);
    }

    #[test]
    fn test_below_one_cent_is_not_positive() {
        let order = sample_order(PaymentStatus::Pending, OrderStatus::Ordered);
        assert_eq!(
            validate_payment_amount(&order, PaymentMode::Partial, 0.004),
            Err(PaymentValidationError::NotPositive)
        );
    }

    #[test]
    fn test_zero_negative_and_nan_rejected() {
        let order = sample_order(PaymentStatus::Pending, OrderStatus::Ordered);
        assert_eq!(
            validate_payment_amount(&order, PaymentMode::Partial, 0.0),
            Err(PaymentValidationError::NotPositive)
        );
        assert_eq!(
            validate_payment_amount(&order, PaymentMode::Partial, -5.0),
            Err(PaymentValidationError::NotPositive)
        );
        assert_eq!(
            validate_payment_amount(&order, PaymentMode::Partial, f64::NAN),
            Err(PaymentValidationError::NotANumber)
        );
    }

    #[test]
    fn test_full_mode_ignores_input() {
        let order = sample_order(PaymentStatus::Pending, OrderStatus::Ordered);
        assert_eq!(validate_payment_amount(&order, PaymentMode::Full, 0.0), Ok(1000.0));
    }

    #[test]
    fn test_nothing_due() {
        let mut order = sample_order(PaymentStatus::Paid, OrderStatus::Received);
        order.amount_due = 0.0;
        assert_eq!(
            validate_payment_amount(&order, PaymentMode::Full, 0.0),
            Err(PaymentValidationError::NothingDue)
        );
    }

    #[test]
    fn test_partial_equal_to_due_becomes_paid() {
        let order = sample_order(PaymentStatus::Pending, OrderStatus::Ordered);
        let amount = validate_payment_amount(&order, PaymentMode::Partial, 1000.0).unwrap();
        let txn = synthesize_transaction(json!({}), &request(amount), fixed_now());
        let snapshot = apply_payment(&order, &txn);

        assert_eq!(snapshot.payment_status, PaymentStatus::Paid);
        assert_eq!(snapshot.amount_due, 0.0);
        assert_eq!(snapshot.amount_paid, 1000.0);
        assert_eq!(snapshot.transactions.len(), 1);
        // исходный заказ не изменился
        assert_eq!(order.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn test_partial_payment_becomes_partial() {
        let order = sample_order(PaymentStatus::Pending, OrderStatus::Ordered);
        let txn = synthesize_transaction(json!({}), &request(250.5), fixed_now());
        let snapshot = apply_payment(&order, &txn);

        assert_eq!(snapshot.payment_status, PaymentStatus::Partial);
        assert_eq!(snapshot.amount_due, 749.5);
    }

    #[test]
    fn test_transaction_id_sources() {
        let now = fixed_now();

        let from_data = synthesize_transaction(json!({ "data": { "id": 77 } }), &request(1.0), now);
        assert_eq!(from_data.id.as_str(), "77");

        let nested = synthesize_transaction(
            json!({ "transaction": { "id": "T-5", "paid_at": "2024-03-15T11:00:00Z" } }),
            &request(1.0),
            now,
        );
        assert_eq!(nested.id.as_str(), "T-5");
        assert_eq!(nested.paid_at, "2024-03-15T11:00:00Z");

        let fallback = synthesize_transaction(json!({ "success": true }), &request(1.0), now);
        assert_eq!(fallback.id.as_str(), format!("TXN-{}", now.timestamp_millis()));
        assert_eq!(fallback.paid_at, now.to_rfc3339());
    }

    #[test]
    fn test_parse_amount_input() {
        assert_eq!(parse_amount_input("1,250.50"), 1250.5);
        assert_eq!(parse_amount_input(" 300 "), 300.0);
        assert!(parse_amount_input("abc").is_nan());
        assert!(parse_amount_input("").is_nan());
    }
}
