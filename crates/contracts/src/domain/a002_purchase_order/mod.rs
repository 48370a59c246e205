pub mod aggregate;
pub mod payment;

pub use aggregate::{
    DeleteBlocked, OrderItem, OrderStatus, PaymentMethod, PaymentStatus, ProductRef,
    PurchaseOrder, Transaction,
};
pub use payment::{
    apply_payment, parse_amount_input, synthesize_transaction, validate_payment_amount, PaymentMode,
    PaymentRequest, PaymentValidationError, AMOUNT_EPSILON,
    from_cents, to_cents,
};
