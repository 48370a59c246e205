use crate::domain::common::party_ref::supplier_display_name;
use crate::domain::common::{EntityId, PartyRef};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Статус оплаты заказа поставщику
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Ничего не оплачено (backend иногда пишет "unpaid")
    #[serde(alias = "unpaid")]
    Pending,
    Partial,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Paid => "paid",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Unpaid",
            PaymentStatus::Partial => "Partial",
            PaymentStatus::Paid => "Paid",
        }
    }
}

/// Статус исполнения заказа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Ordered,
    Received,
    #[serde(alias = "partially_received")]
    Partial,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Ordered => "ordered",
            OrderStatus::Received => "received",
            OrderStatus::Partial => "partial",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Ordered => "Ordered",
            OrderStatus::Received => "Received",
            OrderStatus::Partial => "Partially received",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Bank,
    Card,
    MobileBanking,
    Cheque,
    #[serde(other)]
    Other,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 6] = [
        PaymentMethod::Cash,
        PaymentMethod::Bank,
        PaymentMethod::Card,
        PaymentMethod::MobileBanking,
        PaymentMethod::Cheque,
        PaymentMethod::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Bank => "bank",
            PaymentMethod::Card => "card",
            PaymentMethod::MobileBanking => "mobile_banking",
            PaymentMethod::Cheque => "cheque",
            PaymentMethod::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Bank => "Bank transfer",
            PaymentMethod::Card => "Card",
            PaymentMethod::MobileBanking => "Mobile banking",
            PaymentMethod::Cheque => "Cheque",
            PaymentMethod::Other => "Other",
        }
    }

    pub fn from_code(code: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == code)
            .unwrap_or(PaymentMethod::Other)
    }
}

/// Платёж по заказу. После создания не меняется.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: EntityId,
    pub amount: f64,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub paid_at: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    /// Относительный путь в хранилище
    #[serde(default)]
    pub image: Option<String>,
}

/// Строка заказа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: EntityId,
    /// None = новый товар, которого ещё нет в каталоге
    #[serde(default)]
    pub product: Option<ProductRef>,
    #[serde(default)]
    pub new_product_name: Option<String>,
    #[serde(default)]
    pub variant: Option<String>,
    pub quantity_ordered: f64,
    #[serde(default)]
    pub quantity_received: f64,
    pub unit_price: f64,
    #[serde(default)]
    pub subtotal: Option<f64>,
}

impl OrderItem {
    pub fn is_new_product(&self) -> bool {
        self.product.is_none()
    }

    pub fn display_name(&self) -> String {
        match (&self.product, &self.new_product_name) {
            (Some(p), _) => p.name.clone(),
            (None, Some(name)) if !name.trim().is_empty() => name.clone(),
            _ => "Unnamed product".to_string(),
        }
    }

    /// Сумма строки; если сервер её не прислал, считаем сами
    pub fn subtotal(&self) -> f64 {
        self.subtotal
            .unwrap_or(self.quantity_ordered * self.unit_price)
    }
}

/// Заказ поставщику
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: EntityId,
    pub invoice_number: String,
    #[serde(default)]
    pub supplier: Option<PartyRef>,
    #[serde(default)]
    pub store: Option<PartyRef>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub grand_total: f64,
    #[serde(default)]
    pub amount_paid: f64,
    pub amount_due: f64,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub note: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Причина, по которой заказ нельзя удалить
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeleteBlocked {
    #[error("payment status is \"{0}\"; only unpaid orders can be deleted")]
    PaymentRecorded(&'static str),
    #[error("order status is \"{0}\"; only orders in \"ordered\" status can be deleted")]
    OrderProgressed(&'static str),
    #[error("payment status is \"{payment}\" and order status is \"{order}\"; only unpaid orders in \"ordered\" status can be deleted")]
    Both {
        payment: &'static str,
        order: &'static str,
    },
}

impl PurchaseOrder {
    pub fn supplier_name(&self) -> String {
        supplier_display_name(self.supplier.as_ref())
    }

    pub fn store_name(&self) -> String {
        self.store
            .as_ref()
            .map(|s| s.name.clone())
            .unwrap_or_else(|| "—".to_string())
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_settled(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }

    /// Клиентская проверка перед удалением; сервер проверяет то же самое
    pub fn deletion_check(&self) -> Result<(), DeleteBlocked> {
        let payment_ok = self.payment_status == PaymentStatus::Pending;
        let order_ok = self.order_status == OrderStatus::Ordered;

        match (payment_ok, order_ok) {
            (true, true) => Ok(()),
            (false, true) => Err(DeleteBlocked::PaymentRecorded(self.payment_status.as_str())),
            (true, false) => Err(DeleteBlocked::OrderProgressed(self.order_status.as_str())),
            (false, false) => Err(DeleteBlocked::Both {
                payment: self.payment_status.as_str(),
                order: self.order_status.as_str(),
            }),
        }
    }
}
