use contracts::domain::a001_purchase_draft::DraftStatus;
use contracts::domain::a002_purchase_order::{OrderStatus, PaymentStatus};
use leptos::prelude::*;

/// Badge component with different variants
#[component]
pub fn Badge(
    /// Badge variant: "primary", "success", "warning", "error", "neutral" (default)
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    /// Badge content
    children: Children,
    /// Additional CSS classes
    #[prop(optional, into)]
    class: MaybeProp<String>,
) -> impl IntoView {
    let variant_class = move || badge_variant_class(variant.get().as_deref().unwrap_or("neutral"));
    let additional_class = move || class.get().unwrap_or_default();

    view! {
        <span class=move || format!("badge {} {}", variant_class(), additional_class())>
            {children()}
        </span>
    }
}

fn badge_variant_class(variant: &str) -> &'static str {
    match variant {
        "primary" => "badge--primary",
        "success" => "badge--success",
        "warning" => "badge--warning",
        "error" => "badge--error",
        _ => "badge--neutral",
    }
}

pub fn payment_status_variant(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Paid => "success",
        PaymentStatus::Partial => "warning",
        PaymentStatus::Pending => "error",
    }
}

pub fn order_status_variant(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Received => "success",
        OrderStatus::Partial => "warning",
        OrderStatus::Ordered => "primary",
        OrderStatus::Cancelled => "neutral",
    }
}

pub fn draft_status_variant(status: DraftStatus) -> &'static str {
    match status {
        DraftStatus::Pending => "warning",
        DraftStatus::Preparing => "primary",
        DraftStatus::Draft => "neutral",
    }
}

/// Бейдж статуса оплаты заказа
#[component]
pub fn PaymentStatusBadge(status: PaymentStatus) -> impl IntoView {
    view! {
        <span class=format!("badge badge--status {}", badge_variant_class(payment_status_variant(status)))>
            {status.label()}
        </span>
    }
}

/// Бейдж статуса поставки
#[component]
pub fn OrderStatusBadge(status: OrderStatus) -> impl IntoView {
    view! {
        <span class=format!("badge badge--status {}", badge_variant_class(order_status_variant(status)))>
            {status.label()}
        </span>
    }
}

#[component]
pub fn DraftStatusBadge(status: DraftStatus) -> impl IntoView {
    view! {
        <span class=format!("badge badge--status {}", badge_variant_class(draft_status_variant(status)))>
            {status.label()}
        </span>
    }
}
