use crate::config::config;
use crate::shared::api_utils::storage_url;
use crate::shared::components::ui::badge::{Badge, OrderStatusBadge, PaymentStatusBadge};
use crate::shared::date_utils::{format_date, format_datetime};
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;
use crate::shared::money::{format_money, format_quantity};
use contracts::domain::a002_purchase_order::{OrderItem, PurchaseOrder, Transaction};
use leptos::prelude::*;
use thaw::*;

/// Просмотр заказа: позиции, итоги и история платежей
#[component]
pub fn OrderItemsModal(
    order: PurchaseOrder,
    on_close: Callback<()>,
    /// Открыть квитанцию по одному из прошлых платежей
    on_open_receipt: Callback<Transaction>,
) -> impl IntoView {
    let title = format!("Purchase order {}", order.invoice_number);
    let image_base = config().storage.image_base_url.clone();

    let items = order.items.clone();
    let has_transactions = !order.transactions.is_empty();
    let transactions = StoredValue::new(order.transactions.clone());

    view! {
        <ModalFrame title=title on_close=on_close modal_class="order-items-modal">
            <div class="order-summary">
                <div class="order-summary__row">
                    <span class="order-summary__label">"Supplier"</span>
                    <span>{order.supplier_name()}</span>
                </div>
                <div class="order-summary__row">
                    <span class="order-summary__label">"Store"</span>
                    <span>{order.store_name()}</span>
                </div>
                <div class="order-summary__row">
                    <span class="order-summary__label">"Date"</span>
                    <span>{format_date(&order.created_at)}</span>
                </div>
                <div class="order-summary__row">
                    <PaymentStatusBadge status=order.payment_status />
                    <OrderStatusBadge status=order.order_status />
                </div>
            </div>

            <Table attr:class="order-items-table">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Product"</TableHeaderCell>
                        <TableHeaderCell>"Ordered"</TableHeaderCell>
                        <TableHeaderCell>"Received"</TableHeaderCell>
                        <TableHeaderCell>"Unit price"</TableHeaderCell>
                        <TableHeaderCell>"Subtotal"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {items
                        .into_iter()
                        .map(|item| view! { <ItemRow item=item image_base=image_base.clone() /> })
                        .collect_view()}
                </TableBody>
            </Table>

            <div class="order-totals">
                <div>"Grand total: " <strong>{format_money(order.grand_total)}</strong></div>
                <div>"Paid: " <strong>{format_money(order.amount_paid)}</strong></div>
                <div>"Due: " <strong>{format_money(order.amount_due)}</strong></div>
            </div>

            <h3 class="modal-section-title">"Payments"</h3>
            <Show
                when=move || has_transactions
                fallback=|| view! { <div class="empty-state">"No payments recorded yet."</div> }
            >
                <Table attr:class="order-transactions-table">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Receipt No."</TableHeaderCell>
                            <TableHeaderCell>"Date"</TableHeaderCell>
                            <TableHeaderCell>"Method"</TableHeaderCell>
                            <TableHeaderCell>"Amount"</TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {transactions
                            .get_value()
                            .into_iter()
                            .map(|txn| {
                                let for_receipt = txn.clone();
                                view! {
                                    <TableRow>
                                        <TableCell>{txn.id.to_string()}</TableCell>
                                        <TableCell>{format_datetime(&txn.paid_at)}</TableCell>
                                        <TableCell>{txn.payment_method.label()}</TableCell>
                                        <TableCell>{format_money(txn.amount)}</TableCell>
                                        <TableCell>
                                            <Button
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| on_open_receipt.run(for_receipt.clone())
                                            >
                                                {icon("receipt")}
                                                " Receipt"
                                            </Button>
                                        </TableCell>
                                    </TableRow>
                                }
                            })
                            .collect_view()}
                    </TableBody>
                </Table>
            </Show>
        </ModalFrame>
    }
}

#[component]
fn ItemRow(item: OrderItem, image_base: String) -> impl IntoView {
    let image = item
        .product
        .as_ref()
        .and_then(|p| p.image.as_deref())
        .filter(|path| !path.trim().is_empty())
        .map(|path| storage_url(&image_base, path));
    let sku = item.product.as_ref().and_then(|p| p.sku.clone());
    let display_name = item.display_name();
    let variant = item.variant.clone();
    let is_new_product = item.is_new_product();

    view! {
        <TableRow>
            <TableCell>
                <TableCellLayout>
                    <div class="order-item">
                        {match image {
                            Some(src) => view! { <img class="order-item__image" src=src alt="" /> }.into_any(),
                            None => view! { <div class="order-item__image order-item__image--empty"></div> }.into_any(),
                        }}
                        <div>
                            <div class="order-item__name">{display_name}</div>
                            {variant.map(|v| view! { <div class="order-item__variant">{v}</div> })}
                            {sku.map(|s| view! { <div class="order-item__sku">{s}</div> })}
                            {is_new_product.then(|| view! {
                                <Badge variant="warning".to_string()>"New product"</Badge>
                            })}
                        </div>
                    </div>
                </TableCellLayout>
            </TableCell>
            <TableCell>{format_quantity(item.quantity_ordered)}</TableCell>
            <TableCell>{format_quantity(item.quantity_received)}</TableCell>
            <TableCell>{format_money(item.unit_price)}</TableCell>
            <TableCell>{format_money(item.subtotal())}</TableCell>
        </TableRow>
    }
}
