use crate::shared::components::table_cells::{supplier_link, SortableHeaderCell};
use crate::shared::components::ui::badge::{OrderStatusBadge, PaymentStatusBadge};
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::list_utils::SortState;
use crate::shared::money::format_money;
use contracts::domain::a002_purchase_order::{PaymentMode, PurchaseOrder};
use contracts::domain::common::PartyRef;
use leptos::prelude::*;
use thaw::*;

/// Таблица заказов (вкладки New / In progress / Completed)
#[component]
pub fn OrderTable(
    #[prop(into)] rows: Signal<Vec<PurchaseOrder>>,
    #[prop(into)] sort: Signal<SortState>,
    on_sort: Callback<&'static str>,
    /// Клик по поставщику фильтрует вкладку по нему
    on_supplier: Callback<PartyRef>,
    on_view: Callback<PurchaseOrder>,
    on_pay: Callback<(PurchaseOrder, PaymentMode)>,
    on_delete: Callback<PurchaseOrder>,
    #[prop(into)] busy_id: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="table-wrapper">
            <Table attr:class="purchase-table purchase-table--orders" attr:style="width: 100%; min-width: 1100px;">
                <TableHeader>
                    <TableRow>
                        <SortableHeaderCell label="Invoice" field="invoice_number" sort=sort on_sort=on_sort min_width=130.0 />
                        <SortableHeaderCell label="Date" field="created_at" sort=sort on_sort=on_sort min_width=110.0 />
                        <SortableHeaderCell label="Supplier" field="supplier" sort=sort on_sort=on_sort min_width=180.0 />
                        <TableHeaderCell resizable=false min_width=70.0>"Items"</TableHeaderCell>
                        <SortableHeaderCell label="Total" field="grand_total" sort=sort on_sort=on_sort min_width=120.0 align="right" />
                        <SortableHeaderCell label="Paid" field="amount_paid" sort=sort on_sort=on_sort min_width=120.0 align="right" />
                        <SortableHeaderCell label="Due" field="amount_due" sort=sort on_sort=on_sort min_width=120.0 align="right" />
                        <TableHeaderCell resizable=false min_width=90.0>"Payment"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=120.0>"Status"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=220.0>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>

                <TableBody>
                    <For
                        each=move || rows.get()
                        // amount_paid в ключе: после оплаты строка перерисовывается
                        key=|order| (order.id.to_string(), order.amount_paid.to_bits(), order.order_status)
                        children=move |order| {
                            let id = order.id.to_string();
                            let is_busy = Signal::derive(move || busy_id.get().as_deref() == Some(id.as_str()));
                            let settled = order.is_settled();
                            let delete_hint = match order.deletion_check() {
                                Ok(()) => "Delete order".to_string(),
                                Err(reason) => format!("Cannot delete: {}", reason),
                            };
                            let for_view = order.clone();
                            let for_invoice = order.clone();
                            let for_pay = order.clone();
                            let for_full = order.clone();
                            let for_delete = order.clone();
                            let created_date = format_date(&order.created_at);
                            let supplier = order.supplier.clone();
                            let supplier_name = order.supplier_name();
                            let item_count = order.item_count();

                            view! {
                                <TableRow>
                                    <TableCell>
                                        <TableCellLayout truncate=true>
                                            <a
                                                href="#"
                                                class="table__link"
                                                on:click=move |e| {
                                                    e.prevent_default();
                                                    on_view.run(for_invoice.clone());
                                                }
                                            >
                                                {order.invoice_number.clone()}
                                            </a>
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{created_date}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>
                                            {supplier_link(supplier, supplier_name, on_supplier)}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{item_count}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            <span style="font-variant-numeric: tabular-nums;">{format_money(order.grand_total)}</span>
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            <span style="font-variant-numeric: tabular-nums;">{format_money(order.amount_paid)}</span>
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            <span style="font-variant-numeric: tabular-nums;">{format_money(order.amount_due)}</span>
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <PaymentStatusBadge status=order.payment_status />
                                    </TableCell>
                                    <TableCell>
                                        <OrderStatusBadge status=order.order_status />
                                    </TableCell>
                                    <TableCell>
                                        <div class="table__actions">
                                            <Button
                                                appearance=ButtonAppearance::Subtle
                                                size=ButtonSize::Small
                                                on_click=move |_| on_view.run(for_view.clone())
                                                attr:title="View items"
                                            >
                                                {icon("eye")}
                                            </Button>
                                            <Show when=move || !settled>
                                                {
                                                    let for_pay = for_pay.clone();
                                                    let for_full = for_full.clone();
                                                    view! {
                                                        <Button
                                                            appearance=ButtonAppearance::Secondary
                                                            size=ButtonSize::Small
                                                            on_click=move |_| on_pay.run((for_pay.clone(), PaymentMode::Partial))
                                                            disabled=is_busy
                                                        >
                                                            {icon("payments")}
                                                            " Pay"
                                                        </Button>
                                                        <Button
                                                            appearance=ButtonAppearance::Primary
                                                            size=ButtonSize::Small
                                                            on_click=move |_| on_pay.run((for_full.clone(), PaymentMode::Full))
                                                            disabled=is_busy
                                                        >
                                                            "Pay in full"
                                                        </Button>
                                                    }
                                                }
                                            </Show>
                                            <Button
                                                appearance=ButtonAppearance::Subtle
                                                size=ButtonSize::Small
                                                on_click=move |_| on_delete.run(for_delete.clone())
                                                disabled=is_busy
                                                attr:title=delete_hint
                                            >
                                                {icon("trash")}
                                            </Button>
                                        </div>
                                    </TableCell>
                                </TableRow>
                            }
                        }
                    />
                </TableBody>
            </Table>
        </div>
    }
}
