use crate::shared::components::table_cells::{supplier_link, SortableHeaderCell};
use crate::shared::components::ui::badge::{Badge, DraftStatusBadge};
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::list_utils::SortState;
use crate::shared::money::{format_money, format_quantity};
use contracts::domain::a001_purchase_draft::PurchaseDraft;
use contracts::domain::common::PartyRef;
use leptos::prelude::*;
use thaw::*;

/// Таблица черновиков закупок
#[component]
pub fn DraftTable(
    #[prop(into)] rows: Signal<Vec<PurchaseDraft>>,
    #[prop(into)] sort: Signal<SortState>,
    on_sort: Callback<&'static str>,
    /// Клик по поставщику фильтрует вкладку по нему
    on_supplier: Callback<PartyRef>,
    on_convert: Callback<PurchaseDraft>,
    on_delete: Callback<PurchaseDraft>,
    /// Id черновика, над которым выполняется действие
    #[prop(into)]
    busy_id: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="table-wrapper">
            <Table attr:class="purchase-table purchase-table--drafts" attr:style="width: 100%; min-width: 900px;">
                <TableHeader>
                    <TableRow>
                        <SortableHeaderCell label="Reference" field="reference" sort=sort on_sort=on_sort min_width=140.0 />
                        <SortableHeaderCell label="Date" field="created_at" sort=sort on_sort=on_sort min_width=110.0 />
                        <SortableHeaderCell label="Supplier" field="supplier" sort=sort on_sort=on_sort min_width=200.0 />
                        <TableHeaderCell resizable=false min_width=90.0>"Items"</TableHeaderCell>
                        <SortableHeaderCell label="Estimated total" field="estimated_total" sort=sort on_sort=on_sort min_width=140.0 align="right" />
                        <TableHeaderCell resizable=false min_width=100.0>"Status"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=200.0>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>

                <TableBody>
                    <For
                        each=move || rows.get()
                        key=|draft| (draft.id.to_string(), draft.updated_at.clone())
                        children=move |draft| {
                            let id = draft.id.to_string();
                            let is_busy = Signal::derive(move || busy_id.get().as_deref() == Some(id.as_str()));
                            let for_convert = draft.clone();
                            let for_delete = draft.clone();
                            let new_products = draft.items.new_product_count;
                            let created_date = format_date(&draft.created_at);
                            let supplier = draft.supplier.clone();
                            let supplier_name = draft.supplier_name();

                            view! {
                                <TableRow>
                                    <TableCell>
                                        <TableCellLayout truncate=true>{draft.reference.clone()}</TableCellLayout>
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
                                        <TableCellLayout>
                                            <span style="font-variant-numeric: tabular-nums;">
                                                {format!(
                                                    "{} ({} pcs)",
                                                    draft.items.item_count,
                                                    format_quantity(draft.items.total_quantity)
                                                )}
                                            </span>
                                            {(new_products > 0).then(|| view! {
                                                <Badge variant="warning".to_string()>
                                                    {format!("{} new", new_products)}
                                                </Badge>
                                            })}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            <span style="font-variant-numeric: tabular-nums;">
                                                {format_money(draft.estimated_total)}
                                            </span>
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <DraftStatusBadge status=draft.status />
                                    </TableCell>
                                    <TableCell>
                                        <div class="table__actions">
                                            <Button
                                                appearance=ButtonAppearance::Primary
                                                size=ButtonSize::Small
                                                on_click=move |_| on_convert.run(for_convert.clone())
                                                disabled=is_busy
                                            >
                                                {icon("convert")}
                                                " Convert"
                                            </Button>
                                            <Button
                                                appearance=ButtonAppearance::Subtle
                                                size=ButtonSize::Small
                                                on_click=move |_| on_delete.run(for_delete.clone())
                                                disabled=is_busy
                                                attr:title="Delete draft"
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
