use crate::shared::list_utils::{get_sort_class, get_sort_indicator, SortState};
use contracts::domain::common::PartyRef;
use leptos::prelude::*;
use thaw::*;

/// Заголовок колонки с сортировкой по клику (▲▼)
#[component]
pub fn SortableHeaderCell(
    /// Текст заголовка
    label: &'static str,
    /// Поле сортировки, как его понимает backend
    field: &'static str,
    #[prop(into)] sort: Signal<SortState>,
    on_sort: Callback<&'static str>,
    /// Минимальная ширина колонки
    #[prop(optional, default = 100.0)]
    min_width: f64,
    /// Выравнивание заголовка (left/right)
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView {
    let header_style = if align == "right" {
        "cursor: pointer; justify-content: flex-end; padding-right: 12px;"
    } else {
        "cursor: pointer; padding-right: 12px;"
    };

    view! {
        <TableHeaderCell resizable=false min_width=min_width>
            <div class="table__sortable-header" style=header_style on:click=move |_| on_sort.run(field)>
                {label}
                <span class=move || sort.with(|s| get_sort_class(&s.field, field))>
                    {move || sort.with(|s| get_sort_indicator(&s.field, field, s.direction))}
                </span>
            </div>
        </TableHeaderCell>
    }
}

/// Имя поставщика как ссылка-фильтр; "Walk-in" остаётся текстом
pub fn supplier_link(
    supplier: Option<PartyRef>,
    display_name: String,
    on_supplier: Callback<PartyRef>,
) -> AnyView {
    match supplier {
        Some(party) => view! {
            <a
                href="#"
                class="table__link table__link--muted"
                title="Show only this supplier"
                on:click=move |e| {
                    e.prevent_default();
                    on_supplier.run(party.clone());
                }
            >
                {display_name}
            </a>
        }
        .into_any(),
        None => view! { <span>{display_name}</span> }.into_any(),
    }
}
