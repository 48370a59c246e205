use leptos::prelude::*;

/// Строки-заглушки, пока вкладка загружается впервые
#[component]
pub fn TableSkeleton(
    /// Количество колонок таблицы
    columns: usize,
    #[prop(optional)] rows: Option<usize>,
) -> impl IntoView {
    let rows = rows.unwrap_or(5);

    view! {
        <div class="table-skeleton" aria-busy="true">
            {(0..rows)
                .map(|_| {
                    view! {
                        <div class="table-skeleton__row">
                            {(0..columns)
                                .map(|_| view! { <span class="table-skeleton__cell"></span> })
                                .collect_view()}
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
