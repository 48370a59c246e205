use crate::shared::icons::icon;
use leptos::prelude::*;

/// Карточка показателя над таблицей (количество, суммы по вкладке)
#[component]
pub fn StatCard(
    /// Label displayed above the value
    label: &'static str,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// Уже отформатированное значение; None = нет данных
    #[prop(into)]
    value: Signal<Option<String>>,
    /// Visual accent: "success", "warning", "error" or empty
    #[prop(optional)]
    accent: &'static str,
) -> impl IntoView {
    let class = if accent.is_empty() {
        "stat-card".to_string()
    } else {
        format!("stat-card stat-card--{accent}")
    };

    view! {
        <div class=class>
            <div class="stat-card__header">
                <span class="stat-card__icon">{icon(icon_name)}</span>
                <span class="stat-card__label">{label}</span>
            </div>
            <div class="stat-card__value">
                {move || value.get().unwrap_or_else(|| "—".to_string())}
            </div>
        </div>
    }
}
