use crate::domain::a002_purchase_order::ui::list::PurchaseList;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::Shell;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new());

    view! {
        <Shell center=|| view! { <PurchaseList /> }.into_any() />
    }
}
