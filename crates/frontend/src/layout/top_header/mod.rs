//! TopHeader component - application top bar.
//!
//! Contains:
//! - Application title
//! - Store selector (shared across screens via AppGlobalContext)

use crate::layout::global_context::AppGlobalContext;
use crate::layout::stores_api::fetch_stores;
use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    // Список магазинов грузится один раз при старте
    ctx.stores_loading.set(true);
    spawn_local(async move {
        match fetch_stores().await {
            Ok(stores) => {
                log::debug!("Loaded {} stores", stores.len());
                ctx.set_stores(stores);
            }
            Err(e) => log::warn!("Failed to load stores: {}", e),
        }
        ctx.stores_loading.set(false);
    });

    let selected_id = move || ctx.current_store_id().unwrap_or_default();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                {icon("purchases")}
                <span class="top-header__title">"Purchases"</span>
            </div>

            <div class="top-header__actions">
                <label class="top-header__store">
                    {icon("store")}
                    <select
                        class="top-header__store-select"
                        disabled=move || ctx.stores_loading.get()
                        prop:value=selected_id
                        on:change=move |ev| ctx.select_store(&event_target_value(&ev))
                    >
                        <option value="">"All stores"</option>
                        <For
                            each=move || ctx.stores.get()
                            key=|store| store.id.to_string()
                            children=move |store| {
                                let id = store.id.to_string();
                                let is_selected = {
                                    let id = id.clone();
                                    move || selected_id() == id
                                };
                                view! {
                                    <option value=id selected=is_selected>{store.name}</option>
                                }
                            }
                        />
                    </select>
                </label>
            </div>
        </div>
    }
}
