use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

/// Modal frame: overlay, positioned surface and a compact header with a close button.
///
/// Закрывается по Escape, по клику на оверлей и по кнопке. Пока `busy` = true
/// (идёт запрос), закрыть окно нельзя.
#[component]
pub fn ModalFrame(
    /// Заголовок окна
    #[prop(into)]
    title: Signal<String>,
    /// Called when the modal should close.
    on_close: Callback<()>,
    /// Блокирует закрытие, пока выполняется запрос
    #[prop(optional, into)]
    busy: MaybeProp<bool>,
    /// z-index for overlay stacking (default: 1000).
    #[prop(optional)]
    z_index: Option<i32>,
    /// Extra class for the modal surface (`div.modal`).
    #[prop(optional)]
    modal_class: Option<&'static str>,
    /// Кнопки действий в заголовке (Print, Download ...)
    #[prop(optional)]
    header_actions: Option<ChildrenFn>,
    children: Children,
) -> impl IntoView {
    let z_index = z_index.unwrap_or(1000);
    let overlay_mouse_down = RwSignal::new(false);

    let request_close = move || {
        if busy.get_untracked().unwrap_or(false) {
            return;
        }
        // Defer close to next tick: the overlay must not be removed during its own click dispatch.
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            on_close.run(());
        });
    };

    // Escape закрывает окно; слушатель снимается вместе с компонентом.
    // Closure не `Send`, в CSR её можно держать в локальном StoredValue.
    let keydown = Closure::wrap(Box::new(move |event: web_sys::Event| {
        if let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() {
            if keyboard_event.key() == "Escape" {
                request_close();
            }
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web_sys::window() {
        let _ = window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
    }
    let keydown = StoredValue::new_local(keydown);
    on_cleanup(move || {
        if let Some(window) = web_sys::window() {
            keydown.with_value(|closure| {
                let _ = window.remove_event_listener_with_callback(
                    "keydown",
                    closure.as_ref().unchecked_ref(),
                );
            });
        }
    });

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    // Close only if both press and release happened on the overlay itself
    // (text selection that ends outside the surface must not close the modal).
    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close = overlay_mouse_down.get() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            request_close();
        }
    };

    let surface_class = match modal_class {
        Some(cls) => format!("modal {cls}"),
        None => "modal".to_string(),
    };

    view! {
        <div
            class="modal-overlay"
            style=format!("z-index: {z_index};")
            on:mousedown=handle_overlay_mouse_down
            on:click=handle_overlay_click
        >
            <div class=surface_class style="position: relative;" on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{move || title.get()}</h2>
                    <div class="modal-header-actions">
                        {header_actions.as_ref().map(|actions| actions())}
                        <button
                            class="button button--icon modal__close"
                            disabled=move || busy.get().unwrap_or(false)
                            on:click=move |_| request_close()
                        >
                            {icon("x")}
                        </button>
                    </div>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}
