//! Диалоги подтверждения и сообщений об ошибках (thaw `Dialog`).

use leptos::prelude::*;
use thaw::*;

/// Флаг `open` для thaw `Dialog`, связанный с `Option`-целью:
/// диалог открыт, пока цель задана; закрытие диалога сбрасывает цель.
pub fn open_while_some<T>(target: RwSignal<Option<T>>) -> RwSignal<bool>
where
    T: Send + Sync + 'static,
{
    let open = RwSignal::new(false);
    Effect::new(move |_| {
        open.set(target.with(Option::is_some));
    });
    Effect::new(move |_| {
        if !open.get() && target.with_untracked(Option::is_some) {
            target.set(None);
        }
    });
    open
}

/// Ошибка мутации; закрывается кнопкой OK
#[component]
pub fn ErrorDialog(message: RwSignal<Option<String>>) -> impl IntoView {
    let open = open_while_some(message);

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Something went wrong"</DialogTitle>
                    <DialogContent>
                        <div class="alert alert--error">{move || message.get().unwrap_or_default()}</div>
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| message.set(None)>
                            "OK"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

#[component]
pub fn ConfirmDialog(
    open: RwSignal<bool>,
    #[prop(into)] title: Signal<String>,
    #[prop(into)] message: Signal<String>,
    confirm_label: &'static str,
    on_confirm: Callback<()>,
) -> impl IntoView {
    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>{move || title.get()}</DialogTitle>
                    <DialogContent>{move || message.get()}</DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| open.set(false)>
                            "Cancel"
                        </Button>
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| on_confirm.run(())>
                            {confirm_label}
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
