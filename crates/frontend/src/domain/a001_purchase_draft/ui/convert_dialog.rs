use crate::domain::a002_purchase_order::api::HttpGateway;
use crate::domain::a002_purchase_order::workflow::convert_draft;
use crate::shared::dialogs::open_while_some;
use crate::shared::errors::AppError;
use crate::shared::money::format_money;
use contracts::domain::a001_purchase_draft::{ConvertedOrder, PurchaseDraft};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Подтверждение конвертации черновика в заказ поставщику.
///
/// Открыт, пока `target` содержит черновик.
#[component]
pub fn ConvertDraftDialog(
    target: RwSignal<Option<PurchaseDraft>>,
    /// (id черновика, созданный заказ)
    on_converted: Callback<(String, ConvertedOrder)>,
    on_failed: Callback<AppError>,
) -> impl IntoView {
    let open = open_while_some(target);
    let note = RwSignal::new(String::new());
    let saving = RwSignal::new(false);

    // Новый черновик: пустое примечание
    Effect::new(move |_| {
        if target.with(|t| t.is_some()) {
            note.set(String::new());
        }
    });

    let convert = move || {
        let Some(draft) = target.get_untracked() else {
            return;
        };
        if saving.get_untracked() {
            return;
        }
        saving.set(true);
        let note_value = note.get_untracked();

        spawn_local(async move {
            let draft_id = draft.id.to_string();
            let result = convert_draft(&HttpGateway, &draft_id, &note_value).await;
            saving.set(false);
            target.set(None);
            match result {
                Ok(converted) => on_converted.run((draft_id, converted)),
                Err(e) => on_failed.run(e),
            }
        });
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Convert draft to purchase order"</DialogTitle>
                    <DialogContent>
                        {move || target.get().map(|draft| view! {
                            <div class="convert-summary">
                                <div>"Draft: " <strong>{draft.reference.clone()}</strong></div>
                                <div>"Supplier: " {draft.supplier_name()}</div>
                                <div>"Items: " {draft.items.item_count}</div>
                                <div>"Estimated total: " {format_money(draft.estimated_total)}</div>
                                {(draft.items.new_product_count > 0).then(|| view! {
                                    <div class="alert alert--warning">
                                        {format!(
                                            "{} new product(s) will be created on conversion.",
                                            draft.items.new_product_count
                                        )}
                                    </div>
                                })}
                            </div>
                        })}
                        <div class="form__group">
                            <Label>"Note"</Label>
                            <Textarea value=note placeholder="Optional note for the purchase order" attr:rows=3 />
                        </div>
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| target.set(None)
                            disabled=Signal::derive(move || saving.get())
                        >
                            "Cancel"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| convert()
                            disabled=Signal::derive(move || saving.get())
                        >
                            {move || if saving.get() { "Converting..." } else { "Convert" }}
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
