pub mod state;

use self::state::{create_state, PurchaseTab};
use super::items_modal::OrderItemsModal;
use super::payment_modal::PaymentModal;
use super::receipt::ReceiptModal;
use super::table::OrderTable;
use crate::config::config;
use crate::domain::a001_purchase_draft::ui::convert_dialog::ConvertDraftDialog;
use crate::domain::a001_purchase_draft::ui::table::DraftTable;
use crate::domain::a002_purchase_order::api::HttpGateway;
use crate::domain::a002_purchase_order::workflow::{self, PaymentOutcome};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::stat_card::StatCard;
use crate::shared::components::table_skeleton::TableSkeleton;
use crate::shared::components::ui::badge::Badge as UiBadge;
use crate::shared::dialogs::{open_while_some, ConfirmDialog, ErrorDialog};
use crate::shared::errors::{AppError, LIST_LOAD_ERROR};
use crate::shared::icons::icon;
use crate::shared::money::format_money;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use contracts::domain::a001_purchase_draft::{ConvertedOrder, PurchaseDraft};
use contracts::domain::a002_purchase_order::{PaymentMode, PaymentStatus, PurchaseOrder, Transaction};
use contracts::domain::common::PartyRef;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Что удаляется после подтверждения
#[derive(Debug, Clone)]
enum DeleteTarget {
    Draft(PurchaseDraft),
    Order(PurchaseOrder),
}

impl DeleteTarget {
    fn id(&self) -> String {
        match self {
            DeleteTarget::Draft(draft) => draft.id.to_string(),
            DeleteTarget::Order(order) => order.id.to_string(),
        }
    }

    fn describe(&self) -> String {
        match self {
            DeleteTarget::Draft(draft) => format!("Delete draft {}? This cannot be undone.", draft.reference),
            DeleteTarget::Order(order) => format!(
                "Delete purchase order {}? This cannot be undone.",
                order.invoice_number
            ),
        }
    }
}

const PAYMENT_STATUSES: [PaymentStatus; 3] =
    [PaymentStatus::Pending, PaymentStatus::Partial, PaymentStatus::Paid];

#[component]
pub fn PurchaseList() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let list_config = &config().list;
    let state = create_state(list_config.default_page_size);
    let page_size_options = list_config.page_size_options.clone();

    let selected_tab = RwSignal::new(PurchaseTab::Drafts.key().to_string());
    let search_query = RwSignal::new(String::new());
    let (is_filter_expanded, set_is_filter_expanded) = signal(false);
    let busy_id = RwSignal::new(None::<String>);

    let items_target = RwSignal::new(None::<PurchaseOrder>);
    let payment_target = RwSignal::new(None::<(PurchaseOrder, PaymentMode)>);
    let receipt_target = RwSignal::new(None::<(PurchaseOrder, Transaction)>);
    let convert_target = RwSignal::new(None::<PurchaseDraft>);
    let converted = RwSignal::new(None::<ConvertedOrder>);
    let delete_target = RwSignal::new(None::<DeleteTarget>);
    let error_message = RwSignal::new(None::<String>);

    // Загружается только активная вкладка; более новый запрос вытесняет старый
    let load_active = move || {
        let store_id = ctx.current_store_id_untracked();
        let Some(ticket) = state.try_update(|s| {
            let tab = s.active();
            s.begin_request(tab, store_id)
        }) else {
            return;
        };
        log!("Loading purchases tab {} (seq {})", ticket.tab.key(), ticket.seq);

        spawn_local(async move {
            match workflow::fetch_tab(&HttpGateway, &ticket).await {
                Ok(page) => state.update(|s| {
                    s.apply_success(&ticket, page);
                }),
                Err(e) => {
                    log::warn!("Failed to load {} tab: {}", ticket.tab.key(), e);
                    state.update(|s| {
                        s.apply_failure(&ticket, LIST_LOAD_ERROR);
                    });
                }
            }
        });
    };

    // Первый рендер и смена магазина
    Effect::new(move |_| {
        ctx.current_store.track();
        load_active();
    });

    Effect::new(move |_| {
        let key = selected_tab.get();
        let Some(tab) = PurchaseTab::from_key(&key) else {
            return;
        };
        if state.with_untracked(|s| s.active()) == tab {
            return;
        }
        state.update(|s| s.switch_tab(tab));
        search_query.set(state.with_untracked(|s| s.active_view().filter.search.clone()));
        load_active();
    });

    let active_tab = Memo::new(move |_| state.with(|s| s.active()));
    let sort = Signal::derive(move || state.with(|s| s.active_view().sort.clone()));
    let is_loading = Signal::derive(move || state.with(|s| s.active_view().loading));

    let active_filters_count =
        Signal::derive(move || state.with(|s| s.active_view().filter.active_count()));

    let apply_search = move || {
        let query = search_query.get_untracked();
        state.update(|s| s.set_search(&query));
        load_active();
    };

    let clear_filters = move || {
        search_query.set(String::new());
        state.update(|s| s.clear_filters());
        load_active();
    };

    let toggle_sort = Callback::new(move |field: &'static str| {
        state.update(|s| s.toggle_sort(field));
        load_active();
    });

    let go_to_page = move |page: u32| {
        state.update(|s| s.go_to_page(page));
        load_active();
    };

    let change_page_size = move |size: u32| {
        state.update(|s| s.change_page_size(size));
        load_active();
    };

    let filter_by_supplier = Callback::new(move |supplier: PartyRef| {
        state.update(|s| s.set_supplier(Some(supplier)));
        load_active();
    });

    let on_date_change = move |from: String, to: String| {
        state.update(|s| s.set_date_range(&from, &to));
        load_active();
    };

    let on_payment_status_change = move |code: String| {
        let status = PAYMENT_STATUSES.into_iter().find(|s| s.as_str() == code);
        state.update(|s| s.set_payment_status(status));
        load_active();
    };

    // --- удаление ---

    let request_delete_order = Callback::new(move |order: PurchaseOrder| {
        match order.deletion_check() {
            Ok(()) => delete_target.set(Some(DeleteTarget::Order(order))),
            Err(blocked) => error_message.set(Some(AppError::from(blocked).user_message())),
        }
    });

    let request_delete_draft = Callback::new(move |draft: PurchaseDraft| {
        delete_target.set(Some(DeleteTarget::Draft(draft)));
    });

    let confirm_delete = Callback::new(move |_: ()| {
        let Some(target) = delete_target.get_untracked() else {
            return;
        };
        delete_target.set(None);
        busy_id.set(Some(target.id()));

        spawn_local(async move {
            let result = match &target {
                DeleteTarget::Draft(draft) => {
                    workflow::delete_draft(&HttpGateway, draft.id.as_str()).await
                }
                DeleteTarget::Order(order) => workflow::delete_order(&HttpGateway, order).await,
            };
            busy_id.set(None);
            match result {
                Ok(()) => state.update(|s| match &target {
                    DeleteTarget::Draft(draft) => s.remove_draft(draft.id.as_str()),
                    DeleteTarget::Order(order) => s.remove_order(order.id.as_str()),
                }),
                Err(e) => {
                    log::error!("Delete of {} failed: {}", target.id(), e);
                    error_message.set(Some(e.user_message()));
                }
            }
        });
    });

    let delete_open = open_while_some(delete_target);
    let delete_message = Signal::derive(move || {
        delete_target
            .with(|t| t.as_ref().map(DeleteTarget::describe))
            .unwrap_or_default()
    });

    // --- конвертация ---

    let on_converted = Callback::new(move |(draft_id, order): (String, ConvertedOrder)| {
        state.update(|s| s.remove_draft(&draft_id));
        converted.set(Some(order));
    });

    let on_mutation_failed = Callback::new(move |e: AppError| {
        error_message.set(Some(e.user_message()));
    });

    let converted_open = open_while_some(converted);

    let go_to_new_tab = move || {
        converted.set(None);
        selected_tab.set(PurchaseTab::New.key().to_string());
    };

    // --- оплата и квитанция ---

    let open_payment = Callback::new(move |(order, mode): (PurchaseOrder, PaymentMode)| {
        payment_target.set(Some((order, mode)));
    });

    let on_paid = Callback::new(move |outcome: PaymentOutcome| {
        state.update(|s| s.patch_order(&outcome.order));
        payment_target.set(None);
        receipt_target.set(Some((outcome.order, outcome.transaction)));
    });

    // После закрытия квитанции список сверяется с сервером
    let close_receipt = Callback::new(move |_: ()| {
        receipt_target.set(None);
        load_active();
    });

    let open_receipt_from_items = Callback::new(move |txn: Transaction| {
        if let Some(order) = items_target.get_untracked() {
            items_target.set(None);
            receipt_target.set(Some((order, txn)));
        }
    });

    let stats = Signal::derive(move || state.with(|s| s.active_view().stats.clone()));

    view! {
        <PageFrame page_id="a002_purchase_order--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("purchases")}
                    <h1 class="page__title">"Purchases"</h1>
                    <UiBadge variant="primary".to_string()>
                        {move || state.with(|s| s.active_view().pagination.total.to_string())}
                    </UiBadge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| load_active()
                        disabled=is_loading
                    >
                        {move || if is_loading.get() { "Loading..." } else { "Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <TabList selected_value=selected_tab>
                    {PurchaseTab::ALL
                        .into_iter()
                        .map(|tab| {
                            view! {
                                <Tab value=tab.key()>
                                    {tab.label()}
                                    {move || {
                                        state.with(|s| {
                                            let view = s.view(tab);
                                            view.loaded.then(|| view! {
                                                <span class="tab__count">{view.pagination.total}</span>
                                            })
                                        })
                                    }}
                                </Tab>
                            }
                        })
                        .collect_view()}
                </TabList>

                <Show when=move || stats.get().is_some()>
                    <div class="stats-bar">
                        <StatCard
                            label="Records"
                            icon_name="purchases"
                            value=Signal::derive(move || {
                                stats.get().and_then(|s| s.total_count).map(|c| c.to_string())
                            })
                        />
                        <StatCard
                            label="Total amount"
                            icon_name="receipt"
                            value=Signal::derive(move || stats.get().and_then(|s| s.total_amount).map(format_money))
                        />
                        <StatCard
                            label="Paid"
                            icon_name="payments"
                            accent="success"
                            value=Signal::derive(move || stats.get().and_then(|s| s.total_paid).map(format_money))
                        />
                        <StatCard
                            label="Due"
                            icon_name="payments"
                            accent="warning"
                            value=Signal::derive(move || stats.get().and_then(|s| s.total_due).map(format_money))
                        />
                    </div>
                </Show>

                <div class="filter-panel">
                    <div class="filter-panel-header">
                        <div
                            class="filter-panel-header__left"
                            on:click=move |_| set_is_filter_expanded.update(|e| *e = !*e)
                        >
                            <span class=move || {
                                if is_filter_expanded.get() {
                                    "filter-panel__chevron filter-panel__chevron--expanded"
                                } else {
                                    "filter-panel__chevron"
                                }
                            }>
                                {icon("chevron-down")}
                            </span>
                            {icon("filter")}
                            <span class="filter-panel__title">"Filters"</span>
                            {move || {
                                let count = active_filters_count.get();
                                (count > 0).then(|| view! { <span class="filter-panel__badge">{count}</span> })
                            }}
                        </div>

                        <div class="filter-panel-header__center">
                            <PaginationControls
                                current_page=Signal::derive(move || state.with(|s| s.active_view().page))
                                last_page=Signal::derive(move || state.with(|s| s.active_view().pagination.last_page))
                                total_count=Signal::derive(move || state.with(|s| s.active_view().pagination.total))
                                page_size=Signal::derive(move || state.with(|s| s.active_view().page_size))
                                on_page_change=Callback::new(go_to_page)
                                on_page_size_change=Callback::new(change_page_size)
                                page_size_options=page_size_options
                                disabled=is_loading
                            />
                        </div>
                    </div>

                    {move || {
                        state
                            .with(|s| s.active_view().filter.supplier.clone())
                            .map(|supplier| view! {
                                <div class="filter-chip">
                                    {format!("Supplier: {}", supplier.name)}
                                    <button
                                        class="filter-chip__remove"
                                        title="Remove supplier filter"
                                        on:click=move |_| {
                                            state.update(|s| s.set_supplier(None));
                                            load_active();
                                        }
                                    >
                                        {icon("x")}
                                    </button>
                                </div>
                            })
                    }}

                    <Show when=move || is_filter_expanded.get()>
                        <div class="filter-panel-content">
                            <Flex gap=FlexGap::Small align=FlexAlign::End>
                                <div style="flex: 1; max-width: 320px;">
                                    <Flex vertical=true gap=FlexGap::Small>
                                        <Label>"Search:"</Label>
                                        <Input value=search_query placeholder="Invoice, reference, supplier..." />
                                    </Flex>
                                </div>

                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"From:"</Label>
                                    <input
                                        type="date"
                                        class="filter-date"
                                        prop:value=move || state.with(|s| s.active_view().filter.date_from.clone())
                                        on:change=move |ev| {
                                            let to = state.with_untracked(|s| s.active_view().filter.date_to.clone());
                                            on_date_change(event_target_value(&ev), to);
                                        }
                                    />
                                </Flex>

                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"To:"</Label>
                                    <input
                                        type="date"
                                        class="filter-date"
                                        prop:value=move || state.with(|s| s.active_view().filter.date_to.clone())
                                        on:change=move |ev| {
                                            let from = state.with_untracked(|s| s.active_view().filter.date_from.clone());
                                            on_date_change(from, event_target_value(&ev));
                                        }
                                    />
                                </Flex>

                                <Show when=move || !active_tab.get().is_drafts()>
                                    <Flex vertical=true gap=FlexGap::Small>
                                        <Label>"Payment:"</Label>
                                        <select
                                            class="filter-select"
                                            prop:value=move || {
                                                state.with(|s| {
                                                    s.active_view()
                                                        .filter
                                                        .payment_status
                                                        .map(|p| p.as_str())
                                                        .unwrap_or("")
                                                })
                                            }
                                            on:change=move |ev| on_payment_status_change(event_target_value(&ev))
                                        >
                                            <option value="">"All"</option>
                                            {PAYMENT_STATUSES
                                                .into_iter()
                                                .map(|p| view! { <option value=p.as_str()>{p.label()}</option> })
                                                .collect_view()}
                                        </select>
                                    </Flex>
                                </Show>

                                <Button
                                    appearance=ButtonAppearance::Secondary
                                    on_click=move |_| apply_search()
                                    disabled=is_loading
                                >
                                    "Search"
                                </Button>
                                <Button
                                    appearance=ButtonAppearance::Subtle
                                    on_click=move |_| clear_filters()
                                    disabled=is_loading
                                >
                                    "Clear"
                                </Button>
                            </Flex>
                        </div>
                    </Show>
                </div>

                {move || {
                    state.with(|s| s.active_view().error.clone()).map(|err| view! {
                        <div class="alert alert--error">
                            {err}
                            <button class="alert__close" on:click=move |_| state.update(|s| s.dismiss_error())>
                                {icon("x")}
                            </button>
                        </div>
                    })
                }}

                <Show
                    when=move || state.with(|s| s.active_view().loaded || !s.active_view().loading)
                    fallback=|| view! { <TableSkeleton columns=8 /> }
                >
                    {move || {
                        if active_tab.get().is_drafts() {
                            view! {
                                <DraftTable
                                    rows=Signal::derive(move || state.with(|s| s.active_view().rows.drafts()))
                                    sort=sort
                                    on_sort=toggle_sort
                                    on_supplier=filter_by_supplier
                                    on_convert=Callback::new(move |draft: PurchaseDraft| convert_target.set(Some(draft)))
                                    on_delete=request_delete_draft
                                    busy_id=busy_id
                                />
                            }
                            .into_any()
                        } else {
                            view! {
                                <OrderTable
                                    rows=Signal::derive(move || state.with(|s| s.active_view().rows.orders()))
                                    sort=sort
                                    on_sort=toggle_sort
                                    on_supplier=filter_by_supplier
                                    on_view=Callback::new(move |order: PurchaseOrder| items_target.set(Some(order)))
                                    on_pay=open_payment
                                    on_delete=request_delete_order
                                    busy_id=busy_id
                                />
                            }
                            .into_any()
                        }
                    }}
                    <Show when=move || state.with(|s| s.active_view().loaded && s.active_view().rows.is_empty())>
                        <div class="empty-state">"No purchases found."</div>
                    </Show>
                </Show>
            </div>

            {move || items_target.get().map(|order| view! {
                <OrderItemsModal
                    order=order
                    on_close=Callback::new(move |_: ()| items_target.set(None))
                    on_open_receipt=open_receipt_from_items
                />
            })}

            {move || payment_target.get().map(|(order, mode)| view! {
                <PaymentModal
                    order=order
                    initial_mode=mode
                    on_close=Callback::new(move |_: ()| payment_target.set(None))
                    on_paid=on_paid
                    on_failed=on_mutation_failed
                />
            })}

            {move || receipt_target.get().map(|(order, txn)| view! {
                <ReceiptModal order=order transaction=txn on_close=close_receipt />
            })}

            <ConvertDraftDialog
                target=convert_target
                on_converted=on_converted
                on_failed=on_mutation_failed
            />

            <Dialog open=converted_open>
                <DialogSurface>
                    <DialogBody>
                        <DialogTitle>"Purchase order created"</DialogTitle>
                        <DialogContent>
                            {move || converted.get().map(|order| view! {
                                <p>
                                    "Draft converted to purchase order "
                                    <strong>{order.invoice_number}</strong>
                                    "."
                                </p>
                            })}
                        </DialogContent>
                        <DialogActions>
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| converted.set(None)>
                                "Stay on drafts"
                            </Button>
                            <Button appearance=ButtonAppearance::Primary on_click=move |_| go_to_new_tab()>
                                "Go to new orders"
                            </Button>
                        </DialogActions>
                    </DialogBody>
                </DialogSurface>
            </Dialog>

            <ConfirmDialog
                open=delete_open
                title="Confirm deletion".to_string()
                message=delete_message
                confirm_label="Delete"
                on_confirm=confirm_delete
            />

            <ErrorDialog message=error_message />
        </PageFrame>
    }
}
