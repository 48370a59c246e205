//! Состояние экрана закупок: четыре вкладки, у каждой свои фильтры,
//! страница, сортировка и строки.
//!
//! Чистая логика без Leptos; страница держит её в `RwSignal`.

use contracts::domain::a001_purchase_draft::PurchaseDraft;
use contracts::domain::a002_purchase_order::{PaymentStatus, PurchaseOrder};
use contracts::domain::common::PartyRef;
use contracts::shared::list::{ListPage, ListQuery, ListStats, Pagination, SortDirection};
use crate::shared::list_utils::SortState;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PurchaseTab {
    Drafts,
    New,
    Progress,
    Completed,
}

impl PurchaseTab {
    pub const ALL: [PurchaseTab; 4] = [
        PurchaseTab::Drafts,
        PurchaseTab::New,
        PurchaseTab::Progress,
        PurchaseTab::Completed,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PurchaseTab::Drafts => "drafts",
            PurchaseTab::New => "new",
            PurchaseTab::Progress => "progress",
            PurchaseTab::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PurchaseTab::Drafts => "Drafts",
            PurchaseTab::New => "New",
            PurchaseTab::Progress => "In progress",
            PurchaseTab::Completed => "Completed",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.key() == key)
    }

    /// Значение `scope` для `/api/purchases/orders`; у черновиков свой endpoint
    pub fn scope(&self) -> Option<&'static str> {
        match self {
            PurchaseTab::Drafts => None,
            other => Some(other.key()),
        }
    }

    pub fn is_drafts(&self) -> bool {
        *self == PurchaseTab::Drafts
    }

    fn index(&self) -> usize {
        match self {
            PurchaseTab::Drafts => 0,
            PurchaseTab::New => 1,
            PurchaseTab::Progress => 2,
            PurchaseTab::Completed => 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabFilter {
    pub search: String,
    /// Фильтр по поставщику (выбирается кликом по имени в таблице)
    pub supplier: Option<PartyRef>,
    /// YYYY-MM-DD, пусто = без ограничения
    pub date_from: String,
    pub date_to: String,
    pub payment_status: Option<PaymentStatus>,
}

impl TabFilter {
    pub fn active_count(&self) -> usize {
        [
            !self.search.trim().is_empty(),
            self.supplier.is_some(),
            !self.date_from.is_empty() || !self.date_to.is_empty(),
            self.payment_status.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

/// Строки вкладки: у черновиков и заказов разные таблицы
#[derive(Debug, Clone, PartialEq)]
pub enum TabRows {
    Drafts(Vec<PurchaseDraft>),
    Orders(Vec<PurchaseOrder>),
}

impl TabRows {
    fn empty_for(tab: PurchaseTab) -> Self {
        if tab.is_drafts() {
            TabRows::Drafts(Vec::new())
        } else {
            TabRows::Orders(Vec::new())
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TabRows::Drafts(rows) => rows.len(),
            TabRows::Orders(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn drafts(&self) -> Vec<PurchaseDraft> {
        match self {
            TabRows::Drafts(rows) => rows.clone(),
            TabRows::Orders(_) => Vec::new(),
        }
    }

    pub fn orders(&self) -> Vec<PurchaseOrder> {
        match self {
            TabRows::Orders(rows) => rows.clone(),
            TabRows::Drafts(_) => Vec::new(),
        }
    }
}

/// Ответ списка для одной вкладки
#[derive(Debug, Clone, PartialEq)]
pub enum TabPage {
    Drafts(ListPage<PurchaseDraft>),
    Orders(ListPage<PurchaseOrder>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabView {
    pub filter: TabFilter,
    /// 1-based, как `current_page` у backend
    pub page: u32,
    pub page_size: u32,
    pub sort: SortState,
    pub rows: TabRows,
    pub pagination: Pagination,
    pub stats: Option<ListStats>,
    pub loading: bool,
    /// Хотя бы один ответ уже получен
    pub loaded: bool,
    pub error: Option<String>,
    pub request_seq: u64,
}

impl TabView {
    fn new(tab: PurchaseTab, page_size: u32) -> Self {
        Self {
            filter: TabFilter::default(),
            page: 1,
            page_size,
            sort: SortState::default(),
            rows: TabRows::empty_for(tab),
            pagination: Pagination::default(),
            stats: None,
            loading: false,
            loaded: false,
            error: None,
            request_seq: 0,
        }
    }

    fn to_query(&self, tab: PurchaseTab, store_id: Option<String>) -> ListQuery {
        let non_empty = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        ListQuery {
            page: self.page,
            per_page: self.page_size,
            sort_by: self.sort.field.clone(),
            sort_dir: self.sort.direction,
            scope: tab.scope().map(str::to_string),
            store_id,
            search: non_empty(&self.filter.search),
            supplier_id: self.filter.supplier.as_ref().map(|s| s.id.to_string()),
            date_from: non_empty(&self.filter.date_from),
            date_to: non_empty(&self.filter.date_to),
            payment_status: self
                .filter
                .payment_status
                .map(|status| status.as_str().to_string()),
        }
    }
}

/// Выданный запрос списка. Ответ применяется, только если `seq` всё ещё последний.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub tab: PurchaseTab,
    pub seq: u64,
    pub query: ListQuery,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseListState {
    active: PurchaseTab,
    views: [TabView; 4],
}

impl PurchaseListState {
    pub fn new(page_size: u32) -> Self {
        Self {
            active: PurchaseTab::Drafts,
            views: PurchaseTab::ALL.map(|tab| TabView::new(tab, page_size)),
        }
    }

    pub fn active(&self) -> PurchaseTab {
        self.active
    }

    pub fn view(&self, tab: PurchaseTab) -> &TabView {
        &self.views[tab.index()]
    }

    pub fn active_view(&self) -> &TabView {
        self.view(self.active)
    }

    fn view_mut(&mut self, tab: PurchaseTab) -> &mut TabView {
        &mut self.views[tab.index()]
    }

    fn active_view_mut(&mut self) -> &mut TabView {
        let tab = self.active;
        self.view_mut(tab)
    }

    /// Меняет только активную вкладку; состояние остальных не трогается
    pub fn switch_tab(&mut self, tab: PurchaseTab) {
        self.active = tab;
    }

    pub fn set_search(&mut self, search: &str) {
        let view = self.active_view_mut();
        view.filter.search = search.to_string();
        view.page = 1;
    }

    pub fn set_date_range(&mut self, from: &str, to: &str) {
        let view = self.active_view_mut();
        view.filter.date_from = from.to_string();
        view.filter.date_to = to.to_string();
        view.page = 1;
    }

    pub fn set_supplier(&mut self, supplier: Option<PartyRef>) {
        let view = self.active_view_mut();
        view.filter.supplier = supplier.filter(|s| !s.id.is_empty());
        view.page = 1;
    }

    pub fn set_payment_status(&mut self, status: Option<PaymentStatus>) {
        let view = self.active_view_mut();
        view.filter.payment_status = status;
        view.page = 1;
    }

    pub fn clear_filters(&mut self) {
        let view = self.active_view_mut();
        view.filter = TabFilter::default();
        view.page = 1;
    }

    /// Повторный клик по той же колонке меняет направление, новая колонка сортируется по возрастанию
    pub fn toggle_sort(&mut self, field: &str) {
        let view = self.active_view_mut();
        if view.sort.field == field {
            view.sort.direction = view.sort.direction.flip();
        } else {
            view.sort.field = field.to_string();
            view.sort.direction = SortDirection::Asc;
        }
        view.page = 1;
    }

    pub fn go_to_page(&mut self, page: u32) {
        self.active_view_mut().page = page.max(1);
    }

    pub fn change_page_size(&mut self, size: u32) {
        let view = self.active_view_mut();
        view.page_size = size.max(1);
        view.page = 1;
    }

    /// Начать запрос списка для вкладки
    pub fn begin_request(&mut self, tab: PurchaseTab, store_id: Option<String>) -> FetchTicket {
        let view = self.view_mut(tab);
        view.request_seq += 1;
        view.loading = true;
        FetchTicket {
            tab,
            seq: view.request_seq,
            query: view.to_query(tab, store_id),
        }
    }

    fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.view(ticket.tab).request_seq == ticket.seq
    }

    /// Применить ответ; устаревший (есть более новый запрос той же вкладки) отбрасывается
    pub fn apply_success(&mut self, ticket: &FetchTicket, page: TabPage) -> bool {
        if !self.is_current(ticket) {
            log::debug!(
                "Dropping stale {} response (seq {})",
                ticket.tab.key(),
                ticket.seq
            );
            return false;
        }

        let view = self.view_mut(ticket.tab);
        let (rows, pagination, stats) = match page {
            TabPage::Drafts(page) => (TabRows::Drafts(page.items), page.pagination, page.stats),
            TabPage::Orders(page) => (TabRows::Orders(page.items), page.pagination, page.stats),
        };
        view.pagination = match pagination {
            Some(pagination) => {
                view.page = pagination.current_page.max(1);
                pagination
            }
            // Без пагинации в ответе страница пользователя сохраняется
            None => Pagination {
                current_page: view.page,
                last_page: view.page,
                per_page: view.page_size,
                total: rows.len() as u64,
            },
        };
        view.rows = rows;
        view.stats = stats;
        view.loading = false;
        view.loaded = true;
        view.error = None;
        true
    }

    /// Ошибка загрузки: прежние строки остаются, показывается баннер
    pub fn apply_failure(&mut self, ticket: &FetchTicket, message: &str) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        let view = self.view_mut(ticket.tab);
        view.loading = false;
        view.error = Some(message.to_string());
        true
    }

    pub fn dismiss_error(&mut self) {
        self.active_view_mut().error = None;
    }

    /// Заменить заказ во всех вкладках, где он показан
    pub fn patch_order(&mut self, order: &PurchaseOrder) {
        for view in self.views.iter_mut() {
            if let TabRows::Orders(rows) = &mut view.rows {
                for row in rows.iter_mut().filter(|row| row.id == order.id) {
                    *row = order.clone();
                }
            }
        }
    }

    pub fn remove_order(&mut self, order_id: &str) {
        for view in self.views.iter_mut() {
            if let TabRows::Orders(rows) = &mut view.rows {
                let before = rows.len();
                rows.retain(|row| row.id.as_str() != order_id);
                if rows.len() < before {
                    view.pagination.total = view.pagination.total.saturating_sub(1);
                }
            }
        }
    }

    pub fn remove_draft(&mut self, draft_id: &str) {
        let view = self.view_mut(PurchaseTab::Drafts);
        if let TabRows::Drafts(rows) = &mut view.rows {
            let before = rows.len();
            rows.retain(|row| row.id.as_str() != draft_id);
            if rows.len() < before {
                view.pagination.total = view.pagination.total.saturating_sub(1);
            }
        }
    }
}

pub fn create_state(page_size: u32) -> RwSignal<PurchaseListState> {
    RwSignal::new(PurchaseListState::new(page_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_purchase_order::{OrderStatus, PurchaseOrder};

    fn order(id: &str) -> PurchaseOrder {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "invoice_number": format!("PO-{id}"),
            "grand_total": 500.0,
            "amount_paid": 0.0,
            "amount_due": 500.0,
            "payment_status": "pending",
            "order_status": "ordered",
            "created_at": "2024-03-15T10:00:00Z"
        }))
        .unwrap()
    }

    fn orders_page(ids: &[&str], current_page: u32) -> TabPage {
        TabPage::Orders(ListPage {
            items: ids.iter().map(|id| order(id)).collect(),
            pagination: Some(Pagination {
                current_page,
                last_page: 3,
                per_page: 20,
                total: 45,
            }),
            stats: None,
        })
    }

    #[test]
    fn test_tab_state_is_preserved_across_switches() {
        let mut state = PurchaseListState::new(20);
        state.switch_tab(PurchaseTab::Progress);
        state.set_search("acme");
        state.go_to_page(3);

        state.switch_tab(PurchaseTab::Completed);
        state.set_search("other");
        assert_eq!(state.active_view().page, 1);

        state.switch_tab(PurchaseTab::Progress);
        assert_eq!(state.active_view().filter.search, "acme");
        assert_eq!(state.active_view().page, 3);
        assert_eq!(state.view(PurchaseTab::Completed).filter.search, "other");
        assert!(state.view(PurchaseTab::Drafts).filter.search.is_empty());
    }

    #[test]
    fn test_every_tab_keeps_its_own_view() {
        let mut state = PurchaseListState::new(20);
        let sort_fields = ["reference", "invoice_number", "grand_total", "amount_due"];
        let statuses = [
            None,
            Some(PaymentStatus::Pending),
            Some(PaymentStatus::Partial),
            Some(PaymentStatus::Paid),
        ];

        let mut expected = Vec::new();
        for (i, tab) in PurchaseTab::ALL.into_iter().enumerate() {
            state.switch_tab(tab);
            state.set_search(&format!("query {i}"));
            state.set_supplier(Some(PartyRef {
                id: format!("{}", i + 1).into(),
                name: format!("Supplier {i}"),
                phone: None,
            }));
            state.set_date_range(&format!("2024-0{}-01", i + 1), &format!("2024-0{}-28", i + 1));
            state.set_payment_status(statuses[i]);
            state.toggle_sort(sort_fields[i]);
            if i % 2 == 1 {
                state.toggle_sort(sort_fields[i]);
            }
            state.change_page_size([10, 20, 50, 100][i]);
            state.go_to_page(i as u32 + 2);
            expected.push(state.view(tab).clone());
        }

        for tab in PurchaseTab::ALL.into_iter().chain(PurchaseTab::ALL.into_iter().rev()) {
            state.switch_tab(tab);
            assert_eq!(state.active(), tab);
        }

        for (i, tab) in PurchaseTab::ALL.into_iter().enumerate() {
            let view = state.view(tab);
            assert_eq!(view, &expected[i], "tab {} changed", tab.key());
            assert_eq!(view.page, i as u32 + 2);
            assert_eq!(view.sort.field, sort_fields[i]);
            let direction = if i % 2 == 1 { SortDirection::Desc } else { SortDirection::Asc };
            assert_eq!(view.sort.direction, direction);
        }
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut state = PurchaseListState::new(20);
        state.switch_tab(PurchaseTab::New);
        state.go_to_page(4);
        state.set_payment_status(Some(PaymentStatus::Partial));
        assert_eq!(state.active_view().page, 1);
        assert_eq!(state.active_view().filter.active_count(), 1);

        state.go_to_page(2);
        state.change_page_size(50);
        assert_eq!(state.active_view().page, 1);
        assert_eq!(state.active_view().page_size, 50);
    }

    #[test]
    fn test_supplier_filter() {
        let mut state = PurchaseListState::new(20);
        state.switch_tab(PurchaseTab::New);
        state.go_to_page(2);
        state.set_supplier(Some(PartyRef {
            id: "5".into(),
            name: "Acme Traders".to_string(),
            phone: None,
        }));
        assert_eq!(state.active_view().page, 1);

        let ticket = state.begin_request(PurchaseTab::New, None);
        assert_eq!(ticket.query.supplier_id.as_deref(), Some("5"));

        state.clear_filters();
        assert_eq!(state.active_view().filter, TabFilter::default());
    }

    #[test]
    fn test_toggle_sort() {
        let mut state = PurchaseListState::new(20);
        state.go_to_page(2);
        state.toggle_sort("grand_total");
        assert_eq!(state.active_view().sort.field, "grand_total");
        assert_eq!(state.active_view().sort.direction, SortDirection::Asc);
        assert_eq!(state.active_view().page, 1);

        state.toggle_sort("grand_total");
        assert_eq!(state.active_view().sort.direction, SortDirection::Desc);

        state.toggle_sort("invoice_number");
        assert_eq!(state.active_view().sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_ticket_carries_query() {
        let mut state = PurchaseListState::new(20);
        state.switch_tab(PurchaseTab::Completed);
        state.set_search("  acme ");
        state.set_date_range("2024-03-01", "");

        let ticket = state.begin_request(PurchaseTab::Completed, Some("7".to_string()));
        assert_eq!(ticket.seq, 1);
        assert_eq!(ticket.query.scope.as_deref(), Some("completed"));
        assert_eq!(ticket.query.store_id.as_deref(), Some("7"));
        assert_eq!(ticket.query.search.as_deref(), Some("acme"));
        assert_eq!(ticket.query.date_from.as_deref(), Some("2024-03-01"));
        assert_eq!(ticket.query.date_to, None);
        assert!(state.view(PurchaseTab::Completed).loading);

        let drafts = state.begin_request(PurchaseTab::Drafts, None);
        assert_eq!(drafts.query.scope, None);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut state = PurchaseListState::new(20);
        state.switch_tab(PurchaseTab::New);
        let first = state.begin_request(PurchaseTab::New, None);
        let second = state.begin_request(PurchaseTab::New, None);

        assert!(state.apply_success(&second, orders_page(&["2"], 1)));
        assert!(!state.apply_success(&first, orders_page(&["1"], 1)));
        assert!(!state.apply_failure(&first, "boom"));

        let view = state.view(PurchaseTab::New);
        assert_eq!(view.rows.orders()[0].id.as_str(), "2");
        assert!(view.error.is_none());
        assert!(!view.loading);
    }

    #[test]
    fn test_requests_for_other_tabs_do_not_supersede() {
        let mut state = PurchaseListState::new(20);
        let new_ticket = state.begin_request(PurchaseTab::New, None);
        let _progress = state.begin_request(PurchaseTab::Progress, None);
        assert!(state.apply_success(&new_ticket, orders_page(&["1"], 1)));
    }

    #[test]
    fn test_failure_keeps_previous_rows() {
        let mut state = PurchaseListState::new(20);
        let ticket = state.begin_request(PurchaseTab::Progress, None);
        state.apply_success(&ticket, orders_page(&["1", "2"], 2));
        assert_eq!(state.view(PurchaseTab::Progress).page, 2);

        let ticket = state.begin_request(PurchaseTab::Progress, None);
        assert!(state.apply_failure(&ticket, "Could not load data."));

        let view = state.view(PurchaseTab::Progress);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.error.as_deref(), Some("Could not load data."));
        assert!(!view.loading);
    }

    #[test]
    fn test_response_without_pagination_keeps_page() {
        let mut state = PurchaseListState::new(20);
        state.switch_tab(PurchaseTab::New);
        state.go_to_page(3);

        let ticket = state.begin_request(PurchaseTab::New, None);
        assert_eq!(ticket.query.page, 3);
        let page = TabPage::Orders(ListPage {
            items: vec![order("1"), order("2")],
            pagination: None,
            stats: None,
        });
        assert!(state.apply_success(&ticket, page));

        let view = state.view(PurchaseTab::New);
        assert_eq!(view.page, 3);
        assert_eq!(view.pagination.current_page, 3);
        assert_eq!(view.pagination.total, 2);
    }

    #[test]
    fn test_patch_and_remove() {
        let mut state = PurchaseListState::new(20);
        let ticket = state.begin_request(PurchaseTab::New, None);
        state.apply_success(&ticket, orders_page(&["1", "2"], 1));

        let mut patched = order("2");
        patched.order_status = OrderStatus::Received;
        state.patch_order(&patched);
        assert_eq!(
            state.view(PurchaseTab::New).rows.orders()[1].order_status,
            OrderStatus::Received
        );

        state.remove_order("1");
        let view = state.view(PurchaseTab::New);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.pagination.total, 44);
    }

    #[test]
    fn test_tab_keys() {
        assert_eq!(PurchaseTab::from_key("progress"), Some(PurchaseTab::Progress));
        assert_eq!(PurchaseTab::from_key("archive"), None);
        assert_eq!(PurchaseTab::New.scope(), Some("new"));
    }
}
