use contracts::domain::common::StoreRef;
use leptos::prelude::*;

/// Состояние, общее для всех экранов: выбранный магазин и список магазинов.
///
/// Состояние вкладок списка закупок сюда не попадает, оно живёт в самой странице.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub stores: RwSignal<Vec<StoreRef>>,
    pub current_store: RwSignal<Option<StoreRef>>,
    pub stores_loading: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            stores: RwSignal::new(vec![]),
            current_store: RwSignal::new(None),
            stores_loading: RwSignal::new(false),
        }
    }

    /// Id выбранного магазина для query string списков
    pub fn current_store_id(&self) -> Option<String> {
        self.current_store
            .with(|store| store.as_ref().map(|s| s.id.to_string()))
    }

    /// То же без подписки на изменения (для запросов внутри обработчиков)
    pub fn current_store_id_untracked(&self) -> Option<String> {
        self.current_store
            .with_untracked(|store| store.as_ref().map(|s| s.id.to_string()))
    }

    /// Выбрать магазин по id; пустая строка = все магазины
    pub fn select_store(&self, store_id: &str) {
        let selected = self
            .stores
            .with_untracked(|stores| stores.iter().find(|s| s.id.as_str() == store_id).cloned());
        log::info!("Store selected: {:?}", selected.as_ref().map(|s| &s.name));
        self.current_store.set(selected);
    }

    /// Загруженный список магазинов; первый становится текущим, если ничего не выбрано
    pub fn set_stores(&self, stores: Vec<StoreRef>) {
        if self.current_store.get_untracked().is_none() {
            self.current_store.set(stores.first().cloned());
        }
        self.stores.set(stores);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}
