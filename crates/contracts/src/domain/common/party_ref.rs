use super::EntityId;
use serde::{Deserialize, Serialize};

/// Краткая ссылка на поставщика (или любого контрагента) внутри документа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyRef {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Магазин (точка продаж), в рамках которого ведутся закупки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRef {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

/// Название поставщика для отображения; отсутствие поставщика = покупка "с улицы"
pub fn supplier_display_name(supplier: Option<&PartyRef>) -> String {
    supplier
        .map(|s| s.name.clone())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "Walk-in".to_string())
}
