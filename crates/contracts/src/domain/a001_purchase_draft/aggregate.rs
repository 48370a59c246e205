use crate::domain::common::party_ref::supplier_display_name;
use crate::domain::common::{EntityId, PartyRef};
use serde::{Deserialize, Serialize};

/// Статус черновика закупки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftStatus {
    Preparing,
    Pending,
    Draft,
}

impl DraftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftStatus::Preparing => "preparing",
            DraftStatus::Pending => "pending",
            DraftStatus::Draft => "draft",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DraftStatus::Preparing => "Preparing",
            DraftStatus::Pending => "Pending",
            DraftStatus::Draft => "Draft",
        }
    }
}

/// Сводка по позициям черновика (сами строки в списке не приходят)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftItemSummary {
    #[serde(default)]
    pub item_count: u32,
    #[serde(default)]
    pub total_quantity: f64,
    #[serde(default)]
    pub new_product_count: u32,
}

/// Черновик закупки (до превращения в заказ поставщику)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseDraft {
    pub id: EntityId,
    /// Номер черновика, например "DRF-000123"
    pub reference: String,
    /// None = закупка без поставщика ("walk-in")
    #[serde(default)]
    pub supplier: Option<PartyRef>,
    #[serde(default)]
    pub store: Option<PartyRef>,
    #[serde(default)]
    pub items: DraftItemSummary,
    #[serde(default)]
    pub estimated_total: f64,
    pub status: DraftStatus,
    #[serde(default)]
    pub note: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl PurchaseDraft {
    pub fn supplier_name(&self) -> String {
        supplier_display_name(self.supplier.as_ref())
    }

    pub fn store_name(&self) -> String {
        self.store
            .as_ref()
            .map(|s| s.name.clone())
            .unwrap_or_else(|| "—".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_in_draft_from_json() {
        let json = r#"{
            "id": 5,
            "reference": "DRF-000005",
            "supplier": null,
            "store": { "id": "s1", "name": "Main Store" },
            "items": { "item_count": 3, "total_quantity": 12.0 },
            "estimated_total": 4500.0,
            "status": "preparing",
            "created_at": "2024-03-15T10:00:00Z"
        }"#;
        let draft: PurchaseDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.id.as_str(), "5");
        assert_eq!(draft.supplier_name(), "Walk-in");
        assert_eq!(draft.store_name(), "Main Store");
        assert_eq!(draft.items.new_product_count, 0);
        assert_eq!(draft.status, DraftStatus::Preparing);
    }
}
