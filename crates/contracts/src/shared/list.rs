//! Формат списочных запросов и ответов backend
//!
//! Ответ списка: `{ data: { items, pagination?, stats? } }`; обёртка `data`
//! снимается через `response::unwrap_data`.

use serde::{Deserialize, Serialize};

/// Пагинация в ответе (страницы нумеруются с 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            last_page: 1,
            per_page: 20,
            total: 0,
        }
    }
}

/// Необязательная сводка по списку
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListStats {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub total_paid: Option<f64>,
    #[serde(default)]
    pub total_due: Option<f64>,
}

/// Одна страница списка
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    /// None: сервер не прислал пагинацию, текущая страница остаётся прежней
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub stats: Option<ListStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn is_ascending(self) -> bool {
        self == SortDirection::Asc
    }
}

/// Параметры запроса списка; сериализуются в query string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: u32,
    pub per_page: u32,
    pub sort_by: String,
    pub sort_dir: SortDirection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::response::unwrap_data;

    #[test]
    fn test_envelope_with_stats() {
        let json = r#"{
            "data": {
                "items": [1, 2, 3],
                "pagination": { "current_page": 2, "last_page": 5, "per_page": 3, "total": 14 },
                "stats": { "total_count": 14, "total_due": 1500.5 }
            }
        }"#;
        let body: serde_json::Value = serde_json::from_str(json).unwrap();
        let page: ListPage<u32> = serde_json::from_value(unwrap_data(body)).unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.pagination.map(|p| p.last_page), Some(5));
        let stats = page.stats.unwrap();
        assert_eq!(stats.total_due, Some(1500.5));
        assert_eq!(stats.total_paid, None);
    }

    #[test]
    fn test_missing_pagination_is_none() {
        let page: ListPage<u32> = serde_json::from_str(r#"{ "items": [] }"#).unwrap();
        assert_eq!(page.pagination, None);
        assert!(page.stats.is_none());
    }

    #[test]
    fn test_sort_direction_flip() {
        assert_eq!(SortDirection::Asc.flip(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.flip(), SortDirection::Asc);
    }
}
