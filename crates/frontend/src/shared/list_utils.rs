/// Утилиты для заголовков сортируемых таблиц
use contracts::shared::list::SortDirection;

/// Текущая сортировка таблицы
#[derive(Debug, Clone, PartialEq)]
pub struct SortState {
    pub field: String,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: "created_at".to_string(),
            direction: SortDirection::Desc,
        }
    }
}

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator(current_field: &str, field: &str, direction: SortDirection) -> &'static str {
    if current_field == field {
        if direction.is_ascending() { " ▲" } else { " ▼" }
    } else {
        " ⇅"
    }
}

/// CSS-класс индикатора: активная колонка подсвечивается
pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator() {
        assert_eq!(get_sort_indicator("date", "date", SortDirection::Asc), " ▲");
        assert_eq!(get_sort_indicator("date", "date", SortDirection::Desc), " ▼");
        assert_eq!(get_sort_indicator("date", "total", SortDirection::Asc), " ⇅");
    }
}
