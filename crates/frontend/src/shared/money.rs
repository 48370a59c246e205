//! Форматирование денежных сумм.
//!
//! Суммы приходят от backend простыми числами в базовой валюте магазина;
//! символ, разделители разрядов и число знаков задаются в `[currency]`.

use crate::config::{config, CurrencyConfig, DigitGrouping};

/// Число с разделителями разрядов и фиксированным количеством знаков
///
/// # Примеры
///
/// ```rust,ignore
/// assert_eq!(format_grouped(1234567.891, 2, DigitGrouping::Indian), "12,34,567.89");
/// assert_eq!(format_grouped(1234567.891, 2, DigitGrouping::Western), "1,234,567.89");
/// ```
pub fn format_grouped(value: f64, decimals: u8, grouping: DigitGrouping) -> String {
    let formatted = format!("{:.prec$}", value.abs(), prec = decimals as usize);
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i.to_string(), Some(d.to_string())),
        None => (formatted.clone(), None),
    };

    let digits: Vec<char> = integer_part.chars().collect();
    let mut groups: Vec<String> = Vec::new();
    let mut end = digits.len();

    // Последние три цифры всегда одна группа
    let first = end.min(3);
    groups.push(digits[end - first..end].iter().collect());
    end -= first;

    let step = match grouping {
        DigitGrouping::Indian => 2,
        DigitGrouping::Western => 3,
    };
    while end > 0 {
        let take = end.min(step);
        groups.push(digits[end - take..end].iter().collect());
        end -= take;
    }
    groups.reverse();

    let mut result = groups.join(",");
    if let Some(d) = decimal_part {
        result.push('.');
        result.push_str(&d);
    }

    let is_zero = value.abs() < 0.5 * 10f64.powi(-(decimals as i32));
    if value < 0.0 && !is_zero {
        format!("-{}", result)
    } else {
        result
    }
}

/// Сумма с символом валюты по заданной конфигурации
pub fn format_currency_with(value: f64, currency: &CurrencyConfig) -> String {
    let grouped = format_grouped(value, currency.decimals, currency.grouping);
    match grouped.strip_prefix('-') {
        Some(abs) => format!("-{}{}", currency.symbol, abs),
        None => format!("{}{}", currency.symbol, grouped),
    }
}

/// Сумма с символом валюты магазина: "৳1,23,456.00"
pub fn format_money(value: f64) -> String {
    format_currency_with(value, &config().currency)
}

/// Сумма без символа (для таблиц с подписью валюты в заголовке)
pub fn format_amount(value: f64) -> String {
    let currency = &config().currency;
    format_grouped(value, currency.decimals, currency.grouping)
}

/// Количество: без хвостовых нулей ("12", "2.5")
pub fn format_quantity(value: f64) -> String {
    let s = format!("{:.3}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bdt() -> CurrencyConfig {
        CurrencyConfig {
            code: "BDT".into(),
            symbol: "৳".into(),
            name: "Taka".into(),
            decimals: 2,
            grouping: DigitGrouping::Indian,
        }
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_grouped(1234567.891, 2, DigitGrouping::Indian), "12,34,567.89");
        assert_eq!(format_grouped(100000.0, 0, DigitGrouping::Indian), "1,00,000");
        assert_eq!(format_grouped(999.0, 2, DigitGrouping::Indian), "999.00");
        assert_eq!(format_grouped(10000000.0, 0, DigitGrouping::Indian), "1,00,00,000");
    }

    #[test]
    fn test_western_grouping() {
        assert_eq!(format_grouped(1234567.891, 2, DigitGrouping::Western), "1,234,567.89");
        assert_eq!(format_grouped(0.0, 2, DigitGrouping::Western), "0.00");
        assert_eq!(format_grouped(-1234.5, 1, DigitGrouping::Western), "-1,234.5");
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        assert_eq!(format_grouped(-0.001, 2, DigitGrouping::Western), "0.00");
    }

    #[test]
    fn test_currency_symbol_placement() {
        assert_eq!(format_currency_with(1500.0, &bdt()), "৳1,500.00");
        assert_eq!(format_currency_with(-250.0, &bdt()), "-৳250.00");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(12.0), "12");
        assert_eq!(format_quantity(2.5), "2.5");
        assert_eq!(format_quantity(0.125), "0.125");
    }
}
