//! Сумма прописью по индийской/бангладешской системе разрядов:
//! Crore = 10^7, Lakh = 10^5, Thousand = 10^3, далее сотни/десятки/единицы.

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
    "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;

/// 1..=999 прописью; 0 = пустая строка
fn below_thousand(n: u64) -> String {
    debug_assert!(n < 1000);
    let mut parts: Vec<&str> = Vec::new();

    let hundreds = n / 100;
    let rest = (n % 100) as usize;

    if hundreds > 0 {
        parts.push(ONES[hundreds as usize]);
        parts.push("Hundred");
    }
    if rest >= 20 {
        parts.push(TENS[rest / 10]);
        if rest % 10 > 0 {
            parts.push(ONES[rest % 10]);
        }
    } else if rest > 0 {
        parts.push(ONES[rest]);
    }

    parts.join(" ")
}

/// Целое число прописью; 0 = пустая строка.
///
/// Кроры выше 99 раскладываются тем же алгоритмом ("One Hundred Crore").
fn integer_words(n: u64) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut rest = n;

    let crores = rest / CRORE;
    rest %= CRORE;
    if crores > 0 {
        parts.push(format!("{} Crore", integer_words(crores)));
    }

    let lakhs = rest / LAKH;
    rest %= LAKH;
    if lakhs > 0 {
        parts.push(format!("{} Lakh", below_thousand(lakhs)));
    }

    let thousands = rest / THOUSAND;
    rest %= THOUSAND;
    if thousands > 0 {
        parts.push(format!("{} Thousand", below_thousand(thousands)));
    }

    if rest > 0 {
        parts.push(below_thousand(rest));
    }

    parts.join(" ")
}

/// Сумма прописью для квитанции.
///
/// ```rust,ignore
/// assert_eq!(amount_in_words(1250.5, "Taka"), "One Thousand Two Hundred Fifty and 50/100 Taka Only");
/// assert_eq!(amount_in_words(0.0, "Taka"), "Zero Taka Only");
/// ```
pub fn amount_in_words(amount: f64, currency_name: &str) -> String {
    let amount = if amount.is_finite() { amount.abs() } else { 0.0 };
    let cents_total = (amount * 100.0).round() as u64;
    let integer = cents_total / 100;
    let fraction = cents_total % 100;

    let mut words = if integer == 0 {
        "Zero".to_string()
    } else {
        integer_words(integer)
    };

    if fraction > 0 {
        words.push_str(&format!(" and {:02}/100", fraction));
    }

    let currency_name = currency_name.trim();
    if currency_name.is_empty() {
        format!("{} Only", words)
    } else {
        format!("{} {} Only", words, currency_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_word_zero() {
        assert_eq!(amount_in_words(0.0, "Taka"), "Zero Taka Only");
        assert_eq!(amount_in_words(0.001, "Taka"), "Zero Taka Only");
    }

    #[test]
    fn test_hundred() {
        assert_eq!(amount_in_words(100.0, "Taka"), "One Hundred Taka Only");
    }

    #[test]
    fn test_lakh_and_crore() {
        assert_eq!(amount_in_words(100_000.0, "Taka"), "One Lakh Taka Only");
        assert_eq!(amount_in_words(10_000_000.0, "Taka"), "One Crore Taka Only");
        assert_eq!(
            amount_in_words(12_345_678.0, "Taka"),
            "One Crore Twenty Three Lakh Forty Five Thousand Six Hundred Seventy Eight Taka Only"
        );
    }

    #[test]
    fn test_large_crore_counts() {
        assert_eq!(
            amount_in_words(1_500_000_000.0, "Taka"),
            "One Hundred Fifty Crore Taka Only"
        );
    }

    #[test]
    fn test_teens_and_tens() {
        assert_eq!(amount_in_words(15.0, "Taka"), "Fifteen Taka Only");
        assert_eq!(amount_in_words(40.0, "Taka"), "Forty Taka Only");
        assert_eq!(amount_in_words(1011.0, "Taka"), "One Thousand Eleven Taka Only");
    }

    #[test]
    fn test_fraction_suffix() {
        assert_eq!(
            amount_in_words(1250.5, "Taka"),
            "One Thousand Two Hundred Fifty and 50/100 Taka Only"
        );
        assert_eq!(amount_in_words(0.07, "Taka"), "Zero and 07/100 Taka Only");
    }

    #[test]
    fn test_empty_currency_name() {
        assert_eq!(amount_in_words(2.0, ""), "Two Only");
    }
}
