//! Display formatting for money amounts

use crate::config::Currency;

/// Whole-unit amount with thousands separators, e.g. `$1,288`
///
/// The sign follows the symbol (`$-4,500`), and a negative amount that rounds
/// to zero keeps it (`$-0`).
pub fn money(value: f64, currency: Currency) -> String {
    let rounded = value.round();
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    format!("{}{}{}", currency.symbol(), sign, group_thousands(rounded.abs() as u64))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1_288.37, Currency::Usd), "$1,288");
        assert_eq!(money(240_000.0, Currency::Gbp), "GBP 240,000");
        assert_eq!(money(999.5, Currency::Eur), "EUR 1,000");
        assert_eq!(money(0.0, Currency::Usd), "$0");
        assert_eq!(money(1_234_567.0, Currency::Usd), "$1,234,567");
    }

    #[test]
    fn test_negative_money() {
        assert_eq!(money(-4_500.0, Currency::Usd), "$-4,500");
        assert_eq!(money(-1_234_567.4, Currency::Eur), "EUR -1,234,567");
        assert_eq!(money(-0.2, Currency::Usd), "$-0");
        assert_eq!(money(0.2, Currency::Usd), "$0");
    }
}
