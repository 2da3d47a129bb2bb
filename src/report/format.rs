//! Display formatting for amounts and rates

use crate::projection::numeric::round_whole;

/// Whole-dollar amount with thousands separators, e.g. `$1,234,567`
pub fn format_currency(amount: f64) -> String {
    let rounded = round_whole(amount);
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Rate as a percentage with one decimal, e.g. `3.0%`
pub fn format_pct(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Multiplier with two decimals, e.g. `1.18x`
pub fn format_multiplier(multiplier: f64) -> String {
    format!("{:.2}x", multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1_000.0), "$1,000");
        assert_eq!(format_currency(1_234_567.5), "$1,234,568");
        assert_eq!(format_currency(-138_000.0), "-$138,000");
    }

    #[test]
    fn test_rates() {
        assert_eq!(format_pct(0.03), "3.0%");
        assert_eq!(format_pct(0.18), "18.0%");
        assert_eq!(format_multiplier(1.18), "1.18x");
    }
}
