//! Display formatting for prices, salaries and index values.
//!
//! Every formatter accepts a possibly-missing value and degrades to
//! [`NOT_AVAILABLE`] instead of failing.

/// Placeholder shown for missing or non-numeric values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Formats a pound amount with thousands separators and no decimals,
/// e.g. `£300,000`.
#[must_use]
pub fn currency(value: Option<f64>) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return NOT_AVAILABLE.to_owned();
    };

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };

    format!("{sign}£{}", group_thousands(&digits))
}

/// Formats an affordability index to two decimal places, e.g. `7.50`.
#[must_use]
pub fn index(value: Option<f64>) -> String {
    value
        .filter(|v| v.is_finite())
        .map_or_else(|| NOT_AVAILABLE.to_owned(), |v| format!("{v:.2}"))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(currency(Some(300_000.0)), "£300,000");
        assert_eq!(currency(Some(1_234_567.0)), "£1,234,567");
        assert_eq!(currency(Some(999.0)), "£999");
        assert_eq!(currency(Some(0.0)), "£0");
    }

    #[test]
    fn currency_rounds_to_whole_pounds() {
        assert_eq!(currency(Some(49_999.5)), "£50,000");
        assert_eq!(currency(Some(1_000.49)), "£1,000");
        assert_eq!(currency(Some(-1_500.0)), "-£1,500");
    }

    #[test]
    fn index_has_two_decimals() {
        assert_eq!(index(Some(7.5)), "7.50");
        assert_eq!(index(Some(6.0)), "6.00");
        assert_eq!(index(Some(21.109)), "21.11");
    }

    #[test]
    fn missing_values_are_not_available() {
        assert_eq!(currency(None), NOT_AVAILABLE);
        assert_eq!(currency(Some(f64::NAN)), NOT_AVAILABLE);
        assert_eq!(index(None), NOT_AVAILABLE);
        assert_eq!(index(Some(f64::INFINITY)), NOT_AVAILABLE);
    }
}
