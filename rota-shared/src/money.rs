//! Currency normalization between the display format used on forms and
//! reports ("1.234,56" — `.` groups thousands, `,` separates cents) and the
//! plain `f64` kept in storage.

/// Parse a display-formatted currency string into a number.
///
/// Returns `None` on empty or unparseable input. Thousands separators are
/// optional; a bare "1234,56" or even "1234.56"-free integer parses fine.
pub fn parse_currency(display: &str) -> Option<f64> {
    let trimmed = display.trim().trim_start_matches("R$").trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized: String = trimmed.replace('.', "").replace(',', ".");
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format a number as a display currency string with exactly two decimals
/// and `.`-grouped thousands: 1234.5 → "1.234,50".
///
/// NaN and infinite values render as "0,00". Rounding to the cent happens on
/// the binary value via `f64::round` (half away from zero); note that a
/// literal like 1.005 is stored as 1.00499…, so it rounds down to "1,00".
/// That behavior is pinned by test.
pub fn format_currency(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!("{}{},{:02}", sign, group_thousands(cents / 100), cents % 100)
}

/// Like [`format_currency`], with `None` rendering as "0,00".
pub fn format_currency_opt(amount: Option<f64>) -> String {
    format_currency(amount.unwrap_or(0.0))
}

/// Display convention for a passenger balance: the stored sign is
/// "positive = still owed", but reports render owed amounts with a leading
/// "-" (a deficit from the agency's perspective) and overpayments with "+".
pub fn format_balance(balance: f64) -> String {
    let cents = if balance.is_finite() {
        (balance * 100.0).round() as i64
    } else {
        0
    };
    if cents > 0 {
        format!("-{}", format_currency(balance))
    } else if cents < 0 {
        format!("+{}", format_currency(-balance))
    } else {
        format_currency(0.0)
    }
}

/// Coerce an optional stored amount to a number, mapping missing and
/// non-finite values to 0 before any arithmetic.
pub fn num_or_zero(amount: Option<f64>) -> f64 {
    match amount {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Round to the nearest cent.
pub fn round_cents(amount: f64) -> f64 {
    if amount.is_finite() {
        (amount * 100.0).round() / 100.0
    } else {
        0.0
    }
}

/// Boolean rendering used by CSV export and printed reports.
pub fn format_bool(value: bool) -> &'static str {
    if value {
        "Sim"
    } else {
        "Não"
    }
}

fn group_thousands(mut whole: i64) -> String {
    let mut groups = Vec::new();
    loop {
        let group = whole % 1000;
        whole /= 1000;
        if whole == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{:03}", group));
    }
    groups.reverse();
    groups.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_strings() {
        assert_eq!(parse_currency("1.234,56"), Some(1234.56));
        assert_eq!(parse_currency("200,00"), Some(200.0));
        assert_eq!(parse_currency("R$ 1.000,00"), Some(1000.0));
        assert_eq!(parse_currency("0,99"), Some(0.99));
        assert_eq!(parse_currency(""), None);
        assert_eq!(parse_currency("   "), None);
        assert_eq!(parse_currency("abc"), None);
    }

    #[test]
    fn test_format_grouping_and_decimals() {
        assert_eq!(format_currency(1234.5), "1.234,50");
        assert_eq!(format_currency(0.0), "0,00");
        assert_eq!(format_currency(1_000_000.0), "1.000.000,00");
        assert_eq!(format_currency(-450.0), "-450,00");
        assert_eq!(format_currency(f64::NAN), "0,00");
        assert_eq!(format_currency_opt(None), "0,00");
    }

    #[test]
    fn test_rounding_is_pinned() {
        // 1.005 is 1.00499… in binary, so it rounds down. Pinned so any
        // future change to the rounding rule fails loudly.
        assert_eq!(format_currency(1.005), "1,00");
        assert_eq!(format_currency(1.0051), "1,01");
        assert_eq!(format_currency(2.675), "2,67");
        assert_eq!(format_currency(-1.0051), "-1,01");
    }

    #[test]
    fn test_round_trip() {
        for s in ["1.234,56", "0,01", "999,99", "10.000,00"] {
            let value = parse_currency(s).unwrap();
            assert_eq!(format_currency(value), s);
        }
    }

    #[test]
    fn test_balance_display_inverts_sign() {
        assert_eq!(format_balance(450.0), "-450,00");
        assert_eq!(format_balance(-30.0), "+30,00");
        assert_eq!(format_balance(0.0), "0,00");
    }

    #[test]
    fn test_num_or_zero() {
        assert_eq!(num_or_zero(Some(12.5)), 12.5);
        assert_eq!(num_or_zero(Some(f64::NAN)), 0.0);
        assert_eq!(num_or_zero(None), 0.0);
    }

    #[test]
    fn test_bool_rendering() {
        assert_eq!(format_bool(true), "Sim");
        assert_eq!(format_bool(false), "Não");
    }
}
