//! Date normalization between the display format used on forms
//! ("DD/MM/YYYY") and the storage format ("YYYY-MM-DD").
//!
//! Two validation levels exist on purpose. [`to_storage_date`] applies only a
//! coarse range check (day 1–31, month 1–12, year 1000–2999) and will accept
//! "31/02/2025" — form fields are persisted as-is and only rejected where a
//! real calendar date is constructed. [`parse_display_date_strict`] is that
//! stricter level: it round-trips through [`NaiveDate`] and rejects Feb 30.

use chrono::NaiveDate;

/// Convert "DD/MM/YYYY" to "YYYY-MM-DD". Coarse range check only.
///
/// Input already in storage format passes through unchanged. Returns `None`
/// on anything out of range or structurally malformed.
pub fn to_storage_date(display: &str) -> Option<String> {
    let trimmed = display.trim();
    if trimmed.is_empty() {
        return None;
    }
    if is_storage_format(trimmed) {
        return Some(trimmed.to_string());
    }

    let (day, month, year) = split_display(trimmed)?;
    if !(1..=31).contains(&day) || !(1..=12).contains(&month) || !(1000..=2999).contains(&year) {
        return None;
    }
    Some(format!("{:04}-{:02}-{:02}", year, month, day))
}

/// Convert "YYYY-MM-DD" to "DD/MM/YYYY". Returns an empty string on invalid
/// input; input already in display format passes through unchanged.
pub fn to_display_date(storage: &str) -> String {
    let trimmed = storage.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if is_display_format(trimmed) {
        return trimmed.to_string();
    }
    if !is_storage_format(trimmed) {
        return String::new();
    }
    format!("{}/{}/{}", &trimmed[8..10], &trimmed[5..7], &trimmed[0..4])
}

/// Strict parse of "DD/MM/YYYY" into a calendar date. Rejects dates that
/// do not exist (Feb 30) as well as anything [`to_storage_date`] rejects.
pub fn parse_display_date_strict(display: &str) -> Option<NaiveDate> {
    let trimmed = display.trim();
    let (day, month, year) = split_display(trimmed)?;
    if !(1000..=2999).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn split_display(value: &str) -> Option<(u32, u32, i32)> {
    let mut parts = value.splitn(3, '/');
    let day = parts.next()?.parse::<u32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let year = parts.next()?.parse::<i32>().ok()?;
    Some((day, month, year))
}

fn is_storage_format(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && value
            .bytes()
            .enumerate()
            .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit())
}

fn is_display_format(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes[2] == b'/'
        && bytes[5] == b'/'
        && value
            .bytes()
            .enumerate()
            .all(|(i, b)| matches!(i, 2 | 5) || b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_storage() {
        assert_eq!(to_storage_date("25/12/2025"), Some("2025-12-25".into()));
        assert_eq!(to_storage_date("01/01/1000"), Some("1000-01-01".into()));
        assert_eq!(to_storage_date("2025-12-25"), Some("2025-12-25".into()));
        assert_eq!(to_storage_date("32/01/2025"), None);
        assert_eq!(to_storage_date("01/13/2025"), None);
        assert_eq!(to_storage_date("01/01/3000"), None);
        assert_eq!(to_storage_date(""), None);
        assert_eq!(to_storage_date("garbage"), None);
    }

    #[test]
    fn test_coarse_check_accepts_feb_31() {
        // Only the strict parser rejects this.
        assert_eq!(to_storage_date("31/02/2025"), Some("2025-02-31".into()));
        assert_eq!(parse_display_date_strict("31/02/2025"), None);
    }

    #[test]
    fn test_to_display() {
        assert_eq!(to_display_date("2025-12-25"), "25/12/2025");
        assert_eq!(to_display_date("25/12/2025"), "25/12/2025");
        assert_eq!(to_display_date("not a date"), "");
        assert_eq!(to_display_date(""), "");
    }

    #[test]
    fn test_round_trip_identity() {
        for d in ["25/12/2025", "01/01/2000", "29/02/2024"] {
            assert_eq!(to_display_date(&to_storage_date(d).unwrap()), d);
        }
    }

    #[test]
    fn test_strict_parse() {
        assert_eq!(
            parse_display_date_strict("29/02/2024"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(parse_display_date_strict("29/02/2025"), None);
        assert_eq!(parse_display_date_strict("30/02/2024"), None);
        assert_eq!(parse_display_date_strict("01/01/3000"), None);
    }
}
