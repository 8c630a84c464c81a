//! National identity numbers: stored as 11 bare digits, punctuated only for
//! display ("12345678901" → "123.456.789-01").

/// Strip punctuation, keeping digits only.
pub fn strip_document(document: &str) -> String {
    document.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// True when the value holds exactly 11 digits after stripping.
pub fn is_valid_document(document: &str) -> bool {
    strip_document(document).len() == 11
}

/// Format an 11-digit document for display. Anything else is returned
/// unchanged so malformed legacy values stay visible instead of vanishing.
pub fn format_document(document: &str) -> String {
    let digits = strip_document(document);
    if digits.len() != 11 {
        return document.to_string();
    }
    format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_and_strip() {
        assert_eq!(format_document("12345678901"), "123.456.789-01");
        assert_eq!(strip_document("123.456.789-01"), "12345678901");
        assert_eq!(format_document("123.456.789-01"), "123.456.789-01");
    }

    #[test]
    fn test_malformed_passes_through() {
        assert_eq!(format_document("1234"), "1234");
        assert_eq!(format_document(""), "");
    }

    #[test]
    fn test_validity() {
        assert!(is_valid_document("12345678901"));
        assert!(is_valid_document("123.456.789-01"));
        assert!(!is_valid_document("123456789"));
    }
}
