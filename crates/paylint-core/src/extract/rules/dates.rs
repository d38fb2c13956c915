//! Invoice date extraction and normalization.
//!
//! Dates appear on invoices in several formats. A raw match is parsed
//! against a fixed list of formats and normalized to ISO `YYYY-MM-DD`;
//! raw text that parses under none of them is kept verbatim so the
//! validator can still see that a date was present.

use chrono::NaiveDate;

use super::patterns;

/// Formats tried in order. Ambiguous numeric dates resolve US-style
/// (`MM/DD/YYYY`) first, falling back to `DD/MM/YYYY` when the first
/// component cannot be a month.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

/// Parse a raw date string against the supported formats.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Normalize a raw date to `YYYY-MM-DD`, or return it trimmed and
/// unchanged when it parses under no supported format.
pub fn normalize_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => raw.trim().to_string(),
    }
}

/// Extract the labeled invoice date from document text.
pub fn extract_date(text: &str) -> Option<String> {
    patterns::DATE_LABELED
        .captures(text)
        .map(|caps| normalize_date(&caps[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_date("2024-01-15"), Some(expected));
        assert_eq!(parse_date("01/15/2024"), Some(expected));
        assert_eq!(parse_date("January 15, 2024"), Some(expected));
        assert_eq!(parse_date("January 15 2024"), Some(expected));
        assert_eq!(parse_date("15 January 2024"), Some(expected));
    }

    #[test]
    fn test_ambiguous_dates_resolve_us_first() {
        // 03/04/2024 is valid both ways; month-first wins.
        assert_eq!(
            parse_date("03/04/2024"),
            NaiveDate::from_ymd_opt(2024, 3, 4)
        );
        // 13 cannot be a month, so day-first is the only reading.
        assert_eq!(
            parse_date("13/01/2024"),
            NaiveDate::from_ymd_opt(2024, 1, 13)
        );
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("January 15, 2024"), "2024-01-15");
        assert_eq!(normalize_date("  2024-01-15  "), "2024-01-15");
        // Unparseable text survives verbatim.
        assert_eq!(normalize_date("Janury 15, 2024"), "Janury 15, 2024");
    }

    #[test]
    fn test_extract_date() {
        let text = "Invoice Number: INV-001\nInvoice Date: January 15, 2024\n";
        assert_eq!(extract_date(text), Some("2024-01-15".to_string()));

        let text = "Date: 2024-02-01\n";
        assert_eq!(extract_date(text), Some("2024-02-01".to_string()));

        assert_eq!(extract_date("no dates here"), None);
    }
}
