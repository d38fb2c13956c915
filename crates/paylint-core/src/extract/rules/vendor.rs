//! Vendor name extraction.
//!
//! Vendors are recognized by a trailing company suffix (Corporation,
//! Inc, LLC, ...). Candidates that are really document headers are
//! rejected so a line like `INVOICE` never wins over the actual
//! company name below it.

use super::patterns;

/// Document-header tokens that must never be taken as a vendor name.
const REJECTED_NAMES: [&str; 4] = ["INVOICE", "BILL", "RECEIPT", "STATEMENT"];

/// Extract the vendor name from document text.
///
/// Returns the first suffix-bearing candidate that survives the
/// header-token filter, with internal whitespace collapsed.
pub fn extract_vendor(text: &str) -> Option<String> {
    for caps in patterns::VENDOR_NAME.captures_iter(text) {
        let candidate = caps[1].trim().to_string();
        if REJECTED_NAMES.contains(&candidate.to_uppercase().as_str()) {
            continue;
        }
        let collapsed = candidate.split_whitespace().collect::<Vec<_>>().join(" ");
        if !collapsed.is_empty() {
            return Some(collapsed);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_vendor() {
        let text = "INVOICE\n\nABC Corporation\n123 Business Street\n";
        assert_eq!(extract_vendor(text), Some("ABC Corporation".to_string()));
    }

    #[test]
    fn test_extract_vendor_suffix_variants() {
        assert_eq!(
            extract_vendor("Vendor: Acme Widgets Inc\n"),
            Some("Acme Widgets Inc".to_string())
        );
        assert_eq!(
            extract_vendor("Globex & Sons, Ltd\n"),
            Some("Globex & Sons, Ltd".to_string())
        );
        assert_eq!(
            extract_vendor("Initech Company\n"),
            Some("Initech Company".to_string())
        );
    }

    #[test]
    fn test_extract_vendor_collapses_whitespace() {
        assert_eq!(
            extract_vendor("ABC    Corporation\n"),
            Some("ABC Corporation".to_string())
        );
    }

    #[test]
    fn test_extract_vendor_none_without_suffix() {
        assert_eq!(extract_vendor("INVOICE\nTotal Due: $10.00\n"), None);
    }
}
