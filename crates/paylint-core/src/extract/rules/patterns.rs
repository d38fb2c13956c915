//! Common regex patterns for invoice field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Identity fields
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)Invoice\s+(?:Number|#|No\.?)[\s:]*([A-Z0-9-]+)"
    ).unwrap();

    pub static ref VENDOR_NAME: Regex = Regex::new(
        r"(?i)([A-Z][A-Za-z \t&,\.]+(?:Corporation|Corp|Inc|LLC|Ltd|Company))"
    ).unwrap();

    // Labeled date, capturing ISO, slash, and month-name shapes
    pub static ref DATE_LABELED: Regex = Regex::new(
        r"(?i)(?:Invoice\s+Date|Date)[\s:]*(\d{4}-\d{2}-\d{2}|\d{1,2}/\d{1,2}/\d{4}|[A-Za-z]+\s+\d{1,2},?\s+\d{4}|\d{1,2}\s+[A-Za-z]+\s+\d{4})"
    ).unwrap();

    // Labeled totals (US format: optional $ and comma separators)
    pub static ref SUBTOTAL: Regex = Regex::new(
        r"(?i)Subtotal[\s:]+\$?([\d,]+\.\d{2})"
    ).unwrap();

    pub static ref TAX: Regex = Regex::new(
        r"(?i)Tax[^:\n]*[\s:]+\$?([\d,]+\.\d{2})"
    ).unwrap();

    pub static ref TOTAL_DUE: Regex = Regex::new(
        r"(?i)TOTAL\s+DUE[\s:]+\$?([\d,]+\.\d{2})"
    ).unwrap();

    // Discount
    pub static ref DISCOUNT_PERCENT: Regex = Regex::new(
        r"(?i)Discount\s*\(?(\d+(?:\.\d+)?)\s*%\)?"
    ).unwrap();

    pub static ref DISCOUNT_AMOUNT: Regex = Regex::new(
        r"(?i)Discount[^:\n]*[\s:]+-?\s*\$?([\d,]+\.\d{2})"
    ).unwrap();

    // GST components (Indian tax breakdown)
    pub static ref CGST_RATE: Regex = Regex::new(
        r"(?i)CGST\s*\(?(\d+(?:\.\d+)?)\s*%"
    ).unwrap();

    pub static ref CGST_AMOUNT: Regex = Regex::new(
        r"(?i)CGST[^:\n]*[\s:]+\$?([\d,]+\.\d{2})"
    ).unwrap();

    pub static ref SGST_RATE: Regex = Regex::new(
        r"(?i)SGST\s*\(?(\d+(?:\.\d+)?)\s*%"
    ).unwrap();

    pub static ref SGST_AMOUNT: Regex = Regex::new(
        r"(?i)SGST[^:\n]*[\s:]+\$?([\d,]+\.\d{2})"
    ).unwrap();

    // Currency
    pub static ref CURRENCY_CODE: Regex = Regex::new(
        r"(?i)Currency[\s:]*([A-Z]{3})\b"
    ).unwrap();

    // Line item table
    pub static ref ITEM_HEADER: Regex = Regex::new(
        r"(?i)^\s*(?:Description|Item|Product)s?\b.*\b(?:Amount|Total|Price)\s*$"
    ).unwrap();

    pub static ref ITEM_ROW: Regex = Regex::new(
        r"(?i)^(.+?)\s{2,}(\d+(?:\.\d+)?)(?:\s*(?:hrs?|hours|units?|pcs|ea))?\s+\$?([\d,]+\.\d{2})\s+\$?([\d,]+\.\d{2})\s*$"
    ).unwrap();

    pub static ref TOTALS_BOUNDARY: Regex = Regex::new(
        r"(?i)^\s*(?:Subtotal|Total|TOTAL\s+DUE|Tax|Discount|CGST|SGST|Balance|Amount\s+Due)\b"
    ).unwrap();
}
