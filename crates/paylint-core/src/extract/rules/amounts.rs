//! Labeled amount extraction.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{
    CGST_AMOUNT, CGST_RATE, DISCOUNT_AMOUNT, DISCOUNT_PERCENT, SGST_AMOUNT, SGST_RATE, SUBTOTAL,
    TAX, TOTAL_DUE,
};

/// Labeled monetary fields found in invoice text.
#[derive(Debug, Clone, Default)]
pub struct LabeledAmounts {
    /// Subtotal before discount and tax.
    pub subtotal: Option<Decimal>,
    /// Discount as a percentage.
    pub discount_percentage: Option<Decimal>,
    /// Discount as an absolute amount.
    pub discount_amount: Option<Decimal>,
    /// Central GST rate (%).
    pub cgst_rate: Option<Decimal>,
    /// Central GST amount.
    pub cgst_amount: Option<Decimal>,
    /// State GST rate (%).
    pub sgst_rate: Option<Decimal>,
    /// State GST amount.
    pub sgst_amount: Option<Decimal>,
    /// Total tax.
    pub tax: Option<Decimal>,
    /// Grand total due.
    pub total_amount: Option<Decimal>,
}

/// Extract all labeled amounts from invoice text. First match wins
/// per field; a field with no match stays unknown.
pub fn extract_amounts(text: &str) -> LabeledAmounts {
    LabeledAmounts {
        subtotal: captured_amount(&SUBTOTAL, text),
        discount_percentage: captured_amount(&DISCOUNT_PERCENT, text),
        discount_amount: captured_amount(&DISCOUNT_AMOUNT, text),
        cgst_rate: captured_amount(&CGST_RATE, text),
        cgst_amount: captured_amount(&CGST_AMOUNT, text),
        sgst_rate: captured_amount(&SGST_RATE, text),
        sgst_amount: captured_amount(&SGST_AMOUNT, text),
        tax: captured_amount(&TAX, text),
        total_amount: captured_amount(&TOTAL_DUE, text),
    }
}

fn captured_amount(pattern: &regex::Regex, text: &str) -> Option<Decimal> {
    pattern
        .captures(text)
        .and_then(|caps| parse_amount(&caps[1]))
}

/// Parse a US-formatted amount (e.g. "$1,500.00" or "255.00").
///
/// Currency glyphs, comma separators, and surrounding whitespace are
/// stripped before the decimal parse.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}
