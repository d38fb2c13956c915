//! Rule-based extraction strategy.

use tracing::{debug, info};

use crate::models::invoice::InvoiceRecord;

use super::rules::{
    extract_amounts, extract_date, extract_line_items, extract_vendor, patterns,
};
use super::{InvoiceExtractor, Result};

/// Extractor backed by the regex rules in [`super::rules`].
///
/// Pattern extraction is infallible: fields the rules cannot find are
/// left `None` and the validator reports them downstream.
pub struct PatternExtractor {
    /// Infer `USD` from a `$` symbol when no explicit code is present.
    infer_currency: bool,
}

impl PatternExtractor {
    /// Create a new pattern extractor with default settings.
    pub fn new() -> Self {
        Self {
            infer_currency: true,
        }
    }

    /// Set currency inference from the `$` symbol.
    pub fn with_currency_inference(mut self, infer: bool) -> Self {
        self.infer_currency = infer;
        self
    }

    fn extract_invoice_number(&self, text: &str) -> Option<String> {
        patterns::INVOICE_NUMBER
            .captures(text)
            .map(|caps| caps[1].trim().to_string())
    }

    fn extract_currency(&self, text: &str) -> Option<String> {
        if let Some(caps) = patterns::CURRENCY_CODE.captures(text) {
            return Some(caps[1].to_uppercase());
        }

        // Dollar sign fallback when no explicit code is present
        if self.infer_currency && text.contains('$') {
            return Some("USD".to_string());
        }

        None
    }
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceExtractor for PatternExtractor {
    fn extract(&self, text: &str) -> Result<InvoiceRecord> {
        info!("Extracting fields from {} characters of text", text.len());

        let amounts = extract_amounts(text);
        let line_items = extract_line_items(text);

        let record = InvoiceRecord {
            vendor_name: extract_vendor(text),
            invoice_number: self.extract_invoice_number(text),
            invoice_date: extract_date(text),
            line_items,
            subtotal: amounts.subtotal,
            discount_percentage: amounts.discount_percentage,
            discount_amount: amounts.discount_amount,
            cgst_rate: amounts.cgst_rate,
            cgst_amount: amounts.cgst_amount,
            sgst_rate: amounts.sgst_rate,
            sgst_amount: amounts.sgst_amount,
            tax: amounts.tax,
            total_amount: amounts.total_amount,
            currency: self.extract_currency(text),
        };

        debug!(
            "Extracted invoice {:?} with {} line items",
            record.invoice_number,
            record.line_items.len()
        );

        Ok(record)
    }
}
