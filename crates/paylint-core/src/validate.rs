//! Business-rule validation for invoice records.
//!
//! Checks run in a fixed order and never short-circuit each other, so
//! one bad field still lets every other check report. Hard errors
//! block approval; warnings are informational. Each message embeds the
//! literal compared values, since downstream consumers show the
//! message as the whole explanation.

use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::error::LookupError;
use crate::models::invoice::InvoiceRecord;
use crate::models::validation::{Finding, ValidationResult};

/// Collaborator that answers whether an invoice number was seen before.
///
/// Implementations typically sit over a database or an in-memory
/// ledger. A failure here is logged and swallowed: validation output
/// must not depend on the lookup backend being reachable.
pub trait DuplicateLookup {
    /// Identifier of an existing record with this invoice number, or
    /// `None` when the number is unseen.
    fn find_existing(&self, invoice_number: &str) -> Result<Option<i64>, LookupError>;
}

/// Validates corrected invoice records against business rules.
#[derive(Debug, Default)]
pub struct InvoiceValidator;

impl InvoiceValidator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self
    }

    /// One-cent tolerance for amount comparisons.
    fn amount_tolerance() -> Decimal {
        Decimal::new(1, 2)
    }

    /// Looser tolerance for subtotal aggregation, where rounding
    /// across items is expected.
    fn subtotal_tolerance() -> Decimal {
        Decimal::ONE
    }

    /// Run every check against the record and partition the findings.
    ///
    /// `lookup` enables the duplicate check; pass `None` to skip it.
    pub fn validate(
        &self,
        record: &InvoiceRecord,
        lookup: Option<&dyn DuplicateLookup>,
    ) -> ValidationResult {
        info!("Starting invoice data validation");

        let mut findings = Vec::new();
        findings.extend(self.check_required_fields(record));
        findings.extend(self.check_amount_integrity(record));
        if let Some(lookup) = lookup {
            findings.extend(self.check_duplicate(record, lookup));
        }
        findings.extend(self.check_grand_total(record));
        findings.extend(self.check_line_item_math(record));
        findings.extend(self.check_subtotal_aggregation(record));
        findings.extend(self.check_discount_consistency(record));
        findings.extend(self.check_data_quality(record));

        let result = ValidationResult::from_findings(findings);
        info!(
            "Validation complete: {} errors, {} warnings",
            result.errors.len(),
            result.warnings.len()
        );
        result
    }

    /// Fields an accounting system cannot process without.
    fn check_required_fields(&self, record: &InvoiceRecord) -> Vec<Finding> {
        let critical = [
            ("vendor_name", "Vendor name", &record.vendor_name),
            ("invoice_number", "Invoice number", &record.invoice_number),
        ];

        critical
            .iter()
            .filter(|(_, _, value)| is_blank(value))
            .map(|(field, display, _)| {
                Finding::error(
                    *field,
                    format!("{} is missing but required for processing", display),
                )
            })
            .collect()
    }

    /// Missing or negative key amounts. Negative values are treated as
    /// extraction defects, not credit notes.
    fn check_amount_integrity(&self, record: &InvoiceRecord) -> Vec<Finding> {
        let mut findings = Vec::new();

        if record.subtotal.is_none() {
            findings.push(Finding::error(
                "subtotal",
                "Subtotal is missing - required for accounting verification",
            ));
        }
        if record.total_amount.is_none() {
            findings.push(Finding::error(
                "total_amount",
                "Total amount is missing - required for payment processing",
            ));
        }

        if let Some(subtotal) = record.subtotal {
            if subtotal < Decimal::ZERO {
                findings.push(Finding::error(
                    "subtotal",
                    format!(
                        "Subtotal is negative ({}) - likely extraction error",
                        fmt2(subtotal)
                    ),
                ));
            }
        }
        if let Some(total) = record.total_amount {
            if total < Decimal::ZERO {
                findings.push(Finding::error(
                    "total_amount",
                    format!(
                        "Total amount is negative ({}) - likely extraction error",
                        fmt2(total)
                    ),
                ));
            }
        }
        if let Some(tax) = record.tax {
            if tax < Decimal::ZERO {
                findings.push(Finding::error(
                    "tax",
                    format!("Tax is negative ({}) - likely extraction error", fmt2(tax)),
                ));
            }
        }

        findings
    }

    /// Probe the lookup collaborator for a prior record with the same
    /// invoice number. Lookup trouble is logged, never escalated.
    fn check_duplicate(
        &self,
        record: &InvoiceRecord,
        lookup: &dyn DuplicateLookup,
    ) -> Vec<Finding> {
        let number = match record.invoice_number.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => n,
            _ => return Vec::new(),
        };

        match lookup.find_existing(number) {
            Ok(Some(id)) => {
                warn!("Duplicate invoice number detected: {}", number);
                vec![Finding::error(
                    "invoice_number",
                    format!("Invoice number '{}' already exists (ID: {})", number, id),
                )]
            }
            Ok(None) => Vec::new(),
            Err(err) => {
                error!("Error checking for duplicate invoice: {}", err);
                Vec::new()
            }
        }
    }

    /// Core business check: `subtotal - discount + tax = total`.
    fn check_grand_total(&self, record: &InvoiceRecord) -> Vec<Finding> {
        let (subtotal, total) = match (record.subtotal, record.total_amount) {
            (Some(s), Some(t)) => (s, t),
            _ => return Vec::new(),
        };

        let discount = record.discount_amount.unwrap_or(Decimal::ZERO);
        let tax = record.tax.unwrap_or(Decimal::ZERO);
        let calculated = subtotal - discount + tax;
        let difference = total - calculated;

        if difference.abs() <= Self::amount_tolerance() {
            return Vec::new();
        }

        warn!(
            "Mathematical inconsistency detected: {} difference",
            fmt2(difference.abs())
        );

        vec![Finding::error(
            "total_amount",
            format!(
                "Math error: Subtotal ({}) - Discount ({}) + Tax ({}) = {}, \
                 but Grand Total is {}. Difference: {}",
                fmt2(subtotal),
                fmt2(discount),
                fmt2(tax),
                fmt2(calculated),
                fmt2(total),
                fmt2(difference)
            ),
        )]
    }

    /// Per item: `quantity × unit_price = amount`.
    fn check_line_item_math(&self, record: &InvoiceRecord) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (idx, item) in record.line_items.iter().enumerate() {
            let (quantity, unit_price, amount) =
                match (item.quantity, item.unit_price, item.amount) {
                    (Some(q), Some(p), Some(a)) => (q, p, a),
                    _ => continue,
                };

            let expected = quantity * unit_price;
            if (expected - amount).abs() > Self::amount_tolerance() {
                let name = item
                    .product_name
                    .clone()
                    .unwrap_or_else(|| format!("Item #{}", idx + 1));
                findings.push(Finding::error(
                    format!("line_items[{}]", idx),
                    format!(
                        "{}: Qty ({}) × Price ({}) = {}, but Amount is {}",
                        name,
                        quantity,
                        fmt2(unit_price),
                        fmt2(expected),
                        fmt2(amount)
                    ),
                ));
            }
        }

        findings
    }

    /// Sum of line amounts vs subtotal, with the looser tolerance.
    fn check_subtotal_aggregation(&self, record: &InvoiceRecord) -> Vec<Finding> {
        let subtotal = match record.subtotal {
            Some(s) if !record.line_items.is_empty() => s,
            _ => return Vec::new(),
        };

        let amounts: Vec<Decimal> = record.line_items.iter().filter_map(|i| i.amount).collect();
        if amounts.is_empty() {
            return Vec::new();
        }

        let items_sum: Decimal = amounts.iter().sum();
        let difference = (items_sum - subtotal).abs();

        if difference <= Self::subtotal_tolerance() {
            return Vec::new();
        }

        vec![Finding::warning(
            "subtotal",
            format!(
                "Sum of line items ({}) doesn't match subtotal ({}). Difference: {}",
                fmt2(items_sum),
                fmt2(subtotal),
                fmt2(difference)
            ),
        )]
    }

    /// Percentage-implied discount vs the stated discount amount.
    fn check_discount_consistency(&self, record: &InvoiceRecord) -> Vec<Finding> {
        let (percentage, amount, subtotal) = match (
            record.discount_percentage,
            record.discount_amount,
            record.subtotal,
        ) {
            (Some(p), Some(a), Some(s)) => (p, a, s),
            _ => return Vec::new(),
        };

        let expected = subtotal * percentage / Decimal::ONE_HUNDRED;
        let difference = (expected - amount).abs();

        if difference <= Self::amount_tolerance() {
            return Vec::new();
        }

        vec![Finding::warning(
            "discount_amount",
            format!(
                "Discount {}% of {} = {}, but discount amount is {}",
                percentage,
                fmt2(subtotal),
                fmt2(expected),
                fmt2(amount)
            ),
        )]
    }

    /// Soft signals that do not block processing.
    fn check_data_quality(&self, record: &InvoiceRecord) -> Vec<Finding> {
        let mut findings = Vec::new();

        if record.tax.is_none() {
            findings.push(Finding::warning(
                "tax",
                "Tax amount is missing - may affect tax reporting and reconciliation",
            ));
        }

        if is_blank(&record.invoice_date) {
            findings.push(Finding::warning(
                "invoice_date",
                "Invoice date is missing - may affect accounting period assignment",
            ));
        }

        if is_blank(&record.currency) {
            findings.push(Finding::warning(
                "currency",
                "Currency not detected - assuming default currency \
                 (may cause issues in multi-currency accounting)",
            ));
        }

        if let Some(total) = record.total_amount {
            if total > Decimal::from(1_000_000) {
                findings.push(Finding::warning(
                    "total_amount",
                    format!("Unusually large amount ({}) - verify accuracy", fmt2(total)),
                ));
            }
        }

        if record.line_items.is_empty() {
            findings.push(Finding::warning(
                "line_items",
                "No line items extracted - product details may be missing from the invoice",
            ));
        }

        findings
    }
}

/// Missing, or present but whitespace-only.
fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|s| s.trim().is_empty())
}

/// Two-decimal rendering used in finding messages.
fn fmt2(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}
