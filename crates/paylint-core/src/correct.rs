//! Math correction for extracted invoice records.
//!
//! Extraction gets leaf numbers right far more often than derived
//! ones, so each step here recomputes one aggregate from the values
//! that are present and overwrites a stated value that disagrees
//! beyond tolerance. Steps run in dependency order: line amounts
//! before subtotal, subtotal before discount and grand total. The
//! corrector never invents a value with no arithmetic basis.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::invoice::InvoiceRecord;

/// Replacement threshold for aggregate fields.
fn aggregate_tolerance() -> Decimal {
    Decimal::new(5, 1)
}

/// Replacement threshold for per-line amounts (one cent).
fn line_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// Recompute derivable amounts and overwrite stated values that
/// disagree beyond tolerance.
///
/// Pure over the record and idempotent: correcting an already
/// corrected record changes nothing.
pub fn correct_invoice(mut record: InvoiceRecord) -> InvoiceRecord {
    correct_line_items(&mut record);
    correct_subtotal(&mut record);
    correct_discount(&mut record);
    correct_tax(&mut record);
    correct_total(&mut record);
    record
}

/// Step 1: per line item, `amount = quantity × unit_price`.
fn correct_line_items(record: &mut InvoiceRecord) {
    for item in &mut record.line_items {
        let (quantity, unit_price) = match (item.quantity, item.unit_price) {
            (Some(q), Some(p)) => (q, p),
            _ => continue,
        };

        let computed = (quantity * unit_price).round_dp(2);
        match item.amount {
            Some(amount) if (amount - computed).abs() <= line_tolerance() => {}
            Some(amount) => {
                debug!("Replacing line amount {} with computed {}", amount, computed);
                item.amount = Some(computed);
            }
            None => item.amount = Some(computed),
        }
    }
}

/// Step 2: subtotal from the corrected line amounts. Skipped when no
/// line carries an amount, so a subtotal is never conjured from
/// nothing.
fn correct_subtotal(record: &mut InvoiceRecord) {
    let amounts: Vec<Decimal> = record.line_items.iter().filter_map(|i| i.amount).collect();
    if amounts.is_empty() {
        return;
    }

    let computed = amounts.iter().sum::<Decimal>().round_dp(2);
    reconcile(&mut record.subtotal, computed, "subtotal");
}

/// Step 3: discount amount implied by the percentage.
fn correct_discount(record: &mut InvoiceRecord) {
    let (percentage, subtotal) = match (record.discount_percentage, record.subtotal) {
        (Some(p), Some(s)) => (p, s),
        _ => return,
    };

    let computed = (subtotal * percentage / Decimal::ONE_HUNDRED).round_dp(2);
    reconcile(&mut record.discount_amount, computed, "discount amount");
}

/// Step 4: combined tax from the GST components. A stated tax is only
/// displaced by a positive candidate.
fn correct_tax(record: &mut InvoiceRecord) {
    if record.cgst_amount.is_none() && record.sgst_amount.is_none() {
        return;
    }

    let computed = record.cgst_amount.unwrap_or(Decimal::ZERO)
        + record.sgst_amount.unwrap_or(Decimal::ZERO);

    match record.tax {
        None => record.tax = Some(computed),
        Some(tax) => {
            if computed > Decimal::ZERO && (tax - computed).abs() > aggregate_tolerance() {
                debug!("Replacing tax {} with computed {}", tax, computed);
                record.tax = Some(computed);
            }
        }
    }
}

/// Step 5: grand total from the corrected components.
fn correct_total(record: &mut InvoiceRecord) {
    let subtotal = match record.subtotal {
        Some(s) => s,
        None => return,
    };

    let discount = record.discount_amount.unwrap_or(Decimal::ZERO);
    let tax = record.tax.unwrap_or(Decimal::ZERO);
    let computed = (subtotal - discount + tax).round_dp(2);

    reconcile(&mut record.total_amount, computed, "total amount");
}

/// Fill an absent aggregate, or overwrite one that is off by more than
/// the aggregate tolerance.
fn reconcile(field: &mut Option<Decimal>, computed: Decimal, label: &str) {
    match *field {
        Some(value) if (value - computed).abs() <= aggregate_tolerance() => {}
        Some(value) => {
            debug!("Replacing {} {} with computed {}", label, value, computed);
            *field = Some(computed);
        }
        None => *field = Some(computed),
    }
}
