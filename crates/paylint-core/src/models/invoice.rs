//! Invoice record and line item models.
//!
//! Every field is independently optional: partial extraction is the
//! expected common case, not an error state. Unknown fields serialize
//! as JSON `null` so downstream consumers always see the full shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single product/service row on an invoice.
///
/// Soft invariant: `amount` should equal `quantity × unit_price`.
/// The math corrector enforces it; the validator reports violations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product/service description.
    pub product_name: Option<String>,

    /// Billed quantity.
    pub quantity: Option<Decimal>,

    /// Price per unit.
    pub unit_price: Option<Decimal>,

    /// Line total.
    pub amount: Option<Decimal>,
}

impl LineItem {
    /// True when quantity, unit price, and amount are all present,
    /// so the line math can be checked.
    pub fn is_complete(&self) -> bool {
        self.quantity.is_some() && self.unit_price.is_some() && self.amount.is_some()
    }
}

/// Structured invoice data produced by extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Issuing vendor's name.
    pub vendor_name: Option<String>,

    /// Invoice number/identifier.
    pub invoice_number: Option<String>,

    /// Invoice date, normalized to `YYYY-MM-DD` when parseable.
    /// An unparseable date is kept verbatim rather than guessed at.
    pub invoice_date: Option<String>,

    /// Line items in document order.
    #[serde(default)]
    pub line_items: Vec<LineItem>,

    /// Sum of all line item amounts, before discount and tax.
    pub subtotal: Option<Decimal>,

    /// Discount as a percentage of the subtotal.
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

    /// Total of all tax components.
    pub tax: Option<Decimal>,

    /// Grand total due.
    pub total_amount: Option<Decimal>,

    /// ISO 4217 currency code.
    pub currency: Option<String>,
}

impl InvoiceRecord {
    /// Create a new record with every field unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field was extracted at all.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Serialize line items to the JSON array form used by storage backends.
pub fn line_items_to_json(items: &[LineItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

/// Decode line items from their stored JSON array form.
pub fn line_items_from_json(json: &str) -> Result<Vec<LineItem>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_unknown_fields_serialize_as_null() {
        let record = InvoiceRecord {
            vendor_name: Some("ABC Corporation".to_string()),
            ..Default::default()
        };

        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&record).unwrap()).unwrap();

        assert_eq!(json["vendor_name"], "ABC Corporation");
        assert!(json["subtotal"].is_null());
        assert!(json["currency"].is_null());
        assert!(json.get("total_amount").is_some());
    }

    #[test]
    fn test_null_fields_deserialize_as_none() {
        let record: InvoiceRecord = serde_json::from_str(
            r#"{"vendor_name": null, "invoice_number": "INV-1", "subtotal": "100.00"}"#,
        )
        .unwrap();

        assert_eq!(record.vendor_name, None);
        assert_eq!(record.invoice_number, Some("INV-1".to_string()));
        assert_eq!(record.subtotal, Some(Decimal::from_str("100.00").unwrap()));
        assert!(record.line_items.is_empty());
    }

    #[test]
    fn test_line_item_completeness() {
        let mut item = LineItem {
            product_name: Some("Consulting Fee".to_string()),
            quantity: Some(Decimal::from(5)),
            unit_price: Some(Decimal::from_str("200.00").unwrap()),
            amount: None,
        };
        assert!(!item.is_complete());

        item.amount = Some(Decimal::from_str("1000.00").unwrap());
        assert!(item.is_complete());
    }

    #[test]
    fn test_line_items_json_round_trip() {
        let items = vec![
            LineItem {
                product_name: Some("Software License".to_string()),
                quantity: Some(Decimal::ONE),
                unit_price: Some(Decimal::from_str("500.00").unwrap()),
                amount: Some(Decimal::from_str("500.00").unwrap()),
            },
            LineItem::default(),
        ];

        let json = line_items_to_json(&items).unwrap();
        let decoded = line_items_from_json(&json).unwrap();

        assert_eq!(decoded, items);
    }

    #[test]
    fn test_empty_record() {
        assert!(InvoiceRecord::new().is_empty());

        let record = InvoiceRecord {
            currency: Some("USD".to_string()),
            ..Default::default()
        };
        assert!(!record.is_empty());
    }
}
