//! Line item table extraction.
//!
//! Items are read from the tabular section between the column header
//! and the totals block. Documents without a recognizable header fall
//! back to a whole-document row scan, which is noisier but still
//! catches well-formed rows.

use crate::models::invoice::LineItem;

use super::amounts::parse_amount;
use super::patterns;

/// Extract line items from document text.
pub fn extract_line_items(text: &str) -> Vec<LineItem> {
    let lines: Vec<&str> = text.lines().collect();

    match lines.iter().position(|l| patterns::ITEM_HEADER.is_match(l)) {
        Some(header) => collect_rows(&lines[header + 1..], true),
        None => collect_rows(&lines, false),
    }
}

/// Collect item rows from a slice of lines. When `bounded` the scan
/// stops at the first totals line; the unbounded fallback skips totals
/// lines instead, since rows may appear anywhere.
fn collect_rows(lines: &[&str], bounded: bool) -> Vec<LineItem> {
    let mut items = Vec::new();

    for line in lines {
        if line.trim().is_empty() || is_separator(line) {
            continue;
        }
        if patterns::TOTALS_BOUNDARY.is_match(line) {
            if bounded {
                break;
            }
            continue;
        }
        if let Some(caps) = patterns::ITEM_ROW.captures(line) {
            items.push(LineItem {
                product_name: Some(caps[1].trim().to_string()),
                quantity: parse_amount(&caps[2]),
                unit_price: parse_amount(&caps[3]),
                amount: parse_amount(&caps[4]),
            });
        }
    }

    items
}

/// Table separator rows (`-----`, `=====`).
fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| matches!(c, '-' | '=' | '_'))
}
