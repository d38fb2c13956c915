//! Pattern-matching extraction rules.
//!
//! Each submodule owns one slice of the document: labeled amounts,
//! dates, the vendor block, and the line item table. [`patterns`]
//! holds the shared compiled regexes. The rules are deliberately
//! infallible - a rule that finds nothing returns `None` or an empty
//! collection and the caller degrades gracefully.

pub mod amounts;
pub mod dates;
pub mod items;
pub mod patterns;
pub mod vendor;

pub use amounts::{extract_amounts, parse_amount, LabeledAmounts};
pub use dates::{extract_date, normalize_date, parse_date};
pub use items::extract_line_items;
pub use vendor::extract_vendor;
