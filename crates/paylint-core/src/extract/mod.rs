//! Field extraction from raw invoice text.
//!
//! Two interchangeable strategies implement [`InvoiceExtractor`]:
//!
//! - [`PatternExtractor`] runs the regex rules in [`rules`] and never
//!   fails; fields it cannot find stay `None`.
//! - [`ModelExtractor`] prompts a completion model for a JSON object
//!   and decodes it, repairing common model output defects first.
//!
//! Both produce the same [`InvoiceRecord`] shape, so the rest of the
//! pipeline does not care which strategy ran.

mod model;
mod pattern;
mod prompt;
mod repair;
pub mod rules;

pub use model::{CompletionClient, ModelExtractor};
pub use pattern::PatternExtractor;

use crate::error::ExtractError;
use crate::models::invoice::InvoiceRecord;

/// Extraction result type.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// A strategy for turning raw document text into a structured record.
///
/// Implementations must tolerate partial documents: a missing field is
/// `None` on the record, not an error. Errors are reserved for the
/// strategy itself breaking (transport failure, undecodable output).
pub trait InvoiceExtractor {
    /// Extract structured invoice data from document text.
    fn extract(&self, text: &str) -> Result<InvoiceRecord>;
}
