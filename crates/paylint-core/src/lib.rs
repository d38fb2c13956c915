//! Core library for invoice document processing.
//!
//! This crate provides:
//! - Field extraction from invoice text (regex rules or a completion model)
//! - Math correction of common extraction noise in amounts and totals
//! - Validation with classified error/warning findings
//! - Invoice lifecycle status resolution

pub mod error;
pub mod models;
pub mod extract;
pub mod correct;
pub mod validate;
pub mod pipeline;

pub use error::{PaylintError, ExtractError, LookupError, StatusError, Result};
pub use models::invoice::{InvoiceRecord, LineItem};
pub use models::validation::{Finding, Severity, ValidationResult};
pub use models::status::InvoiceStatus;
pub use models::config::PaylintConfig;
pub use extract::{InvoiceExtractor, PatternExtractor, ModelExtractor, CompletionClient};
pub use correct::correct_invoice;
pub use validate::{InvoiceValidator, DuplicateLookup};
pub use pipeline::{InvoicePipeline, ProcessedInvoice};
