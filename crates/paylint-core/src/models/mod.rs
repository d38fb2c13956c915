//! Data models for invoice processing.

pub mod config;
pub mod invoice;
pub mod status;
pub mod validation;

pub use config::PaylintConfig;
pub use invoice::{InvoiceRecord, LineItem};
pub use status::InvoiceStatus;
pub use validation::{Finding, Severity, ValidationResult};
