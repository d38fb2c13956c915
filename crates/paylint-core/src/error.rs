//! Error types for the paylint-core library.

use thiserror::Error;

/// Main error type for the paylint library.
#[derive(Error, Debug)]
pub enum PaylintError {
    /// Invoice extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractError),

    /// Duplicate lookup error.
    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Status transition error.
    #[error("status error: {0}")]
    Status(#[from] StatusError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to invoice field extraction.
///
/// Only the model-based strategy produces these: the pattern-based
/// strategy degrades to an all-unknown record instead of failing.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The completion client could not produce a response.
    #[error("completion request failed: {0}")]
    Completion(String),

    /// Model output could not be decoded into an invoice record,
    /// even after one repair pass.
    #[error("unparseable model output: {0}")]
    ModelOutput(String),
}

/// Errors reported by a duplicate-lookup collaborator.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The backing store could not be queried.
    #[error("lookup backend failed: {0}")]
    Backend(String),
}

/// Errors from invoice status transitions.
#[derive(Error, Debug)]
pub enum StatusError {
    /// The invoice has unresolved validation errors and cannot be approved.
    #[error("invoice requires review before approval")]
    ApprovalBlocked,
}

/// Result type for the paylint library.
pub type Result<T> = std::result::Result<T, PaylintError>;
