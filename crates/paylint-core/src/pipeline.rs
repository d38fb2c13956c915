//! End-to-end document processing.
//!
//! Wires one extraction strategy to the corrector, the validator, and
//! status resolution. This is the seam callers use; the stages stay
//! independently usable.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::correct::correct_invoice;
use crate::error::Result;
use crate::extract::InvoiceExtractor;
use crate::models::invoice::InvoiceRecord;
use crate::models::status::InvoiceStatus;
use crate::models::validation::ValidationResult;
use crate::validate::{DuplicateLookup, InvoiceValidator};

/// Outcome of processing one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedInvoice {
    /// The extracted, corrected record.
    pub record: InvoiceRecord,

    /// Findings from validation.
    pub validation: ValidationResult,

    /// Lifecycle status resolved from the findings.
    pub status: InvoiceStatus,

    /// One-line summary of how processing went, when notable.
    pub processing_notes: Option<String>,
}

/// The full pipeline over one extraction strategy.
pub struct InvoicePipeline<E> {
    extractor: E,
    validator: InvoiceValidator,
    auto_correct: bool,
}

impl<E: InvoiceExtractor> InvoicePipeline<E> {
    /// Build a pipeline with math correction enabled.
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            validator: InvoiceValidator::new(),
            auto_correct: true,
        }
    }

    /// Toggle the math correction stage.
    pub fn with_auto_correct(mut self, enabled: bool) -> Self {
        self.auto_correct = enabled;
        self
    }

    /// Process one document's text end to end.
    ///
    /// Only extraction can fail; everything downstream degrades into
    /// findings on the result instead.
    pub fn process(
        &self,
        text: &str,
        lookup: Option<&dyn DuplicateLookup>,
    ) -> Result<ProcessedInvoice> {
        let record = self.extractor.extract(text)?;

        let record = if self.auto_correct {
            correct_invoice(record)
        } else {
            record
        };

        let validation = self.validator.validate(&record, lookup);
        let status = InvoiceStatus::from_validation(&validation);
        let processing_notes = notes_for(&validation);

        info!("Invoice processing completed: status={}", status);

        Ok(ProcessedInvoice {
            record,
            validation,
            status,
            processing_notes,
        })
    }
}

/// Summary line for the caller, absent when processing was clean.
fn notes_for(validation: &ValidationResult) -> Option<String> {
    if !validation.is_valid {
        Some(format!(
            "Found {} validation errors",
            validation.errors.len()
        ))
    } else if !validation.warnings.is_empty() {
        Some(format!(
            "Extracted successfully with {} warnings",
            validation.warnings.len()
        ))
    } else {
        None
    }
}
