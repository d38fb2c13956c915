//! Invoice lifecycle status.

use serde::{Deserialize, Serialize};

use crate::error::StatusError;
use crate::models::validation::ValidationResult;

/// Processing status of an invoice record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    /// Awaiting approval; the default for a fresh record.
    #[default]
    Pending,

    /// Validation found errors; a human must resolve them.
    ReviewRequired,

    /// Explicitly approved for payment.
    Approved,
}

impl InvoiceStatus {
    /// Resolve the status implied by a validation result.
    ///
    /// Any error demands review. A clean result stays `Pending`:
    /// approval is a separate, externally-triggered action.
    pub fn from_validation(result: &ValidationResult) -> Self {
        if result.errors.is_empty() {
            InvoiceStatus::Pending
        } else {
            InvoiceStatus::ReviewRequired
        }
    }

    /// Apply the approval action.
    ///
    /// Blocked while review is required; idempotent on an already
    /// approved record.
    pub fn approve(self) -> Result<Self, StatusError> {
        match self {
            InvoiceStatus::ReviewRequired => Err(StatusError::ApprovalBlocked),
            InvoiceStatus::Pending | InvoiceStatus::Approved => Ok(InvoiceStatus::Approved),
        }
    }

    /// The stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "PENDING",
            InvoiceStatus::ReviewRequired => "REVIEW_REQUIRED",
            InvoiceStatus::Approved => "APPROVED",
        }
    }

    /// Parse the stored string form.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Some(InvoiceStatus::Pending),
            "REVIEW_REQUIRED" => Some(InvoiceStatus::ReviewRequired),
            "APPROVED" => Some(InvoiceStatus::Approved),
            _ => None,
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validation::Finding;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_validation() {
        let clean = ValidationResult::from_findings(vec![]);
        assert_eq!(InvoiceStatus::from_validation(&clean), InvoiceStatus::Pending);

        let warnings_only =
            ValidationResult::from_findings(vec![Finding::warning("tax", "Tax amount is missing")]);
        assert_eq!(
            InvoiceStatus::from_validation(&warnings_only),
            InvoiceStatus::Pending
        );

        let with_errors =
            ValidationResult::from_findings(vec![Finding::error("subtotal", "Subtotal is missing")]);
        assert_eq!(
            InvoiceStatus::from_validation(&with_errors),
            InvoiceStatus::ReviewRequired
        );
    }

    #[test]
    fn test_approve_transitions() {
        assert_eq!(
            InvoiceStatus::Pending.approve().unwrap(),
            InvoiceStatus::Approved
        );

        // Idempotent on an already approved record.
        assert_eq!(
            InvoiceStatus::Approved.approve().unwrap(),
            InvoiceStatus::Approved
        );

        assert!(InvoiceStatus::ReviewRequired.approve().is_err());
    }

    #[test]
    fn test_wire_form() {
        assert_eq!(
            serde_json::to_string(&InvoiceStatus::ReviewRequired).unwrap(),
            "\"REVIEW_REQUIRED\""
        );
        assert_eq!(
            InvoiceStatus::from_str("review_required"),
            Some(InvoiceStatus::ReviewRequired)
        );
        assert_eq!(InvoiceStatus::from_str("bogus"), None);
        assert_eq!(InvoiceStatus::Approved.as_str(), "APPROVED");
    }
}
