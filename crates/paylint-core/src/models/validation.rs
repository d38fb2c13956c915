//! Validation findings and results.

use serde::{Deserialize, Serialize};

/// Severity of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks approval.
    Error,
    /// Informational only.
    Warning,
}

impl Severity {
    /// The lowercase wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A single validation issue.
///
/// The message embeds the literal compared values: downstream consumers
/// treat it as the full human explanation, there is no separate
/// expected/actual structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Field path the issue applies to (e.g. `line_items[2]`).
    pub field: String,

    /// Human-readable description with the literal numbers compared.
    pub message: String,

    /// Whether this finding blocks approval.
    pub severity: Severity,
}

impl Finding {
    /// Create an error-severity finding.
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Create a warning-severity finding.
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

/// Aggregated validation output for one invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff no error-severity findings exist. Warnings never
    /// affect validity.
    pub is_valid: bool,

    /// Error findings in check order.
    pub errors: Vec<Finding>,

    /// Warning findings in check order.
    pub warnings: Vec<Finding>,
}

impl ValidationResult {
    /// Partition findings by severity, preserving order within each group.
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) = findings
            .into_iter()
            .partition(|f| f.severity == Severity::Error);

        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Serialize errors and warnings as one combined JSON array, the
    /// form storage backends keep in a single text column.
    pub fn to_combined_json(&self) -> Result<String, serde_json::Error> {
        let combined: Vec<&Finding> = self.errors.iter().chain(self.warnings.iter()).collect();
        serde_json::to_string(&combined)
    }

    /// Rebuild a result from the combined stored form, re-partitioning
    /// by severity.
    pub fn from_combined_json(json: &str) -> Result<Self, serde_json::Error> {
        let findings: Vec<Finding> = serde_json::from_str(json)?;
        Ok(Self::from_findings(findings))
    }
}
