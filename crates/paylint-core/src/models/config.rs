//! Configuration structures for the processing pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the paylint pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaylintConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Math correction configuration.
    pub correction: CorrectionConfig,

    /// Validation configuration.
    pub validation: ValidationConfig,
}

impl Default for PaylintConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            correction: CorrectionConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Infer USD when a dollar glyph appears but no explicit
    /// currency code was found.
    pub infer_currency_from_symbol: bool,

    /// Maximum number of document characters forwarded to a
    /// completion model.
    pub model_input_limit: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            infer_currency_from_symbol: true,
            model_input_limit: 8000,
        }
    }
}

/// Math correction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionConfig {
    /// Run the math corrector between extraction and validation.
    pub enabled: bool,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Probe the duplicate-lookup collaborator when one is available.
    pub check_duplicates: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            check_duplicates: true,
        }
    }
}

impl PaylintConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = PaylintConfig::default();
        assert!(config.extraction.infer_currency_from_symbol);
        assert!(config.correction.enabled);
        assert!(config.validation.check_duplicates);
        assert_eq!(config.extraction.model_input_limit, 8000);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: PaylintConfig =
            serde_json::from_str(r#"{"correction": {"enabled": false}}"#).unwrap();

        assert!(!config.correction.enabled);
        assert!(config.extraction.infer_currency_from_symbol);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = PaylintConfig::default();
        config.extraction.model_input_limit = 4000;
        config.save(&path).unwrap();

        let loaded = PaylintConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.model_input_limit, 4000);
        assert!(loaded.correction.enabled);
    }
}
