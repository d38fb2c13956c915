//! Model-based extraction strategy.

use std::fmt::Display;

use tracing::{debug, warn};

use crate::error::ExtractError;
use crate::models::invoice::InvoiceRecord;

use super::prompt::build_prompt;
use super::repair::{extract_json_object, repair_json, strip_code_fences};
use super::{InvoiceExtractor, Result};

/// Default cap on document characters sent to the model.
pub const DEFAULT_INPUT_LIMIT: usize = 8000;

/// Transport to a completion model.
///
/// This trait abstracts over completion backends, so the extractor can
/// run against a hosted API, a local model, or a test stub without
/// changing. One prompt in, one response out.
pub trait CompletionClient {
    /// Transport-specific error type.
    type Error: Display;

    /// Run a single completion for the given prompt.
    fn complete(&self, prompt: &str) -> std::result::Result<String, Self::Error>;
}

/// Extractor that asks a completion model for the structured record.
pub struct ModelExtractor<C> {
    client: C,
    input_limit: usize,
}

impl<C: CompletionClient> ModelExtractor<C> {
    /// Create a model extractor over the given client.
    pub fn new(client: C) -> Self {
        Self {
            client,
            input_limit: DEFAULT_INPUT_LIMIT,
        }
    }

    /// Set the cap on document characters included in the prompt.
    pub fn with_input_limit(mut self, limit: usize) -> Self {
        self.input_limit = limit;
        self
    }

    /// Decode a model response, repairing common output defects before
    /// giving up. The error carries the first parse failure, since the
    /// repaired text is one step further from what the model said.
    fn decode(&self, response: &str) -> Result<InvoiceRecord> {
        let cleaned = strip_code_fences(response);
        let object = extract_json_object(&cleaned)
            .ok_or_else(|| ExtractError::ModelOutput("no JSON object in response".to_string()))?;

        match serde_json::from_str(object) {
            Ok(record) => Ok(record),
            Err(first_err) => {
                let repaired = repair_json(object);
                match serde_json::from_str(&repaired) {
                    Ok(record) => {
                        debug!("Model output decoded after repair");
                        Ok(record)
                    }
                    Err(_) => Err(ExtractError::ModelOutput(first_err.to_string())),
                }
            }
        }
    }
}

impl<C: CompletionClient> InvoiceExtractor for ModelExtractor<C> {
    fn extract(&self, text: &str) -> Result<InvoiceRecord> {
        if text.chars().count() > self.input_limit {
            warn!(
                "Document exceeds {} characters, truncating model input",
                self.input_limit
            );
        }

        let prompt = build_prompt(text, self.input_limit);
        let response = self
            .client
            .complete(&prompt)
            .map_err(|e| ExtractError::Completion(e.to_string()))?;

        debug!("Model returned {} characters", response.len());
        self.decode(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    /// Client that always answers with a canned response.
    struct StubClient(&'static str);

    impl CompletionClient for StubClient {
        type Error = String;

        fn complete(&self, _prompt: &str) -> std::result::Result<String, String> {
            Ok(self.0.to_string())
        }
    }

    /// Client whose transport always fails.
    struct DownClient;

    impl CompletionClient for DownClient {
        type Error = String;

        fn complete(&self, _prompt: &str) -> std::result::Result<String, String> {
            Err("connection refused".to_string())
        }
    }

    #[test]
    fn test_clean_json_response() {
        let client = StubClient(
            r#"{"vendor_name": "ABC Corporation", "invoice_number": "INV-1",
                "subtotal": 2000.00, "tax": 170.00, "total_amount": 2170.00,
                "currency": "USD"}"#,
        );

        let record = ModelExtractor::new(client).extract("doc text").unwrap();
        assert_eq!(record.vendor_name, Some("ABC Corporation".to_string()));
        assert_eq!(
            record.total_amount,
            Some(Decimal::from_str("2170.00").unwrap())
        );
        assert!(record.line_items.is_empty());
    }

    #[test]
    fn test_fenced_response_decodes() {
        let client = StubClient("```json\n{\"invoice_number\": \"INV-2\"}\n```");

        let record = ModelExtractor::new(client).extract("doc").unwrap();
        assert_eq!(record.invoice_number, Some("INV-2".to_string()));
    }

    #[test]
    fn test_chatty_response_with_trailing_comma() {
        let client = StubClient(
            "Here is the extracted data:\n{\"invoice_number\": \"INV-3\", \"currency\": \"USD\",}",
        );

        let record = ModelExtractor::new(client).extract("doc").unwrap();
        assert_eq!(record.invoice_number, Some("INV-3".to_string()));
        assert_eq!(record.currency, Some("USD".to_string()));
    }

    #[test]
    fn test_line_items_decode() {
        let client = StubClient(
            r#"{"line_items": [
                {"product_name": "Professional Services", "quantity": 10,
                 "unit_price": 150.00, "amount": 1500.00}
            ]}"#,
        );

        let record = ModelExtractor::new(client).extract("doc").unwrap();
        assert_eq!(record.line_items.len(), 1);
        assert_eq!(
            record.line_items[0].amount,
            Some(Decimal::from_str("1500.00").unwrap())
        );
    }

    #[test]
    fn test_unparseable_response_errors() {
        let client = StubClient("I could not find any invoice in this document.");

        let err = ModelExtractor::new(client).extract("doc").unwrap_err();
        assert!(matches!(err, ExtractError::ModelOutput(_)));
    }

    #[test]
    fn test_transport_failure_maps_to_completion_error() {
        let err = ModelExtractor::new(DownClient).extract("doc").unwrap_err();
        match err {
            ExtractError::Completion(msg) => assert_eq!(msg, "connection refused"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
