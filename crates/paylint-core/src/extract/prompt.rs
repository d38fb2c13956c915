//! Prompt construction for model-based extraction.
//!
//! The whole prompt lives here so tests can inspect it without a live
//! model behind them.

/// Instructions sent ahead of the document text. The model must answer
/// with a single JSON object matching the invoice record schema.
pub const EXTRACTION_PROMPT: &str = r#"Extract structured invoice data from the document text below.

Respond with a single JSON object and nothing else, using exactly these keys:

{
  "vendor_name": string or null,
  "invoice_number": string or null,
  "invoice_date": "YYYY-MM-DD" or null,
  "line_items": [
    {
      "product_name": string or null,
      "quantity": number or null,
      "unit_price": number or null,
      "amount": number or null
    }
  ],
  "subtotal": number or null,
  "discount_percentage": number or null,
  "discount_amount": number or null,
  "cgst_rate": number or null,
  "cgst_amount": number or null,
  "sgst_rate": number or null,
  "sgst_amount": number or null,
  "tax": number or null,
  "total_amount": number or null,
  "currency": three-letter code or null
}

Use null for anything the document does not state. Do not invent values.
Do not wrap the JSON in markdown fences.

Document text:
"#;

/// Assemble the full prompt, truncating oversized documents to
/// `input_limit` characters.
pub fn build_prompt(text: &str, input_limit: usize) -> String {
    let document: String = text.chars().take(input_limit).collect();
    format!("{}{}", EXTRACTION_PROMPT, document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_carries_document_text() {
        let prompt = build_prompt("Invoice Number: INV-1", 8000);
        assert!(prompt.starts_with(EXTRACTION_PROMPT));
        assert!(prompt.ends_with("Invoice Number: INV-1"));
    }

    #[test]
    fn test_oversized_document_is_truncated() {
        let text = "x".repeat(100);
        let prompt = build_prompt(&text, 10);
        assert!(prompt.ends_with(&"x".repeat(10)));
        assert_eq!(prompt.len(), EXTRACTION_PROMPT.len() + 10);
    }
}
