//! Deterministic cleanup of model JSON output.
//!
//! Completion models wrap answers in markdown fences, leave trailing
//! commas, or butt objects together without separators. Each rule here
//! is a pure string fix, applied before giving up on a response.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Outer markdown fence, with or without a `json` tag.
    static ref CODE_FENCE: Regex = Regex::new(
        r"(?s)^```(?:json)?\s*\n?(.*?)\n?```\s*$"
    ).unwrap();

    /// Comma directly before a closing brace or bracket.
    static ref TRAILING_COMMA: Regex = Regex::new(
        r",\s*([}\]])"
    ).unwrap();

    /// Adjacent objects missing their separator.
    static ref MISSING_COMMA: Regex = Regex::new(
        r"\}\s*\{"
    ).unwrap();
}

/// Strip an outer markdown fence, if present.
pub fn strip_code_fences(text: &str) -> String {
    match CODE_FENCE.captures(text.trim()) {
        Some(caps) => caps[1].to_string(),
        None => text.trim().to_string(),
    }
}

/// Cut the response down to its outermost JSON object.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Apply the syntax repairs in order.
pub fn repair_json(text: &str) -> String {
    let repaired = TRAILING_COMMA.replace_all(text, "$1");
    let repaired = MISSING_COMMA.replace_all(&repaired, "},{");
    strip_control_chars(&repaired)
}

/// Drop control characters that are not ordinary whitespace.
fn strip_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t' | '\r'))
        .collect()
}
