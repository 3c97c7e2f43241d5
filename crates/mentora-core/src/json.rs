// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction of JSON documents from LLM prose.
//!
//! Models are asked for pure JSON but frequently wrap it in markdown fences
//! or surround it with commentary. Extraction tries a fenced ```json block
//! first, then the outermost brace-delimited span. Failure is a typed error
//! so callers can take their deterministic fallback path.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Why a JSON document could not be pulled out of model output.
#[derive(Debug, Error)]
pub enum JsonExtractError {
    /// No fenced block and no brace-delimited span in the text.
    #[error("no JSON object found in model output")]
    NoJsonFound,

    /// A candidate span was found but did not parse.
    #[error("candidate JSON failed to parse: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Locates the JSON payload inside `text` without parsing it.
///
/// Preference order: a ```json fenced block, any ``` fenced block whose body
/// starts with `{`, then the span from the first `{` to the last `}`.
pub fn find_json_span(text: &str) -> Option<&str> {
    if let Some(body) = fenced_body(text, "```json") {
        return Some(body);
    }
    if let Some(body) = fenced_body(text, "```")
        && body.trim_start().starts_with('{')
    {
        return Some(body);
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end > start {
        Some(&text[start..=end])
    } else {
        None
    }
}

fn fenced_body<'a>(text: &'a str, fence: &str) -> Option<&'a str> {
    let open = text.find(fence)?;
    let body_start = open + fence.len();
    let close = text[body_start..].find("```")?;
    Some(&text[body_start..body_start + close])
}

/// Extracts and deserializes a JSON document of type `T` from model output.
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Result<T, JsonExtractError> {
    let span = find_json_span(text).ok_or(JsonExtractError::NoJsonFound)?;
    Ok(serde_json::from_str(span.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn extracts_fenced_json_block() {
        let text = "Here is your plan:\n```json\n{\"title\": \"Rust\"}\n```\nEnjoy!";
        let v: Value = extract_json(text).expect("should extract");
        assert_eq!(v["title"], "Rust");
    }

    #[test]
    fn extracts_plain_fence_with_object_body() {
        let text = "```\n{\"a\": 1}\n```";
        let v: Value = extract_json(text).expect("should extract");
        assert_eq!(v["a"], 1);
    }

    #[test]
    fn extracts_bare_braces_from_prose() {
        let text = "Sure! {\"x\": [1, 2]} hope that helps";
        let v: Value = extract_json(text).expect("should extract");
        assert_eq!(v["x"][1], 2);
    }

    #[test]
    fn no_json_is_a_typed_error() {
        let err = extract_json::<Value>("I cannot produce that.").unwrap_err();
        assert!(matches!(err, JsonExtractError::NoJsonFound));
    }

    #[test]
    fn malformed_candidate_is_a_parse_error() {
        let err = extract_json::<Value>("{not json}").unwrap_err();
        assert!(matches!(err, JsonExtractError::Parse(_)));
    }
}
