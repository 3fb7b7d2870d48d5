use serde_json::Value;

use crate::domain::{DomainError, NamingReply};

const FENCE: &str = "```";

/// Remove a leading and/or trailing markdown code fence, if present.
///
/// The opening fence may carry a language tag (```` ```json ````); everything
/// up to the end of that line is dropped. Text without fences is only trimmed.
pub fn strip_code_fence(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix(FENCE) {
        body = match rest.find('\n') {
            Some(newline) => &rest[newline + 1..],
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        };
    }

    if let Some(rest) = body.trim_end().strip_suffix(FENCE) {
        body = rest;
    }

    body.trim()
}

/// Strip fences from a raw model reply and parse it as JSON.
pub fn parse_naming_reply(text: &str) -> Result<NamingReply, DomainError> {
    let body = strip_code_fence(text);
    serde_json::from_str::<Value>(body)
        .map(NamingReply::new)
        .map_err(|e| DomainError::parse(format!("model reply is not valid JSON: {e}")))
}
