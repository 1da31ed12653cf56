//! Balanced-span JSON extraction from free-form completion text.
//!
//! Models are asked for JSON but frequently wrap it in prose or code fences.
//! The contract here is deliberately narrow: the first `{` or `[` opens a
//! span, nesting is tracked with string/escape awareness, and the span ends
//! when the opening delimiter balances. A span that closes with the wrong
//! delimiter or never closes is an error — guessing at a truncated payload
//! would parse garbage downstream.

use crate::error::OpenAiError;

/// Extracts the first balanced JSON object or array from `content`.
///
/// # Errors
///
/// - [`OpenAiError::MissingJson`] when no `{` or `[` occurs at all.
/// - [`OpenAiError::UnbalancedJson`] when the span never balances or a
///   closing delimiter does not match the innermost opener.
pub fn extract_json(content: &str) -> Result<&str, OpenAiError> {
    let start = content
        .char_indices()
        .find(|(_, c)| *c == '{' || *c == '[')
        .map(|(i, _)| i)
        .ok_or(OpenAiError::MissingJson)?;

    let mut stack: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in content[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' | '[' => stack.push(c),
            '}' | ']' => {
                let opener = stack.pop().ok_or(OpenAiError::UnbalancedJson)?;
                let matches = (opener == '{' && c == '}') || (opener == '[' && c == ']');
                if !matches {
                    return Err(OpenAiError::UnbalancedJson);
                }
                if stack.is_empty() {
                    return Ok(&content[start..start + i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    Err(OpenAiError::UnbalancedJson)
}
