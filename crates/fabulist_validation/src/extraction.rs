//! Pulling the story JSON out of generator responses.
//!
//! Generators wrap JSON in markdown fences or add a sentence of preamble.
//! Extraction finds the payload; it never repairs it.

use fabulist_error::{FabulistResult, JsonError};

/// Extract the JSON object from a response that may contain markdown or
/// extra text.
///
/// Strategies, in order:
/// 1. Markdown code blocks: ```json ... ``` or an unlabelled fence
/// 2. The first balanced `{ ... }`
/// 3. The first balanced `[ ... ]`
///
/// # Errors
///
/// Returns `JsonError` if no JSON-shaped text is found.
///
/// # Examples
///
/// ```
/// use fabulist_validation::extract_json;
///
/// let response = "Here is the story:\n```json\n{\"title\": \"Leo\"}\n```\nEnjoy!";
/// assert_eq!(extract_json(response).unwrap(), "{\"title\": \"Leo\"}");
/// ```
pub fn extract_json(response: &str) -> FabulistResult<String> {
    if let Some(json) = extract_from_code_block(response) {
        return Ok(json);
    }

    if let Some(json) = extract_balanced(response, '{', '}') {
        return Ok(json);
    }
    if let Some(json) = extract_balanced(response, '[', ']') {
        return Ok(json);
    }

    tracing::warn!(response_length = response.len(), "No JSON found in generator response");

    Err(JsonError::new(format!(
        "No JSON found in response (length: {})",
        response.len()
    ))
    .into())
}

fn extract_from_code_block(response: &str) -> Option<String> {
    let (start, skip) = match response.find("```json") {
        Some(start) => (start, "```json".len()),
        None => (response.find("```")?, 3),
    };
    let after_fence = start + skip;
    let content_start = response[after_fence..]
        .find('\n')
        .map(|n| after_fence + n + 1)
        .unwrap_or(after_fence);

    // A missing closing fence means the response was truncated.
    let content = match response[content_start..].find("```") {
        Some(end) => &response[content_start..content_start + end],
        None => &response[content_start..],
    };
    let content = content.trim();
    (!content.is_empty()).then(|| content.to_string())
}

/// First `open` through its matching `close`, skipping delimiters inside
/// string literals.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + c.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse JSON text into `T`.
///
/// # Errors
///
/// Returns `JsonError` with serde's message and a short preview of the input.
pub fn parse_json<T>(json_str: &str) -> FabulistResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview: String = json_str.chars().take(100).collect();

        tracing::debug!(error = %e, json_preview = %preview, "JSON parsing failed");

        JsonError::new(format!("{} (JSON: {}...)", e, preview)).into()
    })
}
