//! Parsing the recognition service's response text.
//!
//! The service answers with JSON, sometimes wrapped in a Markdown code
//! fence. The card list may be the whole document, or sit under `cards`
//! or `raw.cards`.

use serde_json::Value;

use super::item::{RawRecognizedItem, RecognizedItem};
use crate::error::RecognitionError;

/// Remove a surrounding Markdown code fence, if any.
#[must_use]
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (e.g. "json") on the opening line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        // Fence opened and closed on one line.
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parse a response into validated items.
///
/// Entries that are not objects, or whose fields have the wrong types, are
/// skipped.
pub fn parse_response(text: &str) -> Result<Vec<RecognizedItem>, RecognitionError> {
    let document: Value = serde_json::from_str(strip_code_fence(text))?;
    let entries = card_list(&document).ok_or(RecognitionError::MissingCards)?;

    let items = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            match serde_json::from_value::<RawRecognizedItem>(entry.clone()) {
                Ok(raw) if entry.is_object() => Some(RecognizedItem::from_raw(&raw)),
                Ok(_) | Err(_) => {
                    tracing::debug!(index, "ignoring malformed recognition entry");
                    None
                }
            }
        })
        .collect();
    Ok(items)
}

fn card_list(document: &Value) -> Option<&Vec<Value>> {
    match document {
        Value::Array(entries) => Some(entries),
        Value::Object(map) => map
            .get("cards")
            .and_then(Value::as_array)
            .or_else(|| map.get("raw")?.get("cards")?.as_array()),
        _ => None,
    }
}
