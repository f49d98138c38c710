//! Response Normalizer
//!
//! Turns whatever shape the completion service returned into a single
//! trimmed, non-empty answer string.

use crate::completion::CompletionResult;
use tracing::warn;

/// Returned when a successful completion carries no usable text.
pub const FALLBACK_ANSWER: &str = "Unable to generate an answer right now. Please try again.";

/// Extracts the answer text from a completion result.
///
/// Order of preference: the direct `text` field, then the concatenated text
/// parts of the first candidate. Each is trimmed before it is judged empty.
/// When neither yields text (or there is no result at all) the fixed
/// `FALLBACK_ANSWER` is returned.
pub fn normalize(result: Option<&CompletionResult>) -> String {
    match result.and_then(extract_text) {
        Some(answer) => answer,
        None => {
            warn!("Completion returned no usable text; substituting fallback answer");
            FALLBACK_ANSWER.to_string()
        }
    }
}

fn extract_text(result: &CompletionResult) -> Option<String> {
    if let Some(text) = non_empty(result.text.as_deref()) {
        return Some(text);
    }

    let content = result.candidates.first()?.content.as_ref()?;
    let joined: String = content
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect();
    non_empty(Some(&joined))
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
