//! Normalization of service response documents into a [`DisplayModel`].
//!
//! Normalization never fails. Missing or mistyped fields degrade to empty
//! values; a document without `standardized_terms` is a valid message-only
//! result. Similarity is `1 - distance` rounded to three places without
//! clamping, so out-of-range distances stay visible downstream.

use serde_json::Value as JsonValue;
use tracing::trace;

use crate::error::SubmissionError;
use crate::models::{similarity_from_distance, DisplayModel, TermGroup, TermMatch};

/// Parse a raw response body and normalize it.
///
/// A body that is not JSON at all is a malformed response; the raw text is
/// kept so it can still be shown.
pub fn parse_document(body: &str) -> Result<DisplayModel, SubmissionError> {
    serde_json::from_str::<JsonValue>(body)
        .map(|document| normalize(&document))
        .map_err(|_| SubmissionError::MalformedResponse {
            raw: body.to_string(),
        })
}

/// Normalize a structured response document.
pub fn normalize(document: &JsonValue) -> DisplayModel {
    let message = document
        .get("message")
        .map(text_of)
        .unwrap_or_default();

    let groups: Vec<TermGroup> = document
        .get("standardized_terms")
        .and_then(JsonValue::as_array)
        .map(|terms| terms.iter().map(normalize_group).collect())
        .unwrap_or_default();

    DisplayModel { message, groups }
}

fn normalize_group(term: &JsonValue) -> TermGroup {
    let original = term.get("original_term").map(text_of).unwrap_or_default();
    let matches: Vec<TermMatch> = term
        .get("standardized_results")
        .and_then(JsonValue::as_array)
        .map(|results| results.iter().map(normalize_match).collect())
        .unwrap_or_default();

    trace!(original = %original, match_count = matches.len(), "Normalized term group");
    TermGroup { original, matches }
}

fn normalize_match(result: &JsonValue) -> TermMatch {
    let field = |name: &str| result.get(name).map(text_of).unwrap_or_default();
    let optional = |name: &str| {
        result
            .get(name)
            .filter(|v| !v.is_null())
            .map(text_of)
    };

    TermMatch {
        name: field("term_name"),
        category: field("term_category"),
        term_type: field("term_type"),
        similarity: result
            .get("distance")
            .and_then(JsonValue::as_f64)
            .map(similarity_from_distance),
        term_id: optional("term_id"),
        definition: optional("definition"),
        synonyms: optional("synonyms"),
    }
}

/// Text of a loosely-typed field: strings verbatim, arrays joined, other
/// values in their JSON form, null as empty.
fn text_of(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        JsonValue::Array(items) => items.iter().map(text_of).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}
