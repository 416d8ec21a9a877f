//! Plain-text rendering of submission results.

use std::fmt::Write;

use crate::error::SubmissionError;
use crate::models::{DisplayModel, TermMatch};

/// Render a display model as a readable report.
pub fn render_report(model: &DisplayModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", model.message);

    if model.groups.is_empty() {
        let _ = writeln!(out, "\nNo matching terms.");
        return out;
    }

    for group in &model.groups {
        let _ = writeln!(out, "\nOriginal term: \"{}\"", group.original);
        if group.matches.is_empty() {
            let _ = writeln!(out, "  (no candidates)");
        }
        for (idx, hit) in group.matches.iter().enumerate() {
            render_match(&mut out, idx + 1, hit);
        }
    }

    out
}

fn render_match(out: &mut String, rank: usize, hit: &TermMatch) {
    let _ = writeln!(out, "  {}. Standard term: {}", rank, hit.name);
    let _ = writeln!(out, "     Similarity:    {}", hit.display_similarity());
    let _ = writeln!(out, "     Category:      {}", hit.category);
    let _ = writeln!(out, "     Type:          {}", hit.term_type);
    if let Some(definition) = hit.definition.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "     Definition:    {}", definition);
    }
    if let Some(synonyms) = hit.synonyms.as_deref().filter(|s| !s.is_empty()) {
        let _ = writeln!(out, "     Synonyms:      {}", synonyms);
    }
}

/// Render a failed submission. Malformed bodies are shown verbatim.
pub fn render_failure(error: &SubmissionError) -> String {
    match error {
        SubmissionError::MalformedResponse { raw } if !raw.trim().is_empty() => {
            format!("Error: response was not structured data\n\n{}\n", raw)
        }
        other => format!("Error: {}\n", other),
    }
}
