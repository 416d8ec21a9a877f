//! Structured logging schema and field name constants for termstd.
//!
//! All crates use these constants for consistent structured logging fields,
//! so pages, the orchestrator and the transport can be filtered by the same
//! keys in aggregated output.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | A submission failed at the transport |
//! | WARN  | Recoverable issue: malformed body, stale result discarded |
//! | INFO  | Submission lifecycle (started, succeeded), startup |
//! | DEBUG | Decision points: toggle transitions, option edits, payload shape |
//! | TRACE | Per-item iteration (normalized groups and matches) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Workflow slug the event belongs to.
/// Values: "ner", "stand", "fin-std", "corr", "abbr", "gen"
pub const WORKFLOW: &str = "workflow";

/// Component within the client.
/// Examples: "toggle", "orchestrator", "page", "http_transport"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "toggle", "submit", "complete", "send", "health_check"
pub const OPERATION: &str = "op";

/// Submission generation counter. Only the latest generation is applied.
pub const GENERATION: &str = "generation";

// ─── State fields ──────────────────────────────────────────────────────────

/// Submission phase after a transition.
/// Values: "idle", "loading", "succeeded", "failed"
pub const PHASE: &str = "phase";

/// Category key affected by a toggle.
pub const CATEGORY: &str = "category";

/// Whether the aggregate ("select all") key is set after a toggle.
pub const ALL_SELECTED: &str = "all_selected";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Byte length of the submitted input text.
pub const INPUT_LEN: &str = "input_len";

/// Byte length of a response body.
pub const RESPONSE_LEN: &str = "response_len";

/// Number of term groups in a normalized display model.
pub const GROUP_COUNT: &str = "group_count";

/// Number of candidate matches across all groups.
pub const MATCH_COUNT: &str = "match_count";

// ─── Transport fields ──────────────────────────────────────────────────────

/// Endpoint URL or path a request was sent to.
pub const ENDPOINT: &str = "endpoint";

/// HTTP status code.
pub const STATUS: &str = "status";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error kind ("validation", "transport", "malformed_response").
pub const ERROR_KIND: &str = "error_kind";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_field_names_are_unique_snake_case() {
        let fields = [
            WORKFLOW, COMPONENT, OPERATION, GENERATION, PHASE, CATEGORY, ALL_SELECTED,
            DURATION_MS, INPUT_LEN, RESPONSE_LEN, GROUP_COUNT, MATCH_COUNT, ENDPOINT, STATUS,
            SUCCESS, ERROR_KIND, ERROR_MSG,
        ];
        let unique: HashSet<&str> = fields.iter().copied().collect();
        assert_eq!(unique.len(), fields.len());
        for field in fields {
            assert!(
                field.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "{} is not snake_case",
                field
            );
        }
    }
}
