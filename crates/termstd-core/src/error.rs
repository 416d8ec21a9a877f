//! Error types for termstd.

use thiserror::Error;

/// Result type alias using termstd's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Message reported when a submission is attempted with blank input.
pub const INPUT_REQUIRED_MSG: &str = "input text required";

/// Message reported when a failure carries neither a message nor a status.
pub const GENERIC_FAILURE_MSG: &str = "An error occurred while processing the request";

/// Core error type for termstd operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Category key is not part of the workflow's toggle set
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Workflow name or slug does not match any known workflow
    #[error("Unknown workflow: {0}")]
    UnknownWorkflow(String),

    /// Option field name is not part of the options form
    #[error("Unknown option field: {0}")]
    UnknownOptionField(String),

    /// Static or runtime configuration is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP/network request outside a submission failed (health probe)
    #[error("Request error: {0}")]
    Request(String),

    /// A submission ended in the failed phase
    #[error("Submission failed: {0}")]
    Submission(#[from] SubmissionError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Failure of a single submission.
///
/// Every variant renders a non-empty, human-readable message through
/// `Display`; that message is what the failed phase shows to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmissionError {
    /// Input text was empty or whitespace-only. Detected before any call.
    #[error("{}", INPUT_REQUIRED_MSG)]
    Validation,

    /// Network-level failure or non-success status from the service.
    #[error("{}", transport_message(*status, message.as_deref()))]
    Transport {
        status: Option<u16>,
        message: Option<String>,
    },

    /// Success status, but the body is not structured data.
    #[error("{}", malformed_message(raw))]
    MalformedResponse { raw: String },
}

impl SubmissionError {
    /// Build a transport failure from an optional status and message.
    pub fn transport(status: Option<u16>, message: Option<String>) -> Self {
        SubmissionError::Transport { status, message }
    }

    /// Stable short name of the error kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            SubmissionError::Validation => "validation",
            SubmissionError::Transport { .. } => "transport",
            SubmissionError::MalformedResponse { .. } => "malformed_response",
        }
    }
}

/// Embedded message first, then the status indicator, then a generic message.
fn transport_message(status: Option<u16>, message: Option<&str>) -> String {
    match (message.map(str::trim).filter(|m| !m.is_empty()), status) {
        (Some(msg), _) => msg.to_string(),
        (None, Some(code)) => format!("HTTP error! status: {}", code),
        (None, None) => GENERIC_FAILURE_MSG.to_string(),
    }
}

fn malformed_message(raw: &str) -> String {
    if raw.trim().is_empty() {
        GENERIC_FAILURE_MSG.to_string()
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message() {
        assert_eq!(SubmissionError::Validation.to_string(), "input text required");
    }

    #[test]
    fn test_transport_prefers_embedded_message() {
        let err = SubmissionError::transport(Some(500), Some("collection missing".to_string()));
        assert_eq!(err.to_string(), "collection missing");
    }

    #[test]
    fn test_transport_falls_back_to_status() {
        let err = SubmissionError::transport(Some(502), None);
        assert_eq!(err.to_string(), "HTTP error! status: 502");
    }

    #[test]
    fn test_transport_blank_message_falls_back_to_status() {
        let err = SubmissionError::transport(Some(404), Some("   ".to_string()));
        assert_eq!(err.to_string(), "HTTP error! status: 404");
    }

    #[test]
    fn test_transport_generic_fallback() {
        let err = SubmissionError::transport(None, None);
        assert_eq!(err.to_string(), GENERIC_FAILURE_MSG);
    }

    #[test]
    fn test_malformed_shows_raw_body() {
        let err = SubmissionError::MalformedResponse {
            raw: "<html>Bad Gateway</html>".to_string(),
        };
        assert_eq!(err.to_string(), "<html>Bad Gateway</html>");
    }

    #[test]
    fn test_malformed_empty_body_is_never_blank() {
        let err = SubmissionError::MalformedResponse { raw: String::new() };
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(SubmissionError::Validation.kind(), "validation");
        assert_eq!(SubmissionError::transport(None, None).kind(), "transport");
        assert_eq!(
            SubmissionError::MalformedResponse { raw: "x".into() }.kind(),
            "malformed_response"
        );
    }

    #[test]
    fn test_error_display_unknown_category() {
        let err = Error::UnknownCategory("crypto".to_string());
        assert_eq!(err.to_string(), "Unknown category: crypto");
    }

    #[test]
    fn test_error_display_submission() {
        let err: Error = SubmissionError::Validation.into();
        assert_eq!(err.to_string(), "Submission failed: input text required");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
