//! Core traits for termstd abstractions.
//!
//! The transport is the seam between page-scoped state and the remote
//! processing service, so the orchestrator can be driven by a real HTTP
//! client or a scripted test double.

use async_trait::async_trait;

use crate::error::SubmissionError;
use crate::models::RequestPayload;

/// Success-status response with its body still unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }
}

/// Request/response exchange with the processing service.
///
/// Implementations perform exactly one attempt per call. Network failures
/// and non-success statuses are both reported as
/// [`SubmissionError::Transport`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `payload` to the workflow endpoint at `endpoint`.
    async fn send(
        &self,
        endpoint: &str,
        payload: &RequestPayload,
    ) -> Result<TransportResponse, SubmissionError>;
}
