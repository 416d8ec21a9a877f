//! Mock transport for deterministic testing.
//!
//! Outcomes are scripted in order; once the script runs out every call gets
//! the default response. Every call is logged for assertions.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use termstd_core::{RequestPayload, SubmissionError, Transport, TransportResponse};

/// A recorded transport call.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub endpoint: String,
    pub payload: RequestPayload,
    pub timestamp: std::time::Instant,
}

/// Mock transport for testing.
#[derive(Clone)]
pub struct MockTransport {
    script: Arc<Mutex<VecDeque<Result<TransportResponse, SubmissionError>>>>,
    default_body: String,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

impl MockTransport {
    /// Create a mock that answers `{"message":"Mock response"}`.
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            default_body: r#"{"message":"Mock response"}"#.to_string(),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a success-status response with `body`.
    pub fn with_body(self, body: impl Into<String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(TransportResponse::ok(body)));
        self
    }

    /// Queue a transport failure.
    pub fn with_failure(self, error: SubmissionError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    /// Get all logged calls for assertion.
    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        endpoint: &str,
        payload: &RequestPayload,
    ) -> Result<TransportResponse, SubmissionError> {
        self.call_log.lock().unwrap().push(MockCall {
            endpoint: endpoint.to_string(),
            payload: payload.clone(),
            timestamp: std::time::Instant::now(),
        });

        let scripted = self.script.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(TransportResponse::ok(self.default_body.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termstd_core::{CategoryToggleSet, RequestOptions, Workflow};

    fn payload() -> RequestPayload {
        let toggles = CategoryToggleSet::from_spec(&Workflow::Ner.spec()).unwrap();
        RequestPayload::new("text", toggles.snapshot(), RequestOptions::default())
    }

    #[tokio::test]
    async fn test_script_then_default() {
        let mock = MockTransport::new()
            .with_failure(SubmissionError::transport(Some(500), None))
            .with_body("first");

        assert!(mock.send("/a", &payload()).await.is_err());
        assert_eq!(mock.send("/a", &payload()).await.unwrap().body, "first");
        assert_eq!(
            mock.send("/a", &payload()).await.unwrap().body,
            r#"{"message":"Mock response"}"#
        );
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_clones_share_call_log() {
        let mock = MockTransport::new();
        let clone = mock.clone();
        clone.send("/api/ner", &payload()).await.unwrap();
        assert_eq!(mock.calls()[0].endpoint, "/api/ner");
    }
}
