//! Submission lifecycle for a single workflow page.
//!
//! ```text
//! Idle --submit(valid)--> Loading --success--> Succeeded
//! Idle --submit(invalid)--> Failed
//! Loading --failure--> Failed
//! Succeeded | Failed --submit--> Loading
//! ```
//!
//! Every submission gets a generation number. An outcome is applied only if
//! it belongs to the latest generation and the page is still mounted; older
//! or late outcomes are discarded.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use termstd_core::{
    parse_document, CategorySnapshot, DisplayModel, RequestOptions, RequestPayload,
    SubmissionError, Transport, TransportResponse, Workflow,
};

/// Phase of the current submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Authoritative submission state. A result exists only in `Succeeded` and
/// an error only in `Failed`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Loading {
        input_text: String,
    },
    Succeeded {
        input_text: String,
        result: DisplayModel,
    },
    Failed {
        input_text: String,
        error: SubmissionError,
    },
}

impl SubmissionState {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Idle => Phase::Idle,
            Self::Loading { .. } => Phase::Loading,
            Self::Succeeded { .. } => Phase::Succeeded,
            Self::Failed { .. } => Phase::Failed,
        }
    }

    pub fn input_text(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Loading { input_text }
            | Self::Succeeded { input_text, .. }
            | Self::Failed { input_text, .. } => Some(input_text),
        }
    }

    pub fn result(&self) -> Option<&DisplayModel> {
        match self {
            Self::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&SubmissionError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Human-readable failure message, present only in `Failed`.
    pub fn error_message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }
}

/// An issued submission awaiting its transport outcome.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    generation: u64,
    endpoint: String,
    payload: RequestPayload,
    started: Instant,
}

impl PendingSubmission {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn payload(&self) -> &RequestPayload {
        &self.payload
    }
}

/// Drives submissions for one workflow page.
pub struct RequestOrchestrator {
    workflow: Workflow,
    endpoint: String,
    transport: Arc<dyn Transport>,
    state: SubmissionState,
    generation: u64,
    mounted: bool,
}

impl RequestOrchestrator {
    pub fn new(workflow: Workflow, transport: Arc<dyn Transport>) -> Self {
        Self {
            workflow,
            endpoint: workflow.endpoint_path().to_string(),
            transport,
            state: SubmissionState::Idle,
            generation: 0,
            mounted: true,
        }
    }

    /// Override the endpoint path this orchestrator posts to.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn workflow(&self) -> Workflow {
        self.workflow
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == Phase::Loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Validate input, issue one transport call, and apply its outcome.
    pub async fn submit(
        &mut self,
        input_text: &str,
        categories: CategorySnapshot,
        options: RequestOptions,
    ) -> &SubmissionState {
        if let Some(pending) = self.begin(input_text, categories, options) {
            let outcome = self
                .transport
                .send(&pending.endpoint, &pending.payload)
                .await;
            self.complete(pending, outcome);
        }
        &self.state
    }

    /// Start a submission without calling the transport.
    ///
    /// Returns `None` without touching state once unmounted. Blank input
    /// moves straight to `Failed` and returns `None`. Otherwise
    /// the state moves to `Loading` and the returned pending submission
    /// must be passed to [`RequestOrchestrator::complete`] with the
    /// transport outcome.
    pub fn begin(
        &mut self,
        input_text: &str,
        categories: CategorySnapshot,
        options: RequestOptions,
    ) -> Option<PendingSubmission> {
        if !self.mounted {
            debug!(workflow = %self.workflow, "Submission ignored after unmount");
            return None;
        }

        self.generation += 1;

        if input_text.trim().is_empty() {
            warn!(
                workflow = %self.workflow,
                generation = self.generation,
                error_kind = SubmissionError::Validation.kind(),
                "Submission rejected: input text required"
            );
            self.state = SubmissionState::Failed {
                input_text: input_text.to_string(),
                error: SubmissionError::Validation,
            };
            return None;
        }

        let payload = RequestPayload::new(input_text, categories, options);
        self.state = SubmissionState::Loading {
            input_text: input_text.to_string(),
        };

        info!(
            workflow = %self.workflow,
            generation = self.generation,
            endpoint = %self.endpoint,
            input_len = input_text.len(),
            phase = %Phase::Loading,
            "Submission started"
        );
        debug!(
            embedding = payload.embedding_options.is_some(),
            llm = payload.llm_options.is_some(),
            "Payload built"
        );

        Some(PendingSubmission {
            generation: self.generation,
            endpoint: self.endpoint.clone(),
            payload,
            started: Instant::now(),
        })
    }

    /// Apply a transport outcome. Returns `false` if it was discarded
    /// because a newer submission started or the page was unmounted.
    pub fn complete(
        &mut self,
        pending: PendingSubmission,
        outcome: Result<TransportResponse, SubmissionError>,
    ) -> bool {
        let duration_ms = pending.started.elapsed().as_millis() as u64;

        if !self.mounted || pending.generation != self.generation {
            warn!(
                workflow = %self.workflow,
                generation = pending.generation,
                current_generation = self.generation,
                mounted = self.mounted,
                "Discarding stale submission outcome"
            );
            return false;
        }

        let input_text = pending.payload.text;
        let parsed = outcome.and_then(|response| {
            debug!(
                status = response.status,
                response_len = response.body.len(),
                "Response received"
            );
            parse_document(&response.body)
        });

        self.state = match parsed {
            Ok(result) => {
                info!(
                    workflow = %self.workflow,
                    generation = pending.generation,
                    duration_ms,
                    group_count = result.groups.len(),
                    match_count = result.match_count(),
                    phase = %Phase::Succeeded,
                    "Submission succeeded"
                );
                SubmissionState::Succeeded { input_text, result }
            }
            Err(err) => {
                match &err {
                    SubmissionError::MalformedResponse { raw } => warn!(
                        workflow = %self.workflow,
                        generation = pending.generation,
                        response_len = raw.len(),
                        error_kind = err.kind(),
                        "Response body is not structured data"
                    ),
                    _ => error!(
                        workflow = %self.workflow,
                        generation = pending.generation,
                        duration_ms,
                        error_kind = err.kind(),
                        error = %err,
                        "Submission failed"
                    ),
                }
                SubmissionState::Failed {
                    input_text,
                    error: err,
                }
            }
        };
        true
    }

    /// Detach from the page. Outcomes arriving afterwards are discarded.
    pub fn unmount(&mut self) {
        self.mounted = false;
        debug!(workflow = %self.workflow, "Orchestrator unmounted");
    }
}

impl std::fmt::Debug for RequestOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestOrchestrator")
            .field("workflow", &self.workflow)
            .field("endpoint", &self.endpoint)
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("mounted", &self.mounted)
            .finish()
    }
}
