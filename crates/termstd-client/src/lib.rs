//! # termstd-client
//!
//! Submission lifecycle and HTTP transport for termstd workflow pages.
//!
//! - [`RequestOrchestrator`] drives one page's Idle/Loading/Succeeded/Failed
//!   lifecycle and discards stale outcomes.
//! - [`WorkflowPage`] bundles a page's toggles, options, input and
//!   orchestrator.
//! - [`HttpTransport`] posts payloads to the processing service with reqwest.
//! - [`ClientConfig`] loads the service location from TOML or the
//!   environment.

pub mod config;
pub mod http;
pub mod orchestrator;
pub mod page;

#[cfg(test)]
pub mod mock;

pub use config::{ClientConfig, ConfigError, ConfigResult};
pub use http::{HttpTransport, ServiceHealth};
pub use orchestrator::{PendingSubmission, Phase, RequestOrchestrator, SubmissionState};
pub use page::WorkflowPage;

// Re-export core types
pub use termstd_core::*;
