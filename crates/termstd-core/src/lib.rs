//! # termstd-core
//!
//! Core types, traits, and state logic shared by every termstd workflow page.
//!
//! This crate provides the static workflow catalog, the category toggle set
//! with its aggregate "select all" key, the request payload and display
//! model, normalization of service responses, and report rendering. It
//! performs no I/O; transports live in `termstd-client`.

pub mod catalog;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod options;
pub mod report;
pub mod toggle;
pub mod traits;

// Re-export commonly used types at crate root
pub use catalog::{CategoryDef, EmbeddingDefaults, LlmDefaults, Workflow, WorkflowSpec};
pub use error::{Error, Result, SubmissionError};
pub use models::*;
pub use normalize::{normalize, parse_document};
pub use options::{EmbeddingOptions, EmbeddingProvider, LlmOptions, RequestOptions};
pub use report::{render_failure, render_report};
pub use toggle::{CategorySnapshot, CategoryToggleSet, ToggleEvent};
pub use traits::*;
