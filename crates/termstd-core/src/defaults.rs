//! Centralized default constants for termstd.
//!
//! Shared defaults live here so the client, the CLI and the tests agree on
//! the same values. Per-workflow category tables are in [`crate::catalog`].

// =============================================================================
// SERVICE
// =============================================================================

/// Base URL of the local processing service.
pub const SERVICE_URL: &str = "http://localhost:8000";

/// Request timeout in seconds. A hung call beyond this surfaces as a
/// transport failure.
pub const TIMEOUT_SECS: u64 = 300;

/// Health probe path on the processing service.
pub const HEALTH_PATH: &str = "/health";

/// Status string reported by a healthy service.
pub const HEALTHY_STATUS: &str = "healthy";

// =============================================================================
// EMBEDDING
// =============================================================================

/// Default vector store provider.
pub const EMBED_PROVIDER: &str = "huggingface";

/// Default embedding model for terminology lookups.
pub const EMBED_MODEL: &str = "BAAI/bge-m3";

// =============================================================================
// LLM
// =============================================================================

/// Default LLM provider for generation-style workflows.
pub const LLM_PROVIDER: &str = "ollama";

/// Default LLM model for generation-style workflows.
pub const LLM_MODEL: &str = "qwen2.5:7b";

// =============================================================================
// DISPLAY
// =============================================================================

/// Decimal places used when displaying similarity scores.
pub const SCORE_DECIMALS: usize = 3;

/// Placeholder shown when the service did not return a distance.
pub const MISSING_SCORE: &str = "n/a";
