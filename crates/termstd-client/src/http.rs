//! HTTP transport for the processing service.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use termstd_core::{
    defaults, Error, RequestPayload, Result, SubmissionError, Transport, TransportResponse,
};

use crate::config::ClientConfig;

/// Health report returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

impl ServiceHealth {
    pub fn is_healthy(&self) -> bool {
        self.status == defaults::HEALTHY_STATUS
    }
}

/// reqwest-backed transport. One attempt per call, no retries.
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Create a new transport with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "Initializing HTTP transport: url={}, timeout={}s",
            config.base_url, config.timeout_seconds
        );

        Ok(Self { client, config })
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Probe the service health endpoint.
    pub async fn health_check(&self) -> Result<ServiceHealth> {
        let url = self.config.url_for(defaults::HEALTH_PATH);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Request(format!("Health check failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Request(format!(
                "Health check returned status {}",
                status.as_u16()
            )));
        }

        let health: ServiceHealth = response
            .json()
            .await
            .map_err(|e| Error::Request(format!("Failed to parse health response: {}", e)))?;

        debug!(status = %health.status, service = ?health.service, "Health check complete");
        Ok(health)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        endpoint: &str,
        payload: &RequestPayload,
    ) -> std::result::Result<TransportResponse, SubmissionError> {
        let url = self.config.url_for(endpoint);
        let start = Instant::now();
        debug!(endpoint = %url, input_len = payload.text.len(), "Sending request");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| request_error(e, self.config.timeout_seconds))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| request_error(e, self.config.timeout_seconds))?;

        let duration_ms = start.elapsed().as_millis() as u64;

        if !(200..300).contains(&status) {
            warn!(endpoint = %url, status, duration_ms, "Service returned error status");
            return Err(SubmissionError::transport(Some(status), embedded_message(&body)));
        }

        debug!(endpoint = %url, status, duration_ms, response_len = body.len(), "Request complete");
        Ok(TransportResponse { status, body })
    }
}

fn request_error(err: reqwest::Error, timeout_seconds: u64) -> SubmissionError {
    let status = err.status().map(|s| s.as_u16());
    let message = if err.is_timeout() {
        format!("Request timed out after {}s", timeout_seconds)
    } else {
        format!("Request failed: {}", err)
    };
    SubmissionError::transport(status, Some(message))
}

/// Message embedded in an error body: `detail` (string or validation list),
/// `message`, or `error`.
fn embedded_message(body: &str) -> Option<String> {
    let value: JsonValue = serde_json::from_str(body).ok()?;

    ["detail", "message", "error"]
        .iter()
        .filter_map(|key| value.get(key))
        .find_map(message_of)
}

fn message_of(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) if !s.trim().is_empty() => Some(s.clone()),
        JsonValue::Object(map) => map
            .get("message")
            .or_else(|| map.get("msg"))
            .and_then(message_of),
        JsonValue::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(message_of).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        _ => None,
    }
}
