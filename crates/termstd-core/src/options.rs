//! Per-workflow request options: vector store and LLM configuration.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{EmbeddingDefaults, LlmDefaults};
use crate::error::{Error, Result};

/// Vector store provider backing a terminology lookup.
///
/// Free text is accepted and passed through as [`EmbeddingProvider::Other`];
/// only the named providers are meaningful to the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmbeddingProvider {
    /// Hugging Face sentence-transformer models (default)
    #[default]
    HuggingFace,
    /// OpenAI embeddings API
    OpenAI,
    /// AWS Bedrock embeddings
    Bedrock,
    /// Unrecognized provider name, kept verbatim
    Other(String),
}

impl EmbeddingProvider {
    /// Whether the provider is one the service knows how to use.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl std::fmt::Display for EmbeddingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HuggingFace => write!(f, "huggingface"),
            Self::OpenAI => write!(f, "openai"),
            Self::Bedrock => write!(f, "bedrock"),
            Self::Other(name) => write!(f, "{}", name),
        }
    }
}

impl std::str::FromStr for EmbeddingProvider {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "huggingface" => Self::HuggingFace,
            "openai" => Self::OpenAI,
            "bedrock" => Self::Bedrock,
            _ => Self::Other(s.to_string()),
        })
    }
}

impl From<String> for EmbeddingProvider {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(provider) => provider,
            Err(never) => match never {},
        }
    }
}

impl From<EmbeddingProvider> for String {
    fn from(provider: EmbeddingProvider) -> Self {
        provider.to_string()
    }
}

/// Vector database options sent with terminology workflows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingOptions {
    pub provider: EmbeddingProvider,
    pub model: String,
    pub db_name: String,
    pub collection_name: String,
}

impl EmbeddingOptions {
    pub fn from_defaults(defaults: &EmbeddingDefaults) -> Self {
        Self {
            provider: defaults.provider.to_string().into(),
            model: defaults.model.to_string(),
            db_name: defaults.db_name.to_string(),
            collection_name: defaults.collection_name.to_string(),
        }
    }

    /// Update one field by its wire name, as a form change handler would.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "provider" => {
                self.provider = value.to_string().into();
                if !self.provider.is_known() {
                    warn!(provider = value, "Unrecognized embedding provider, sending as-is");
                }
            }
            "model" => self.model = value.to_string(),
            "dbName" => self.db_name = value.to_string(),
            "collectionName" => self.collection_name = value.to_string(),
            other => return Err(Error::UnknownOptionField(other.to_string())),
        }
        debug!(field = name, value, "Embedding option updated");
        Ok(())
    }
}

/// LLM options for workflows that run a generation model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmOptions {
    pub provider: String,
    pub model: String,
}

impl LlmOptions {
    pub fn from_defaults(defaults: &LlmDefaults) -> Self {
        Self {
            provider: defaults.provider.to_string(),
            model: defaults.model.to_string(),
        }
    }
}

/// Options carried alongside the text and category snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub embedding: Option<EmbeddingOptions>,
    pub llm: Option<LlmOptions>,
}
