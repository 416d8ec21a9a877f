//! Wire payloads and the normalized display model.

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::options::{EmbeddingOptions, LlmOptions, RequestOptions};
use crate::toggle::CategorySnapshot;

// =============================================================================
// REQUEST
// =============================================================================

/// Body posted to a workflow endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayload {
    pub text: String,
    pub term_categories: CategorySnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding_options: Option<EmbeddingOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_options: Option<LlmOptions>,
}

impl RequestPayload {
    pub fn new(
        text: impl Into<String>,
        categories: CategorySnapshot,
        options: RequestOptions,
    ) -> Self {
        Self {
            text: text.into(),
            term_categories: categories,
            embedding_options: options.embedding,
            llm_options: options.llm,
        }
    }
}

// =============================================================================
// DISPLAY MODEL
// =============================================================================

/// Renderable result of a successful submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayModel {
    pub message: String,
    pub groups: Vec<TermGroup>,
}

impl DisplayModel {
    /// A message-only result with no term groups.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            groups: Vec::new(),
        }
    }

    pub fn match_count(&self) -> usize {
        self.groups.iter().map(|g| g.matches.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Candidate matches for one fragment of the input text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermGroup {
    pub original: String,
    pub matches: Vec<TermMatch>,
}

/// One candidate standardized term.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermMatch {
    pub name: String,
    pub category: String,
    pub term_type: String,
    /// `1 - distance` rounded to three places, unclamped. `None` when the
    /// service sent no distance.
    pub similarity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<String>,
}

/// Similarity score for a service distance: `1 - distance` rounded to
/// [`defaults::SCORE_DECIMALS`] places. Out-of-range distances pass through.
pub fn similarity_from_distance(distance: f64) -> f64 {
    let scale = 10f64.powi(defaults::SCORE_DECIMALS as i32);
    ((1.0 - distance) * scale).round() / scale
}

impl TermMatch {

    /// Similarity formatted for display, e.g. `"0.877"`.
    pub fn display_similarity(&self) -> String {
        match self.similarity {
            Some(s) => format!("{:.*}", defaults::SCORE_DECIMALS, s),
            None => defaults::MISSING_SCORE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Workflow;
    use crate::toggle::CategoryToggleSet;

    fn scored(similarity: Option<f64>) -> TermMatch {
        TermMatch {
            name: "Investment Portfolio".to_string(),
            similarity,
            ..Default::default()
        }
    }

    #[test]
    fn test_display_similarity_three_places() {
        assert_eq!(scored(Some(1.0 - 0.123)).display_similarity(), "0.877");
        assert_eq!(scored(Some(1.0 - 0.05)).display_similarity(), "0.950");
    }

    #[test]
    fn test_display_similarity_out_of_range_passes_through() {
        assert_eq!(scored(Some(1.0 - 1.25)).display_similarity(), "-0.250");
        assert_eq!(scored(Some(1.0 - -0.5)).display_similarity(), "1.500");
    }

    #[test]
    fn test_display_similarity_missing() {
        assert_eq!(scored(None).display_similarity(), "n/a");
    }

    #[test]
    fn test_similarity_from_distance_rounds() {
        assert_eq!(similarity_from_distance(0.7), 0.3);
        assert_eq!(similarity_from_distance(0.12346), 0.877);
        assert_eq!(similarity_from_distance(1.4), -0.4);
    }

    #[test]
    fn test_similarity_serializes_rounded() {
        let hit = scored(Some(similarity_from_distance(0.7)));
        let json = serde_json::to_value(&hit).unwrap();
        assert_eq!(json["similarity"], serde_json::json!(0.3));
        let text = serde_json::to_string(&hit).unwrap();
        assert!(text.contains(r#""similarity":0.3"#), "{}", text);
        assert!(!text.contains("0.30000"), "{}", text);
    }

    #[test]
    fn test_payload_wire_shape() {
        let spec = Workflow::FinanceStd.spec();
        let toggles = CategoryToggleSet::from_spec(&spec).unwrap();
        let options = RequestOptions {
            embedding: spec
                .default_embedding
                .as_ref()
                .map(EmbeddingOptions::from_defaults),
            llm: None,
        };

        let payload = RequestPayload::new("investment portfolio", toggles.snapshot(), options);
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["text"], "investment portfolio");
        assert_eq!(value["termCategories"]["all_finance_terms"], true);
        assert_eq!(value["embeddingOptions"]["dbName"], "finance_bge_m3");
        assert!(value.get("llmOptions").is_none());
    }

    #[test]
    fn test_payload_omits_embedding_when_absent() {
        let spec = Workflow::Generation.spec();
        let toggles = CategoryToggleSet::from_spec(&spec).unwrap();
        let options = RequestOptions {
            embedding: None,
            llm: spec.default_llm.as_ref().map(LlmOptions::from_defaults),
        };

        let value =
            serde_json::to_value(RequestPayload::new("note", toggles.snapshot(), options)).unwrap();
        assert!(value.get("embeddingOptions").is_none());
        assert_eq!(value["llmOptions"]["provider"], "ollama");
    }

    #[test]
    fn test_match_count() {
        let model = DisplayModel {
            message: "done".to_string(),
            groups: vec![
                TermGroup {
                    original: "a".to_string(),
                    matches: vec![scored(Some(0.5)), scored(Some(0.4))],
                },
                TermGroup {
                    original: "b".to_string(),
                    matches: vec![scored(None)],
                },
            ],
        };
        assert_eq!(model.match_count(), 3);
        assert!(!model.is_empty());
        assert!(DisplayModel::message_only("x").is_empty());
    }
}
