//! Static workflow catalog.
//!
//! Each workflow page is described by a [`WorkflowSpec`]: the toggleable
//! category keys with their labels, the aggregate key, the service endpoint
//! and the default option values. All of it is fixed at build time.

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::Error;

/// One toggleable category of a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDef {
    pub key: &'static str,
    pub label: &'static str,
}

impl CategoryDef {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Suggested vector store options for a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddingDefaults {
    pub provider: &'static str,
    pub model: &'static str,
    pub db_name: &'static str,
    pub collection_name: &'static str,
}

/// Suggested LLM options for a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmDefaults {
    pub provider: &'static str,
    pub model: &'static str,
}

/// Static description of one workflow page.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowSpec {
    pub categories: &'static [CategoryDef],
    /// Reserved aggregate key ("select all").
    pub all_key: &'static str,
    pub all_label: &'static str,
    pub default_embedding: Option<EmbeddingDefaults>,
    pub default_llm: Option<LlmDefaults>,
}

impl WorkflowSpec {
    pub fn category_keys(&self) -> impl Iterator<Item = &'static str> {
        self.categories.iter().map(|c| c.key)
    }

    pub fn label_for(&self, key: &str) -> Option<&'static str> {
        if key == self.all_key {
            return Some(self.all_label);
        }
        self.categories
            .iter()
            .find(|c| c.key == key)
            .map(|c| c.label)
    }
}

/// The workflow pages of the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Workflow {
    /// Named entity recognition
    Ner,
    /// Medical terminology standardization
    MedicalStd,
    /// Financial term standardization
    FinanceStd,
    /// Text correction
    Correction,
    /// Abbreviation expansion
    Abbreviation,
    /// Text generation
    Generation,
}

impl Workflow {
    /// All workflows in navigation order.
    pub const ALL: [Workflow; 6] = [
        Workflow::Ner,
        Workflow::MedicalStd,
        Workflow::FinanceStd,
        Workflow::Correction,
        Workflow::Abbreviation,
        Workflow::Generation,
    ];

    /// Route slug used by the navigation shell.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Ner => "ner",
            Self::MedicalStd => "stand",
            Self::FinanceStd => "fin-std",
            Self::Correction => "corr",
            Self::Abbreviation => "abbr",
            Self::Generation => "gen",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Ner => "Named Entity Recognition",
            Self::MedicalStd => "Medical Term Standardization",
            Self::FinanceStd => "Financial Term Standardization",
            Self::Correction => "Text Correction",
            Self::Abbreviation => "Abbreviation Expansion",
            Self::Generation => "Text Generation",
        }
    }

    /// Service path the workflow posts to.
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            Self::Ner => "/api/ner",
            Self::MedicalStd => "/api/std",
            Self::FinanceStd => "/api/fin-std",
            Self::Correction => "/api/corr",
            Self::Abbreviation => "/api/abbr",
            Self::Generation => "/api/gen",
        }
    }

    pub fn spec(&self) -> WorkflowSpec {
        match self {
            Self::Ner => WorkflowSpec {
                categories: NER_CATEGORIES,
                all_key: "all_medical_entities",
                all_label: "All entity types",
                default_embedding: None,
                default_llm: Some(DEFAULT_LLM),
            },
            Self::MedicalStd => WorkflowSpec {
                categories: MEDICAL_CATEGORIES,
                all_key: "all_medical_terms",
                all_label: "All medical terms",
                default_embedding: Some(EmbeddingDefaults {
                    provider: defaults::EMBED_PROVIDER,
                    model: defaults::EMBED_MODEL,
                    db_name: "snomed_bge_m3",
                    collection_name: "concepts_only_name",
                }),
                default_llm: None,
            },
            Self::FinanceStd => WorkflowSpec {
                categories: FINANCE_CATEGORIES,
                all_key: "all_finance_terms",
                all_label: "All financial terms",
                default_embedding: Some(EmbeddingDefaults {
                    provider: defaults::EMBED_PROVIDER,
                    model: defaults::EMBED_MODEL,
                    db_name: "finance_bge_m3",
                    collection_name: "finance_terms",
                }),
                default_llm: None,
            },
            Self::Correction => WorkflowSpec {
                categories: CORRECTION_CATEGORIES,
                all_key: "all_correction_types",
                all_label: "All correction types",
                default_embedding: None,
                default_llm: Some(DEFAULT_LLM),
            },
            Self::Abbreviation => WorkflowSpec {
                categories: ABBREVIATION_CATEGORIES,
                all_key: "all_abbreviation_terms",
                all_label: "All abbreviation domains",
                default_embedding: None,
                default_llm: Some(DEFAULT_LLM),
            },
            Self::Generation => WorkflowSpec {
                categories: GENERATION_CATEGORIES,
                all_key: "all_generation_sections",
                all_label: "All sections",
                default_embedding: None,
                default_llm: Some(DEFAULT_LLM),
            },
        }
    }
}

impl std::fmt::Display for Workflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for Workflow {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ner" => Ok(Self::Ner),
            "stand" | "std" | "medical_std" => Ok(Self::MedicalStd),
            "fin-std" | "finance_std" => Ok(Self::FinanceStd),
            "corr" | "correction" => Ok(Self::Correction),
            "abbr" | "abbreviation" => Ok(Self::Abbreviation),
            "gen" | "generation" => Ok(Self::Generation),
            _ => Err(Error::UnknownWorkflow(s.to_string())),
        }
    }
}

const DEFAULT_LLM: LlmDefaults = LlmDefaults {
    provider: defaults::LLM_PROVIDER,
    model: defaults::LLM_MODEL,
};

const NER_CATEGORIES: &[CategoryDef] = &[
    CategoryDef::new("disease", "Disease"),
    CategoryDef::new("symptom", "Symptom"),
    CategoryDef::new("drug", "Drug"),
    CategoryDef::new("procedure", "Procedure"),
    CategoryDef::new("anatomy", "Anatomy"),
    CategoryDef::new("lab_test", "Lab test"),
];

const MEDICAL_CATEGORIES: &[CategoryDef] = &[
    CategoryDef::new("disease", "Disease"),
    CategoryDef::new("symptom", "Symptom"),
    CategoryDef::new("procedure", "Procedure"),
    CategoryDef::new("medicine", "Medicine"),
    CategoryDef::new("anatomy", "Anatomy"),
    CategoryDef::new("observation", "Observation"),
];

const FINANCE_CATEGORIES: &[CategoryDef] = &[
    CategoryDef::new("investment", "Investment"),
    CategoryDef::new("banking", "Banking"),
    CategoryDef::new("insurance", "Insurance"),
    CategoryDef::new("securities", "Securities"),
    CategoryDef::new("accounting", "Accounting"),
    CategoryDef::new("economics", "Economics"),
    CategoryDef::new("derivatives", "Derivatives"),
    CategoryDef::new("real_estate", "Real estate"),
    CategoryDef::new("fintech", "Fintech"),
    CategoryDef::new("regulation", "Regulation"),
];

const CORRECTION_CATEGORIES: &[CategoryDef] = &[
    CategoryDef::new("spelling", "Spelling"),
    CategoryDef::new("grammar", "Grammar"),
    CategoryDef::new("punctuation", "Punctuation"),
    CategoryDef::new("terminology", "Terminology"),
];

const ABBREVIATION_CATEGORIES: &[CategoryDef] = &[
    CategoryDef::new("clinical", "Clinical"),
    CategoryDef::new("pharmacy", "Pharmacy"),
    CategoryDef::new("laboratory", "Laboratory"),
    CategoryDef::new("anatomy", "Anatomy"),
];

const GENERATION_CATEGORIES: &[CategoryDef] = &[
    CategoryDef::new("chief_complaint", "Chief complaint"),
    CategoryDef::new("history", "History"),
    CategoryDef::new("diagnosis", "Diagnosis"),
    CategoryDef::new("treatment_plan", "Treatment plan"),
];
