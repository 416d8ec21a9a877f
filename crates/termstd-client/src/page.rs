//! Page-scoped state for one mounted workflow.
//!
//! A page owns its toggle set, option values, input text and orchestrator.
//! Nothing is shared between pages, and nothing outlives the page.

use std::sync::Arc;

use tracing::{debug, info};

use termstd_core::{
    CategoryToggleSet, EmbeddingOptions, Error, LlmOptions, RequestOptions, Result,
    SubmissionError, Transport, TransportResponse, Workflow, WorkflowSpec,
};

use crate::orchestrator::{PendingSubmission, Phase, RequestOrchestrator, SubmissionState};

pub struct WorkflowPage {
    workflow: Workflow,
    spec: WorkflowSpec,
    categories: CategoryToggleSet,
    embedding: Option<EmbeddingOptions>,
    llm: Option<LlmOptions>,
    input: String,
    orchestrator: RequestOrchestrator,
}

impl WorkflowPage {
    /// Mount a page with the workflow's default state.
    pub fn mount(workflow: Workflow, transport: Arc<dyn Transport>) -> Result<Self> {
        let spec = workflow.spec();
        let categories = CategoryToggleSet::from_spec(&spec)?;

        info!(workflow = %workflow, categories = categories.len(), "Page mounted");

        Ok(Self {
            workflow,
            spec,
            categories,
            embedding: spec
                .default_embedding
                .as_ref()
                .map(EmbeddingOptions::from_defaults),
            llm: spec.default_llm.as_ref().map(LlmOptions::from_defaults),
            input: String::new(),
            orchestrator: RequestOrchestrator::new(workflow, transport),
        })
    }

    /// Post to `endpoint` instead of the workflow's default path.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.orchestrator = self.orchestrator.with_endpoint(endpoint);
        self
    }

    pub fn workflow(&self) -> Workflow {
        self.workflow
    }

    pub fn spec(&self) -> &WorkflowSpec {
        &self.spec
    }

    pub fn categories(&self) -> &CategoryToggleSet {
        &self.categories
    }

    /// Change one category (or the aggregate). Unknown keys are rejected.
    pub fn toggle(&mut self, key: &str, checked: bool) -> Result<()> {
        let event = self.categories.event(key, checked)?;
        self.categories.toggle(event);
        Ok(())
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn embedding_options(&self) -> Option<&EmbeddingOptions> {
        self.embedding.as_ref()
    }

    /// Update an embedding option by wire name (`provider`, `model`,
    /// `dbName`, `collectionName`).
    pub fn set_embedding_field(&mut self, name: &str, value: &str) -> Result<()> {
        match self.embedding.as_mut() {
            Some(options) => options.set_field(name, value),
            None => Err(Error::UnknownOptionField(format!(
                "{} (workflow {} has no embedding options)",
                name, self.workflow
            ))),
        }
    }

    pub fn llm_options(&self) -> Option<&LlmOptions> {
        self.llm.as_ref()
    }

    /// Update an LLM option (`provider` or `model`).
    pub fn set_llm_field(&mut self, name: &str, value: &str) -> Result<()> {
        let options = self.llm.as_mut().ok_or_else(|| {
            Error::UnknownOptionField(format!(
                "{} (workflow {} has no LLM options)",
                name, self.workflow
            ))
        })?;
        match name {
            "provider" => options.provider = value.to_string(),
            "model" => options.model = value.to_string(),
            other => return Err(Error::UnknownOptionField(other.to_string())),
        }
        debug!(field = name, value, "LLM option updated");
        Ok(())
    }

    pub fn request_options(&self) -> RequestOptions {
        RequestOptions {
            embedding: self.embedding.clone(),
            llm: self.llm.clone(),
        }
    }

    pub fn state(&self) -> &SubmissionState {
        self.orchestrator.state()
    }

    pub fn phase(&self) -> Phase {
        self.orchestrator.phase()
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.orchestrator.is_mounted() && !self.orchestrator.is_loading()
    }

    /// Submit the current input, categories and options.
    ///
    /// While a submission is loading this is refused: the state is returned
    /// untouched and no transport call is made.
    pub async fn submit(&mut self) -> &SubmissionState {
        if !self.can_submit() {
            debug!(workflow = %self.workflow, "Submit refused while loading");
            return self.orchestrator.state();
        }
        let snapshot = self.categories.snapshot();
        let options = self.request_options();
        self.orchestrator.submit(&self.input, snapshot, options).await
    }

    /// Two-phase submit for callers that run the transport themselves.
    /// Returns `None` when refused or when validation fails.
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        if !self.can_submit() {
            debug!(workflow = %self.workflow, "Submit refused while loading");
            return None;
        }
        let snapshot = self.categories.snapshot();
        let options = self.request_options();
        self.orchestrator.begin(&self.input, snapshot, options)
    }

    /// Apply an outcome from [`WorkflowPage::begin_submit`].
    pub fn complete(
        &mut self,
        pending: PendingSubmission,
        outcome: std::result::Result<TransportResponse, SubmissionError>,
    ) -> bool {
        self.orchestrator.complete(pending, outcome)
    }

    /// Tear the page down. Late outcomes are discarded.
    pub fn unmount(&mut self) {
        self.orchestrator.unmount();
        info!(workflow = %self.workflow, "Page unmounted");
    }
}

impl std::fmt::Debug for WorkflowPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowPage")
            .field("workflow", &self.workflow)
            .field("categories", &self.categories)
            .field("embedding", &self.embedding)
            .field("llm", &self.llm)
            .field("phase", &self.phase())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use termstd_core::EmbeddingProvider;

    fn finance_page(mock: &MockTransport) -> WorkflowPage {
        WorkflowPage::mount(Workflow::FinanceStd, Arc::new(mock.clone())).unwrap()
    }

    #[test]
    fn test_mount_defaults() {
        let mock = MockTransport::new();
        let page = finance_page(&mock);

        assert_eq!(page.phase(), Phase::Idle);
        assert!(page.categories().all_selected());
        assert_eq!(page.categories().len(), 10);
        assert_eq!(page.input(), "");
        assert!(page.can_submit());

        let embedding = page.embedding_options().unwrap();
        assert_eq!(embedding.provider, EmbeddingProvider::HuggingFace);
        assert_eq!(embedding.model, "BAAI/bge-m3");
        assert_eq!(embedding.db_name, "finance_bge_m3");
        assert_eq!(embedding.collection_name, "finance_terms");
        assert!(page.llm_options().is_none());
    }

    #[test]
    fn test_every_workflow_mounts() {
        for workflow in Workflow::ALL {
            let page = WorkflowPage::mount(workflow, Arc::new(MockTransport::new())).unwrap();
            assert!(page.categories().all_selected());
        }
    }

    #[test]
    fn test_toggle_rejects_unknown_key() {
        let mock = MockTransport::new();
        let mut page = finance_page(&mock);
        assert!(matches!(
            page.toggle("crypto", false),
            Err(Error::UnknownCategory(_))
        ));
        assert!(page.categories().all_selected());
    }

    #[test]
    fn test_toggle_updates_aggregate() {
        let mock = MockTransport::new();
        let mut page = finance_page(&mock);

        page.toggle("banking", false).unwrap();
        assert!(!page.categories().all_selected());

        page.toggle("banking", true).unwrap();
        assert!(page.categories().all_selected());
    }

    #[test]
    fn test_set_embedding_field_on_workflow_without_options() {
        let mut page = WorkflowPage::mount(Workflow::Ner, Arc::new(MockTransport::new())).unwrap();
        assert!(page.set_embedding_field("model", "x").is_err());
        page.set_llm_field("model", "llama3").unwrap();
        assert_eq!(page.llm_options().unwrap().model, "llama3");
        assert!(page.set_llm_field("temperature", "0.2").is_err());
    }

    #[tokio::test]
    async fn test_submit_sends_page_state() {
        let mock = MockTransport::new().with_body(r#"{"message":"ok"}"#);
        let mut page = finance_page(&mock);

        page.toggle("insurance", false).unwrap();
        page.set_embedding_field("provider", "bedrock").unwrap();
        page.set_input("term life premium");

        let state = page.submit().await;
        assert_eq!(state.phase(), Phase::Succeeded);

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        let payload = &calls[0].payload;
        assert_eq!(payload.text, "term life premium");
        assert_eq!(payload.term_categories.get("insurance"), Some(false));
        assert_eq!(payload.term_categories.get("all_finance_terms"), Some(false));
        assert_eq!(
            payload.embedding_options.as_ref().unwrap().provider,
            EmbeddingProvider::Bedrock
        );
    }

    #[tokio::test]
    async fn test_submit_blank_input_makes_no_call() {
        let mock = MockTransport::new();
        let mut page = finance_page(&mock);
        page.set_input("\n\t ");

        let state = page.submit().await;
        assert_eq!(state.error_message().as_deref(), Some("input text required"));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_refused_while_loading() {
        let mock = MockTransport::new();
        let mut page = finance_page(&mock);
        page.set_input("cash flow");

        let pending = page.begin_submit().unwrap();
        assert_eq!(page.phase(), Phase::Loading);
        assert!(!page.can_submit());

        assert!(page.begin_submit().is_none());
        assert_eq!(page.submit().await.phase(), Phase::Loading);
        assert_eq!(mock.call_count(), 0);

        assert!(page.complete(pending, Ok(TransportResponse::ok(r#"{"message":"ok"}"#))));
        assert_eq!(page.phase(), Phase::Succeeded);
        assert!(page.can_submit());
    }

    #[test]
    fn test_unmount_discards_late_outcome() {
        let mut page = finance_page(&MockTransport::new());
        page.set_input("equity");

        let pending = page.begin_submit().unwrap();
        page.unmount();

        assert!(!page.complete(pending, Ok(TransportResponse::ok(r#"{"message":"late"}"#))));
        assert!(page.state().result().is_none());
        assert!(!page.can_submit());
    }
}
