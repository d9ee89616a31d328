use std::sync::Arc;

use crate::config::Config;
use crate::knowledge_base::KnowledgeBase;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after bootstrap.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup. Degraded when the dataset could not be used.
    pub knowledge_base: Arc<KnowledgeBase>,
    /// Completion backend. `LlmClient` in production, stubs in tests.
    pub llm: Arc<dyn CompletionClient>,
    pub config: Config,
}
