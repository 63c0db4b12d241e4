use std::sync::Arc;

use crate::keywords::source::KeywordSource;
use crate::llm_client::LlmClient;
use crate::research::dispatcher::WorkflowDispatcher;
use crate::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Pluggable worksheet backend. Default: Google Sheets; CSV when configured.
    pub keywords: Arc<dyn KeywordSource>,
    pub dispatcher: WorkflowDispatcher,
    pub sessions: SessionStore,
}
