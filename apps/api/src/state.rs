use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmGateway;
use crate::scoring::SimilarityScorer;
use crate::session::SessionStore;

/// Shared application state. Injected into route handlers via Axum extractors and
/// handed to the terminal adapter as-is.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable completion backend. Default: `OpenAiGateway`; tests use `StubGateway`.
    pub gateway: Arc<dyn LlmGateway>,
    /// Pluggable lexical scorer. Default: `TfIdfScorer`.
    pub scorer: Arc<dyn SimilarityScorer>,
    pub sessions: Arc<dyn SessionStore>,
    pub config: Config,
}

#[cfg(test)]
impl AppState {
    /// State wired with a stub gateway, the real scorer and a fresh in-memory store.
    pub fn for_tests(gateway: Arc<dyn LlmGateway>) -> Self {
        AppState {
            gateway,
            scorer: Arc::new(crate::scoring::TfIdfScorer::new()),
            sessions: Arc::new(crate::session::InMemorySessionStore::new()),
            config: Config::for_tests(),
        }
    }
}
