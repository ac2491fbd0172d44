use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::retrieval::embedder::Embedder;
use crate::storage::{
    InMemoryResumeRepository, InMemorySuggestionStore, ResumeRepository, SuggestionStore,
};
use crate::suggestion::generator::ChatCompleter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub resumes: Arc<dyn ResumeRepository>,
    /// Embedded resume fragments used as retrieval context for suggestions.
    pub suggestions: Arc<dyn SuggestionStore>,
    pub embedder: Arc<dyn Embedder>,
    pub llm: Arc<dyn ChatCompleter>,
    pub config: Config,
}

impl AppState {
    /// In-memory stores with one `LlmClient` serving both chat and embeddings.
    pub fn in_memory(config: Config, llm: LlmClient) -> Self {
        let llm = Arc::new(llm);
        Self {
            resumes: Arc::new(InMemoryResumeRepository::new()),
            suggestions: Arc::new(InMemorySuggestionStore::new()),
            embedder: llm.clone(),
            llm,
            config,
        }
    }
}
