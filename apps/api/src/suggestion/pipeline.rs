//! Per-request suggestion flow:
//!
//! RECEIVED → CONTEXT_ASSEMBLED → GENERATING → VALIDATED → RESPONDED
//!                                          ↘ FAILED → ERROR_RESPONDED
//!
//! Stateless between requests. The two upstream calls (embedding, then chat)
//! are sequential because the chat prompt needs the context string.

use std::fmt;

use serde::Deserialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::retrieval::context::assemble_context;
use crate::retrieval::embedder::Embedder;
use crate::storage::SuggestionStore;
use crate::suggestion::generator::{generate_suggestion, ChatCompleter};
use crate::suggestion::result::SuggestionResult;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub section: String,
    pub content: String,
    /// Free-form; anything that is not a stored resume id yields no context.
    #[serde(default)]
    pub resume_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Received,
    ContextAssembled,
    Generating,
    Validated,
    Responded,
    Failed,
    ErrorResponded,
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestState::Received => "RECEIVED",
            RequestState::ContextAssembled => "CONTEXT_ASSEMBLED",
            RequestState::Generating => "GENERATING",
            RequestState::Validated => "VALIDATED",
            RequestState::Responded => "RESPONDED",
            RequestState::Failed => "FAILED",
            RequestState::ErrorResponded => "ERROR_RESPONDED",
        };
        f.write_str(name)
    }
}

/// Collaborators the pipeline needs, borrowed from `AppState`.
pub struct SuggestionDeps<'a> {
    pub store: &'a dyn SuggestionStore,
    pub embedder: &'a dyn Embedder,
    pub llm: &'a dyn ChatCompleter,
}

/// Runs one suggestion request and returns the last state reached with the
/// outcome. The state is `Validated` on success and `Failed` on error; the
/// HTTP layer performs the final transition when it writes the response.
pub async fn run_suggestion(
    deps: &SuggestionDeps<'_>,
    request: &SuggestionRequest,
) -> (RequestState, Result<SuggestionResult, AppError>) {
    let section = request.section.as_str();
    let mut state = RequestState::Received;
    info!(section, resume_id = ?request.resume_id, %state, "Suggestion requested");

    let context = assemble_context(
        deps.store,
        deps.embedder,
        request.resume_id.as_deref(),
        &request.content,
    )
    .await;
    state = RequestState::ContextAssembled;
    info!(section, with_context = !context.is_empty(), %state);

    state = RequestState::Generating;
    info!(section, %state);

    match generate_suggestion(deps.llm, section, &request.content, &context).await {
        Ok(result) => {
            state = RequestState::Validated;
            info!(section, %state);
            (state, Ok(result))
        }
        Err(e) => {
            state = RequestState::Failed;
            error!(section, %state, "Failed to get AI suggestion: {e}");
            (state, Err(e))
        }
    }
}
