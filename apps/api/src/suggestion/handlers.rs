use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::{ResumeDocument, ResumeDraft};
use crate::state::AppState;
use crate::suggestion::compose::compose_resume;
use crate::suggestion::pipeline::{run_suggestion, RequestState, SuggestionDeps, SuggestionRequest};
use crate::suggestion::result::SuggestionResult;

#[derive(Serialize)]
pub struct SuggestionResponse {
    pub suggestion: SuggestionResult,
}

/// `currentData` may be absent or `null`; both mean an empty draft.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResumeRequest {
    #[serde(default)]
    pub current_data: Option<ResumeDraft>,
}

/// POST /api/suggest
pub async fn handle_suggest(
    State(state): State<AppState>,
    Json(req): Json<SuggestionRequest>,
) -> Result<Json<SuggestionResponse>, AppError> {
    let deps = SuggestionDeps {
        store: state.suggestions.as_ref(),
        embedder: state.embedder.as_ref(),
        llm: state.llm.as_ref(),
    };

    match run_suggestion(&deps, &req).await {
        (_, Ok(suggestion)) => {
            info!(section = %req.section, state = %RequestState::Responded);
            Ok(Json(SuggestionResponse { suggestion }))
        }
        (_, Err(e)) => {
            warn!(section = %req.section, state = %RequestState::ErrorResponded);
            Err(e)
        }
    }
}

/// POST /api/generate-resume
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    Json(req): Json<GenerateResumeRequest>,
) -> Result<Json<ResumeDocument>, AppError> {
    let resume = compose_resume(
        state.llm.as_ref(),
        req.current_data.unwrap_or_default(),
        state.config.generation_concurrency,
    )
    .await?;
    Ok(Json(resume))
}
