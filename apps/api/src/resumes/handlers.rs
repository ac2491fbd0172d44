use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use bytes::Bytes;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{AppError, FieldError};
use crate::models::{ResumeDocument, ResumeRecord};
use crate::resumes::upload::parse_upload;
use crate::resumes::validation::validate_resume;
use crate::retrieval::indexer::{index_resume, reindex_resume};
use crate::state::AppState;

/// Owner assigned when the request does not name one. There is no auth layer.
pub const DEFAULT_OWNER: &str = "test-user";
pub const OWNER_HEADER: &str = "x-user-id";

fn owner_from(headers: &HeaderMap) -> String {
    headers
        .get(OWNER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_OWNER)
        .to_string()
}

/// Ids that do not parse name no stored resume, so they are simply not found.
fn resume_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::NotFound(format!("Resume {raw} not found")))
}

/// Rebuilds the resume's fragments, then drops them again if the resume was
/// deleted while they were being embedded.
async fn refresh_fragments(state: &AppState, id: Uuid, doc: &ResumeDocument) -> Result<(), AppError> {
    reindex_resume(state.suggestions.as_ref(), state.embedder.as_ref(), id, doc).await;
    if state.resumes.get(id).await?.is_none() {
        warn!(resume_id = %id, "Resume deleted during reindex; dropping its fragments");
        state.suggestions.delete_all(id).await?;
    }
    Ok(())
}

/// Deserializes and validates a full document. Nothing invalid gets past here.
fn checked_document(body: Value) -> Result<ResumeDocument, AppError> {
    let doc: ResumeDocument = serde_json::from_value(body)
        .map_err(|e| AppError::Validation(vec![FieldError::new("body", e.to_string())]))?;

    let errors = validate_resume(&doc);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    Ok(doc)
}

/// POST /api/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<ResumeRecord>), AppError> {
    let doc = checked_document(body)?;
    let record = state
        .resumes
        .create(ResumeRecord::new(owner_from(&headers), doc))
        .await?;
    info!(resume_id = %record.id, user_id = %record.user_id, "Resume created");

    index_resume(
        state.suggestions.as_ref(),
        state.embedder.as_ref(),
        record.id,
        &record.data,
    )
    .await;

    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/resumes/:id
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<ResumeRecord>, AppError> {
    let id = resume_id(&id)?;
    let doc = checked_document(body)?;
    let record = state
        .resumes
        .update(id, doc)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    info!(resume_id = %id, "Resume updated");

    refresh_fragments(&state, id, &record.data).await?;

    Ok(Json(record))
}

/// GET /api/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResumeRecord>, AppError> {
    let id = resume_id(&id)?;
    let record = state
        .resumes
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(Json(record))
}

/// GET /api/resumes/user/:user_id
pub async fn handle_list_user_resumes(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<ResumeRecord>>, AppError> {
    let resumes = state.resumes.list_by_owner(&user_id).await?;
    Ok(Json(resumes))
}

/// DELETE /api/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = resume_id(&id)?;
    if !state.resumes.delete(id).await? {
        return Err(AppError::NotFound(format!("Resume {id} not found")));
    }
    state.suggestions.delete_all(id).await?;
    info!(resume_id = %id, "Resume deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/resume/upload
///
/// Returns a pre-filled document for the form; nothing is stored.
pub async fn handle_upload_resume(
    mut multipart: Multipart,
) -> Result<Json<ResumeDocument>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes: Bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

        info!(%filename, size = bytes.len(), "Parsing uploaded resume");
        let doc = parse_upload(&filename, &bytes)?;
        return Ok(Json(doc));
    }

    Err(AppError::BadRequest("No file uploaded".to_string()))
}
