//! Context assembly by nearest-neighbour lookup over a resume's stored fragments.
//!
//! Flow: get_all(resume_id) → embed(query) → rank(k = 3) → join texts under a
//! fixed header. Any failure degrades to an empty context; suggestions must
//! still be generated without it.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::retrieval::embedder::Embedder;
use crate::retrieval::similarity::rank;
use crate::storage::SuggestionStore;

pub const CONTEXT_HEADER: &str = "Here are some similar examples from existing resumes:";
pub const CONTEXT_TOP_K: usize = 3;

/// Builds the context block prepended to a suggestion prompt.
///
/// Returns `""` when the resume id is absent, blank or unknown, when it has no
/// stored fragments, or when any step fails.
pub async fn assemble_context(
    store: &dyn SuggestionStore,
    embedder: &dyn Embedder,
    resume_id: Option<&str>,
    query: &str,
) -> String {
    let Some(raw) = resume_id.map(str::trim).filter(|id| !id.is_empty()) else {
        return String::new();
    };
    let Ok(resume_id) = Uuid::parse_str(raw) else {
        debug!(resume_id = raw, "Resume id is not a stored id; skipping context");
        return String::new();
    };

    match try_assemble(store, embedder, resume_id, query).await {
        Ok(context) => context,
        Err(e) => {
            warn!(%resume_id, "Context assembly failed, continuing without context: {e}");
            String::new()
        }
    }
}

async fn try_assemble(
    store: &dyn SuggestionStore,
    embedder: &dyn Embedder,
    resume_id: Uuid,
    query: &str,
) -> Result<String, AppError> {
    let fragments = store.get_all(resume_id).await?;
    if fragments.is_empty() {
        debug!(%resume_id, "No stored fragments; skipping context");
        return Ok(String::new());
    }

    let query_vector = embedder.embed(query).await?;

    let candidates = fragments.iter().map(|f| (f.vector.as_slice(), f.text.as_str()));
    let ranked = rank(&query_vector, candidates, CONTEXT_TOP_K)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Ranking stored fragments failed: {e}")))?;

    debug!(
        %resume_id,
        candidates = fragments.len(),
        selected = ranked.len(),
        "Context assembled"
    );

    let body = ranked
        .iter()
        .map(|r| r.payload)
        .collect::<Vec<_>>()
        .join("\n");

    Ok(format!("{CONTEXT_HEADER}\n{body}\n\n"))
}
