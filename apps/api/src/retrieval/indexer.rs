//! Best-effort embedding of a saved resume's prose into the suggestion store.
//!
//! Never fails the caller: persistence of the resume has already happened and
//! takes priority over enrichment.

use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{EmbeddingRecord, ResumeDocument};
use crate::retrieval::embedder::Embedder;
use crate::storage::SuggestionStore;

/// Text fragments worth retrieving later, tagged with their category.
/// Blank fragments are skipped.
pub fn fragments(doc: &ResumeDocument) -> Vec<(&'static str, String)> {
    let summary = std::iter::once(("summary", doc.summary.clone()));
    let experience = doc
        .experience
        .iter()
        .map(|exp| ("experience", exp.description.clone()));
    let education = doc.education.iter().map(|edu| {
        (
            "education",
            format!("{} in {} from {}", edu.degree, edu.field, edu.institution),
        )
    });

    summary
        .chain(experience)
        .chain(education)
        .filter(|(_, text)| !text.trim().is_empty())
        .collect()
}

/// Embeds and stores every fragment of `doc`. Stops at the first embedding
/// failure so an unreachable provider costs one timeout, not one per fragment.
/// Returns the number of fragments stored.
pub async fn index_resume(
    store: &dyn SuggestionStore,
    embedder: &dyn Embedder,
    resume_id: Uuid,
    doc: &ResumeDocument,
) -> usize {
    let mut stored = 0;

    for (category, text) in fragments(doc) {
        let vector = match embedder.embed(&text).await {
            Ok(v) => v,
            Err(e) => {
                warn!(%resume_id, category, "Failed to generate embeddings: {e}");
                break;
            }
        };

        if let Err(e) = store
            .put(resume_id, EmbeddingRecord::new(text, vector, category))
            .await
        {
            warn!(%resume_id, category, "Failed to store embedding: {e}");
            break;
        }
        stored += 1;
    }

    info!(%resume_id, stored, "Resume indexed for suggestions");
    stored
}

/// Replaces the resume's fragments with those of `doc`.
///
/// Everything is embedded before the store is touched, and the swap is a
/// single `replace_all`, so concurrent reindexes of one resume leave exactly
/// one fragment set behind. If embedding fails part-way, the fragments
/// embedded so far become the new set.
pub async fn reindex_resume(
    store: &dyn SuggestionStore,
    embedder: &dyn Embedder,
    resume_id: Uuid,
    doc: &ResumeDocument,
) -> usize {
    let mut records = Vec::new();
    for (category, text) in fragments(doc) {
        match embedder.embed(&text).await {
            Ok(vector) => records.push(EmbeddingRecord::new(text, vector, category)),
            Err(e) => {
                warn!(%resume_id, category, "Failed to generate embeddings: {e}");
                break;
            }
        }
    }

    let stored = records.len();
    if let Err(e) = store.replace_all(resume_id, records).await {
        warn!(%resume_id, "Failed to replace embeddings: {e}");
        return 0;
    }
    info!(%resume_id, stored, "Resume reindexed for suggestions");
    stored
}
