use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::EmbeddingRecord;
use crate::storage::StoreError;

/// Embedded fragments grouped by the resume they were cut from.
///
/// Append-only per resume: fragments are never updated in place, so write
/// ordering between resumes does not matter and reads hand out snapshot copies.
#[async_trait]
pub trait SuggestionStore: Send + Sync {
    async fn put(&self, resume_id: Uuid, record: EmbeddingRecord) -> Result<(), StoreError>;
    /// Empty when the resume has no fragments or is unknown.
    async fn get_all(&self, resume_id: Uuid) -> Result<Vec<EmbeddingRecord>, StoreError>;
    /// Swaps the resume's whole fragment set in one step; empty `records`
    /// clears it.
    async fn replace_all(
        &self,
        resume_id: Uuid,
        records: Vec<EmbeddingRecord>,
    ) -> Result<(), StoreError>;
    async fn delete_all(&self, resume_id: Uuid) -> Result<(), StoreError>;
}

#[derive(Default)]
pub struct InMemorySuggestionStore {
    fragments: RwLock<HashMap<Uuid, Vec<EmbeddingRecord>>>,
}

impl InMemorySuggestionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SuggestionStore for InMemorySuggestionStore {
    async fn put(&self, resume_id: Uuid, record: EmbeddingRecord) -> Result<(), StoreError> {
        let mut fragments = self.fragments.write()?;
        fragments.entry(resume_id).or_default().push(record);
        Ok(())
    }

    async fn get_all(&self, resume_id: Uuid) -> Result<Vec<EmbeddingRecord>, StoreError> {
        let fragments = self.fragments.read()?;
        Ok(fragments.get(&resume_id).cloned().unwrap_or_default())
    }

    async fn replace_all(
        &self,
        resume_id: Uuid,
        records: Vec<EmbeddingRecord>,
    ) -> Result<(), StoreError> {
        let mut fragments = self.fragments.write()?;
        if records.is_empty() {
            fragments.remove(&resume_id);
        } else {
            fragments.insert(resume_id, records);
        }
        Ok(())
    }

    async fn delete_all(&self, resume_id: Uuid) -> Result<(), StoreError> {
        let mut fragments = self.fragments.write()?;
        fragments.remove(&resume_id);
        Ok(())
    }
}
