use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::{ResumeDocument, ResumeRecord};
use crate::storage::StoreError;

#[async_trait]
pub trait ResumeRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<ResumeRecord>, StoreError>;
    async fn create(&self, record: ResumeRecord) -> Result<ResumeRecord, StoreError>;
    /// Replaces the document of an existing resume. `None` if `id` is unknown.
    async fn update(
        &self,
        id: Uuid,
        data: ResumeDocument,
    ) -> Result<Option<ResumeRecord>, StoreError>;
    /// Returns whether a resume was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
    /// All resumes owned by `user_id`, oldest first.
    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<ResumeRecord>, StoreError>;
}

#[derive(Default)]
pub struct InMemoryResumeRepository {
    resumes: RwLock<HashMap<Uuid, ResumeRecord>>,
}

impl InMemoryResumeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeRepository for InMemoryResumeRepository {
    async fn get(&self, id: Uuid) -> Result<Option<ResumeRecord>, StoreError> {
        let resumes = self.resumes.read()?;
        Ok(resumes.get(&id).cloned())
    }

    async fn create(&self, record: ResumeRecord) -> Result<ResumeRecord, StoreError> {
        let mut resumes = self.resumes.write()?;
        resumes.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: Uuid,
        data: ResumeDocument,
    ) -> Result<Option<ResumeRecord>, StoreError> {
        let mut resumes = self.resumes.write()?;
        Ok(resumes.get_mut(&id).map(|existing| {
            existing.data = data;
            existing.updated_at = Utc::now();
            existing.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut resumes = self.resumes.write()?;
        Ok(resumes.remove(&id).is_some())
    }

    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<ResumeRecord>, StoreError> {
        let resumes = self.resumes.read()?;
        let mut owned: Vec<ResumeRecord> = resumes
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by_key(|r| r.created_at);
        Ok(owned)
    }
}
