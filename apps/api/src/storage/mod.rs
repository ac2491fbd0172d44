//! Storage ports and their in-memory implementations.
//!
//! Handlers and pipeline code depend only on the traits here; `AppState` carries
//! `Arc<dyn ResumeRepository>` and `Arc<dyn SuggestionStore>`, so a persistent
//! backend can be swapped in at startup without touching the callers.

pub mod embeddings;
pub mod resumes;

use thiserror::Error;

pub use embeddings::{InMemorySuggestionStore, SuggestionStore};
pub use resumes::{InMemoryResumeRepository, ResumeRepository};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage lock poisoned: {0}")]
    Poisoned(String),
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        StoreError::Poisoned(err.to_string())
    }
}
