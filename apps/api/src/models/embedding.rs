use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingMetadata {
    pub section: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// An embedded text fragment of a stored resume. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    pub text: String,
    pub vector: Vec<f32>,
    pub metadata: EmbeddingMetadata,
}

impl EmbeddingRecord {
    pub fn new(text: impl Into<String>, vector: Vec<f32>, category: impl Into<String>) -> Self {
        let category = category.into();
        Self {
            text: text.into(),
            vector,
            metadata: EmbeddingMetadata {
                section: category.clone(),
                category,
                created_at: Utc::now(),
            },
        }
    }
}
