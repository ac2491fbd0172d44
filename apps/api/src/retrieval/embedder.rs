use async_trait::async_trait;

use crate::llm_client::{LlmClient, LlmError};

/// Turns text into a fixed-length vector. One call, one upstream request.
///
/// Carried in `AppState` as `Arc<dyn Embedder>` so the retrieval pipeline can
/// be exercised without the network.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError>;
}

#[async_trait]
impl Embedder for LlmClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        LlmClient::embed(self, text).await
    }
}
