// Similarity retrieval (RAG) over embedded resume fragments.
// Upstream embedding calls go through llm_client via the `Embedder` trait.

pub mod context;
pub mod embedder;
pub mod indexer;
pub mod similarity;
