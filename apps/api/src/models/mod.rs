pub mod embedding;
pub mod resume;

pub use embedding::EmbeddingRecord;
pub use resume::{Education, Experience, ResumeDocument, ResumeDraft, ResumeRecord, Skill};
