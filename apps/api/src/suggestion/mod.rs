// Section-aware suggestion generation: prompt selection, the model call,
// output validation, and whole-resume composition.

pub mod compose;
pub mod generator;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod result;
pub mod section;
