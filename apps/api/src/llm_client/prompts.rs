// Shared prompt fragments. Section-specific instructions live in
// suggestion/prompts.rs and are composed with these.

/// Persona shared by every suggestion instruction.
pub const RESUME_WRITER_PERSONA: &str = "You are a professional resume writer. \
    Focus on clarity, measurable impact, and a professional tone.";

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Composes a system prompt from the persona, a task instruction, and the JSON shape the
/// model must return.
pub fn compose_system(task: &str, shape: &str) -> String {
    format!("{RESUME_WRITER_PERSONA}\n\n{task}\n\nReturn a JSON object with this EXACT shape:\n{shape}\n\n{JSON_ONLY_SYSTEM}")
}
