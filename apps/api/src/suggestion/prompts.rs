// Section-specific instructions for suggestion generation. Each pair is a task
// and the exact JSON shape the response is validated against.

pub const EXPERIENCE_TASK: &str = "Improve this work experience entry. \
    Rewrite the description with strong action verbs and quantified outcomes, \
    list concrete achievements as short bullet sentences, \
    and extract relevant keywords for applicant tracking systems.";

pub const EXPERIENCE_SHAPE: &str = r#"{
  "description": "Rewritten description of the role",
  "achievements": ["Reduced deploy time by 40% by introducing CI caching"],
  "keywords": ["CI/CD", "Kubernetes"]
}"#;

pub const EDUCATION_TASK: &str = "Improve this education entry. \
    Write a concise description of the program \
    and highlight coursework, honours, or projects worth featuring.";

pub const EDUCATION_SHAPE: &str = r#"{
  "description": "Concise description of the degree",
  "highlights": ["Graduated with honours", "Thesis on distributed consensus"]
}"#;

pub const SKILLS_TASK: &str = "Organise and improve this skills list. \
    Normalise skill names, add closely related in-demand skills the content implies, \
    and propose category headings for grouping them.";

pub const SKILLS_SHAPE: &str = r#"{
  "skills": ["Python", "SQL", "Data Modeling"],
  "categories": ["Programming Languages", "Databases"]
}"#;

pub const SUMMARY_TASK: &str = "Improve this professional summary. \
    Keep it to two or three sentences that state the candidate's focus, \
    experience level, and the value they bring, \
    and extract the keywords it should emphasise.";

pub const SUMMARY_SHAPE: &str = r#"{
  "summary": "Rewritten professional summary",
  "keywords": ["Backend", "Distributed Systems"]
}"#;

pub const GENERAL_TASK: &str = "Improve this resume content. \
    Rewrite it for clarity and impact while keeping every fact unchanged.";

pub const GENERAL_SHAPE: &str = r#"{
  "content": "Rewritten content"
}"#;

/// Maximum characters of user content placed in a suggestion prompt.
pub const MAX_CONTENT_CHARS: usize = 500;

/// Truncates to `MAX_CONTENT_CHARS` characters, marking the cut with "...".
pub fn truncate_content(content: &str) -> String {
    match content.char_indices().nth(MAX_CONTENT_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

/// User-role message: optional retrieved context, then the content being edited.
pub fn build_user_prompt(context: &str, content: &str) -> String {
    format!("{context}Current content: {}", truncate_content(content))
}
