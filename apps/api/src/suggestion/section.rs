use crate::suggestion::prompts;

/// The top-level resume category a suggestion is for.
///
/// Requests address fields by dot-path (`experience.0.description`); only the
/// first segment selects the instruction and the expected response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Experience,
    Education,
    Skills,
    Summary,
    /// Any other field. Gets a generic rewrite and a free-text result.
    General,
}

impl SectionKind {
    pub fn from_path(section: &str) -> Self {
        let head = section.split('.').next().unwrap_or_default().trim();
        match head.to_ascii_lowercase().as_str() {
            "experience" => SectionKind::Experience,
            "education" => SectionKind::Education,
            "skills" => SectionKind::Skills,
            "summary" => SectionKind::Summary,
            _ => SectionKind::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Summary => "summary",
            SectionKind::General => "general",
        }
    }

    /// Task instruction and JSON shape the model is asked to return.
    pub fn instruction(&self) -> (&'static str, &'static str) {
        match self {
            SectionKind::Experience => (prompts::EXPERIENCE_TASK, prompts::EXPERIENCE_SHAPE),
            SectionKind::Education => (prompts::EDUCATION_TASK, prompts::EDUCATION_SHAPE),
            SectionKind::Skills => (prompts::SKILLS_TASK, prompts::SKILLS_SHAPE),
            SectionKind::Summary => (prompts::SUMMARY_TASK, prompts::SUMMARY_SHAPE),
            SectionKind::General => (prompts::GENERAL_TASK, prompts::GENERAL_SHAPE),
        }
    }
}
