use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::suggestion::section::SectionKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceSuggestion {
    pub description: String,
    pub achievements: Vec<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationSuggestion {
    pub description: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsSuggestion {
    pub skills: Vec<String>,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySuggestion {
    pub summary: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSuggestion {
    pub content: String,
}

/// A validated suggestion. One variant per `SectionKind`; serialized as the bare
/// payload object so the client sees e.g. `{"skills": [...], "categories": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SuggestionResult {
    Experience(ExperienceSuggestion),
    Education(EducationSuggestion),
    Skills(SkillsSuggestion),
    Summary(SummarySuggestion),
    General(GeneralSuggestion),
}

impl SuggestionResult {
    /// Parses model output against the shape `kind` expects.
    ///
    /// Missing fields, wrong types, and blank primary text are all rejected;
    /// nothing is coerced.
    pub fn parse(kind: SectionKind, json: &str) -> Result<Self, String> {
        let result = match kind {
            SectionKind::Experience => SuggestionResult::Experience(from_json(json)?),
            SectionKind::Education => SuggestionResult::Education(from_json(json)?),
            SectionKind::Skills => SuggestionResult::Skills(from_json(json)?),
            SectionKind::Summary => SuggestionResult::Summary(from_json(json)?),
            SectionKind::General => SuggestionResult::General(from_json(json)?),
        };
        result.check_primary_text()?;
        Ok(result)
    }

    pub fn kind(&self) -> SectionKind {
        match self {
            SuggestionResult::Experience(_) => SectionKind::Experience,
            SuggestionResult::Education(_) => SectionKind::Education,
            SuggestionResult::Skills(_) => SectionKind::Skills,
            SuggestionResult::Summary(_) => SectionKind::Summary,
            SuggestionResult::General(_) => SectionKind::General,
        }
    }

    /// The prose a form field would receive when the suggestion is accepted.
    /// `None` for skills, whose payload is a list.
    pub fn primary_text(&self) -> Option<&str> {
        match self {
            SuggestionResult::Experience(s) => Some(&s.description),
            SuggestionResult::Education(s) => Some(&s.description),
            SuggestionResult::Summary(s) => Some(&s.summary),
            SuggestionResult::General(s) => Some(&s.content),
            SuggestionResult::Skills(_) => None,
        }
    }

    fn check_primary_text(&self) -> Result<(), String> {
        match self.primary_text() {
            Some(text) if text.trim().is_empty() => Err(format!(
                "{} suggestion has empty text",
                self.kind().as_str()
            )),
            _ => Ok(()),
        }
    }
}

fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| e.to_string())
}
