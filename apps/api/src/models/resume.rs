use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Template assigned to every new resume; the client renders it.
pub const DEFAULT_TEMPLATE: &str = "modern";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linked_in: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub description: String,
    pub achievements: Vec<String>,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Skill {
    pub category: String,
    pub items: Vec<String>,
    pub proficiency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Language {
    pub language: String,
    pub proficiency: String,
}

/// The structured resume the form edits. List entries are independent records.
///
/// Field presence is lenient at the serde layer; requiredness is enforced by
/// `resumes::validation` before anything is stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeDocument {
    pub contact: Contact,
    pub summary: String,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub languages: Vec<Language>,
}

impl ResumeDocument {
    /// Blank document with one placeholder entry per list section the form
    /// always shows.
    pub fn skeleton() -> Self {
        Self {
            education: vec![Education::default()],
            experience: vec![Experience::default()],
            skills: vec![Skill::placeholder()],
            ..Self::default()
        }
    }
}

impl Skill {
    pub fn placeholder() -> Self {
        Self {
            category: "Technical Skills".to_string(),
            items: Vec::new(),
            proficiency: Some("intermediate".to_string()),
        }
    }
}

/// A partially filled resume, as sent by the form before generation.
/// `None` means the section was never touched; `Some(vec![])` means it was cleared.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeDraft {
    pub contact: Option<Contact>,
    pub summary: Option<String>,
    pub education: Option<Vec<Education>>,
    pub experience: Option<Vec<Experience>>,
    pub skills: Option<Vec<Skill>>,
    pub projects: Option<Vec<Project>>,
    pub languages: Option<Vec<Language>>,
}

/// A stored resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub id: Uuid,
    pub user_id: String,
    pub data: ResumeDocument,
    pub template: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeRecord {
    pub fn new(user_id: impl Into<String>, data: ResumeDocument) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            data,
            template: DEFAULT_TEMPLATE.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
