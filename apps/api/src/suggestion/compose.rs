//! Whole-resume generation from a partially filled draft.
//!
//! Generates a summary and a description for every experience entry that lacks
//! one. Per-entry calls are independent, so they run through a fixed-size
//! concurrent group; output order matches input order.

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::info;

use crate::errors::AppError;
use crate::models::{Education, Experience, ResumeDocument, ResumeDraft, Skill};
use crate::suggestion::generator::{generate_suggestion, ChatCompleter};
use crate::suggestion::result::SuggestionResult;

const SAMPLE_COMPANY: &str = "Previous Company";
const SAMPLE_POSITION: &str = "Previous Position";
const SAMPLE_START_DATE: &str = "2020-01";

pub async fn compose_resume(
    llm: &dyn ChatCompleter,
    draft: ResumeDraft,
    concurrency: usize,
) -> Result<ResumeDocument, AppError> {
    let summary_request = match draft.summary.as_deref().map(str::trim) {
        Some(existing) if !existing.is_empty() => {
            format!("Improve this professional summary: {existing}")
        }
        _ => "Generate a professional summary for a resume".to_string(),
    };

    let experience = match draft.experience {
        Some(entries) if !entries.is_empty() => entries,
        _ => vec![Experience {
            company: SAMPLE_COMPANY.to_string(),
            position: SAMPLE_POSITION.to_string(),
            start_date: SAMPLE_START_DATE.to_string(),
            ..Experience::default()
        }],
    };
    let missing = experience
        .iter()
        .filter(|e| e.description.trim().is_empty())
        .count();
    info!(
        entries = experience.len(),
        missing_descriptions = missing,
        concurrency,
        "Composing resume"
    );

    let (summary, experience) = futures::try_join!(
        generate_text(llm, "summary", &summary_request),
        fill_descriptions(llm, experience, concurrency),
    )?;

    Ok(ResumeDocument {
        contact: draft.contact.unwrap_or_default(),
        summary,
        experience,
        education: draft
            .education
            .unwrap_or_else(|| vec![Education::default()]),
        skills: draft.skills.unwrap_or_else(|| vec![Skill::placeholder()]),
        projects: draft.projects.unwrap_or_default(),
        languages: draft.languages.unwrap_or_default(),
    })
}

async fn fill_descriptions(
    llm: &dyn ChatCompleter,
    entries: Vec<Experience>,
    concurrency: usize,
) -> Result<Vec<Experience>, AppError> {
    stream::iter(entries)
        .map(move |mut exp| async move {
            if exp.description.trim().is_empty() {
                let request = if exp.company == SAMPLE_COMPANY && exp.position == SAMPLE_POSITION
                {
                    "Generate a sample work experience description".to_string()
                } else {
                    format!(
                        "Generate a professional description for {} at {}",
                        exp.position, exp.company
                    )
                };
                exp.description = generate_text(llm, "experience", &request).await?;
            }
            Ok::<_, AppError>(exp)
        })
        .buffered(concurrency.max(1))
        .try_collect()
        .await
}

/// Runs one suggestion and keeps only its prose.
async fn generate_text(
    llm: &dyn ChatCompleter,
    section: &str,
    request: &str,
) -> Result<String, AppError> {
    let result = generate_suggestion(llm, section, request, "").await?;
    match result {
        SuggestionResult::Skills(_) => Err(AppError::SchemaViolation(format!(
            "{section} generation returned a skills payload"
        ))),
        other => Ok(other.primary_text().unwrap_or_default().to_string()),
    }
}
