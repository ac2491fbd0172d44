use std::sync::LazyLock;

use regex::Regex;

use crate::errors::FieldError;
use crate::models::ResumeDocument;

pub const MIN_SUMMARY_CHARS: usize = 10;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

/// Checks every rule a document must pass before it is stored.
/// Returns all violations, each addressed by its dot-path; empty means valid.
pub fn validate_resume(doc: &ResumeDocument) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !EMAIL.is_match(doc.contact.email.trim()) {
        errors.push(FieldError::new("contact.email", "Invalid email address"));
    }

    if doc.summary.trim().chars().count() < MIN_SUMMARY_CHARS {
        errors.push(FieldError::new(
            "summary",
            format!("Summary must be at least {MIN_SUMMARY_CHARS} characters"),
        ));
    }

    for (i, edu) in doc.education.iter().enumerate() {
        if edu.institution.trim().is_empty() {
            errors.push(FieldError::new(
                format!("education.{i}.institution"),
                "Institution is required",
            ));
        }
    }

    for (i, exp) in doc.experience.iter().enumerate() {
        if exp.company.trim().is_empty() {
            errors.push(FieldError::new(
                format!("experience.{i}.company"),
                "Company is required",
            ));
        }
    }

    errors
}
