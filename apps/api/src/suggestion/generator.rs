//! Suggestion generation: one chat call per request, validated against the
//! section's shape before anything reaches the client.

use async_trait::async_trait;
use tracing::debug;

use crate::errors::AppError;
use crate::llm_client::prompts::compose_system;
use crate::llm_client::{strip_json_fences, LlmClient, LlmError};
use crate::suggestion::prompts::build_user_prompt;
use crate::suggestion::result::SuggestionResult;
use crate::suggestion::section::SectionKind;

/// A chat model that answers with a JSON object.
///
/// Carried in `AppState` as `Arc<dyn ChatCompleter>`; the default backend is
/// `LlmClient`.
#[async_trait]
pub trait ChatCompleter: Send + Sync {
    async fn complete_json(&self, system: &str, user: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl ChatCompleter for LlmClient {
    async fn complete_json(&self, system: &str, user: &str) -> Result<String, LlmError> {
        self.chat_json(system, user).await
    }
}

/// Generates a suggestion for the field at `section` (a dot-path).
///
/// `context` is prepended verbatim to the user message and may be empty.
/// Non-deterministic: identical input can produce different text, but the
/// result always conforms to the section's shape.
pub async fn generate_suggestion(
    llm: &dyn ChatCompleter,
    section: &str,
    content: &str,
    context: &str,
) -> Result<SuggestionResult, AppError> {
    let kind = SectionKind::from_path(section);
    let (task, shape) = kind.instruction();
    let system = compose_system(task, shape);
    let user = build_user_prompt(context, content);

    debug!(
        section = kind.as_str(),
        with_context = !context.is_empty(),
        "Requesting suggestion"
    );

    let raw = llm.complete_json(&system, &user).await?;

    SuggestionResult::parse(kind, strip_json_fences(&raw)).map_err(|reason| {
        AppError::SchemaViolation(format!(
            "{} suggestion did not match its schema: {reason}",
            kind.as_str()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingChat, ScriptedChat};

    #[tokio::test]
    async fn test_summary_suggestion_validates() {
        let chat = ScriptedChat::new(r#"{"summary": "Seasoned SRE.", "keywords": ["SRE"]}"#);
        let result = generate_suggestion(&chat, "summary", "I run servers", "")
            .await
            .unwrap();
        assert!(matches!(result, SuggestionResult::Summary(ref s) if s.keywords == ["SRE"]));
    }

    #[tokio::test]
    async fn test_summary_missing_keywords_is_schema_violation() {
        let chat = ScriptedChat::new(r#"{"summary": "Seasoned SRE."}"#);
        let err = generate_suggestion(&chat, "summary", "I run servers", "")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SchemaViolation(_)));
    }

    #[tokio::test]
    async fn test_non_json_output_is_schema_violation() {
        let chat = ScriptedChat::new("Here is a better summary: ...");
        let err = generate_suggestion(&chat, "summary", "x", "")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SchemaViolation(_)));
    }

    #[tokio::test]
    async fn test_fenced_output_is_accepted() {
        let chat = ScriptedChat::new("```json\n{\"content\": \"Polished\"}\n```");
        let result = generate_suggestion(&chat, "projects.0.description", "rough", "")
            .await
            .unwrap();
        assert_eq!(result.primary_text(), Some("Polished"));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_remote_service_error() {
        let err = generate_suggestion(&FailingChat, "skills", "Python", "")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RemoteService(_)));
    }

    #[tokio::test]
    async fn test_prompts_carry_section_instruction_and_context() {
        let chat = ScriptedChat::new(
            r#"{"description": "d", "achievements": [], "keywords": []}"#,
        );
        generate_suggestion(&chat, "experience.1.description", "Built things", "CTX\n\n")
            .await
            .unwrap();

        let (system, user) = chat.last_call().unwrap();
        assert!(system.contains("\"achievements\""));
        assert_eq!(user, "CTX\n\nCurrent content: Built things");
    }
}
