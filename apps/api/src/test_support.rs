//! In-process stand-ins for the model provider, shared by unit and router tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::LlmError;
use crate::retrieval::embedder::Embedder;
use crate::suggestion::generator::ChatCompleter;

fn unavailable() -> LlmError {
    LlmError::Api {
        status: 503,
        message: "Service Unavailable".to_string(),
    }
}

/// Embedding provider that is always down.
pub struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, LlmError> {
        Err(unavailable())
    }
}

/// Returns the same vector for every input.
pub struct ConstantEmbedder(pub Vec<f32>);

#[async_trait]
impl Embedder for ConstantEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, LlmError> {
        Ok(self.0.clone())
    }
}

/// Looks vectors up by exact text; unknown text is an upstream error.
pub struct TableEmbedder {
    table: HashMap<String, Vec<f32>>,
}

impl TableEmbedder {
    pub fn new(table: HashMap<String, Vec<f32>>) -> Self {
        Self { table }
    }
}

#[async_trait]
impl Embedder for TableEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        self.table.get(text).cloned().ok_or_else(|| LlmError::Api {
            status: 400,
            message: format!("no vector for {text:?}"),
        })
    }
}

/// Chat provider that is always down.
pub struct FailingChat;

#[async_trait]
impl ChatCompleter for FailingChat {
    async fn complete_json(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
        Err(unavailable())
    }
}

/// Answers every call with one canned response and records the prompts.
pub struct ScriptedChat {
    response: String,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedChat {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(system, user)` of the most recent call.
    pub fn last_call(&self) -> Option<(String, String)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatCompleter for ScriptedChat {
    async fn complete_json(&self, system: &str, user: &str) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));
        Ok(self.response.clone())
    }
}

/// Picks a canned response by the first registered marker found in the system
/// prompt. Lets one double serve calls for different sections.
#[derive(Default)]
pub struct SectionChat {
    responses: Vec<(String, String)>,
    users: Mutex<Vec<String>>,
}

impl SectionChat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, marker: &str, response: &str) -> Self {
        self.responses
            .push((marker.to_string(), response.to_string()));
        self
    }

    pub fn calls(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    /// User messages received so far, in call order.
    pub fn users(&self) -> Vec<String> {
        self.users.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompleter for SectionChat {
    async fn complete_json(&self, system: &str, user: &str) -> Result<String, LlmError> {
        self.users.lock().unwrap().push(user.to_string());
        self.responses
            .iter()
            .find(|(marker, _)| system.contains(marker.as_str()))
            .map(|(_, response)| response.clone())
            .ok_or_else(|| LlmError::Api {
                status: 400,
                message: "no scripted response for this prompt".to_string(),
            })
    }
}
