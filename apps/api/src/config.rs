use anyhow::{Context, Result};

const DEFAULT_LLM_BASE_URL: &str = "https://api.mistral.ai/v1";
const DEFAULT_CHAT_MODEL: &str = "mistral-large-latest";
const DEFAULT_EMBEDDING_MODEL: &str = "mistral-embed";

/// Application configuration loaded from environment variables.
/// Startup fails if the model provider credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub mistral_api_key: String,
    pub llm_base_url: String,
    pub chat_model: String,
    pub embedding_model: String,
    /// Applied to every outbound call to the model provider.
    pub upstream_timeout_secs: u64,
    /// Width of the concurrent group used by `/api/generate-resume`.
    pub generation_concurrency: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            mistral_api_key: require_env("MISTRAL_API_KEY")?,
            llm_base_url: env_or("LLM_BASE_URL", DEFAULT_LLM_BASE_URL),
            chat_model: env_or("CHAT_MODEL", DEFAULT_CHAT_MODEL),
            embedding_model: env_or("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            upstream_timeout_secs: env_or("UPSTREAM_TIMEOUT_SECS", "30")
                .parse::<u64>()
                .context("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")?,
            generation_concurrency: env_or("GENERATION_CONCURRENCY", "4")
                .parse::<usize>()
                .context("GENERATION_CONCURRENCY must be a positive integer")?
                .max(1),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mistral_api_key: String::new(),
            llm_base_url: DEFAULT_LLM_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            upstream_timeout_secs: 30,
            generation_concurrency: 4,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        anyhow::bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
