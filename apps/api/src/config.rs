use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Only `PORT` is validated strictly; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Key for the text-generation collaborator. `None` disables enrichment.
    pub groq_api_key: Option<String>,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: optional_env("GROQ_API_KEY"),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Returns the variable's value, treating unset and blank the same way.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
impl Config {
    /// Config used by handler tests: enrichment disabled, short timeout.
    pub fn for_tests() -> Self {
        Config {
            groq_api_key: None,
            llm_timeout_secs: 1,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
