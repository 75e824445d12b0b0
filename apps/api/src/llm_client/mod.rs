/// LLM Client — the single point of entry for external text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may call the completion API directly.
/// Everything goes through the `TextGenerator` trait defined here, so callers
/// can be tested against in-process fakes.
///
/// Model: llama3-8b-8192 over an OpenAI-compatible chat-completions endpoint.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const CHAT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// The model used for all completion calls.
pub const MODEL: &str = "llama3-8b-8192";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Text generation is not configured")]
    NotConfigured,

    #[error("Text generation timed out after {0:?}")]
    Timeout(Duration),
}

/// Sampling settings for one completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GenerationOptions {
    /// One or two sentences of advice.
    pub const SUGGESTION: Self = Self {
        max_tokens: 150,
        temperature: 0.7,
    };
    /// Full documents (cover letters, portfolio copy).
    pub const DOCUMENT: Self = Self {
        max_tokens: 1024,
        temperature: 0.3,
    };
}

/// Anything that can turn a prompt into generated text.
///
/// Carried in `AppState` as `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, options: GenerationOptions) -> Result<String, LlmError>;
}

/// Generator used when no API key is configured. Every call fails fast.
pub struct DisabledGenerator;

#[async_trait]
impl TextGenerator for DisabledGenerator {
    async fn generate(&self, _prompt: &str, _options: GenerationOptions) -> Result<String, LlmError> {
        Err(LlmError::NotConfigured)
    }
}

/// Runs one best-effort generation bounded by `timeout`.
///
/// Every failure is logged and turned into `None`; callers fall back to their
/// deterministic output. `purpose` only labels the log lines.
pub async fn generate_or_skip(
    generator: &dyn TextGenerator,
    prompt: &str,
    options: GenerationOptions,
    timeout: Duration,
    purpose: &str,
) -> Option<String> {
    match tokio::time::timeout(timeout, generator.generate(prompt, options)).await {
        Ok(Ok(text)) => Some(text.trim().to_string()).filter(|t| !t.is_empty()),
        Ok(Err(LlmError::NotConfigured)) => {
            debug!(purpose, "Text generation disabled, using fallback");
            None
        }
        Ok(Err(e)) => {
            warn!(purpose, error = %e, "Text generation failed, using fallback");
            None
        }
        Err(_) => {
            warn!(purpose, error = %LlmError::Timeout(timeout), "Text generation failed, using fallback");
            None
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the trimmed text of the first choice, if any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// HTTP text generator with retry logic.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
        })
    }

    /// Sends `prompt` as a single user message, retrying transient failures.
    pub async fn call(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<ChatResponse, LlmError> {
        let body = ChatRequest {
            model: MODEL,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut transient: Option<LlmError> = None;
        for attempt in 0..MAX_RETRIES {
            if let Some(err) = &transient {
                let delay = backoff(attempt);
                warn!(attempt, delay_ms = delay.as_millis() as u64, error = %err, "Retrying completion request");
                tokio::time::sleep(delay).await;
            }

            match self.send_once(&body).await? {
                Attempt::Done(response) => return Ok(response),
                Attempt::Retry(err) => transient = Some(err),
            }
        }

        Err(transient.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    /// One round trip. Transport errors, 429 and 5xx come back as `Attempt::Retry`;
    /// other non-success statuses are final.
    async fn send_once(&self, body: &ChatRequest<'_>) -> Result<Attempt, LlmError> {
        let response = match self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return Ok(Attempt::Retry(LlmError::Http(e))),
        };

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            let err = LlmError::Api { status, message };
            if is_retryable(status) {
                return Ok(Attempt::Retry(err));
            }
            return Err(err);
        }

        let parsed: ChatResponse = response.json().await?;
        if let Some(usage) = &parsed.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Completion request succeeded"
            );
        }
        Ok(Attempt::Done(parsed))
    }
}

enum Attempt {
    Done(ChatResponse),
    Retry(LlmError),
}

fn is_retryable(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

/// 1s before the second attempt, doubling after that.
fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(1000 << attempt.saturating_sub(1))
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str, options: GenerationOptions) -> Result<String, LlmError> {
        let response = self.call(prompt, options).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}


/// In-process generators shared by unit and router tests.
#[cfg(test)]
pub mod testing {
    use super::*;

    /// Always answers with the same text.
    pub struct FixedGenerator(pub &'static str);

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str, _options: GenerationOptions) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    /// Fails every call with a non-retryable API error.
    pub struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str, _options: GenerationOptions) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 400,
                message: "bad request".to_string(),
            })
        }
    }

    /// Answers only after a minute.
    pub struct SlowGenerator;

    #[async_trait]
    impl TextGenerator for SlowGenerator {
        async fn generate(&self, _prompt: &str, _options: GenerationOptions) -> Result<String, LlmError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("too late".to_string())
        }
    }
}
