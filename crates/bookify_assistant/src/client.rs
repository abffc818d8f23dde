// --- File: crates/bookify_assistant/src/client.rs ---
//! Chat completion client for the hosted LLM behind the chatbot front end.
//!
//! Speaks the OpenAI-compatible chat completions protocol; the default
//! endpoint is Groq's. The API key is read from the environment at
//! construction, never from the config file.

use bookify_common::http::client::{create_client, HTTP_CLIENT};
use bookify_config::AssistantConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "mixtral-8x7b-32768";
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Assistant API key is not set")]
    MissingApiKey,
    #[error("Request timed out")]
    Timeout,
    #[error("Assistant API returned {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Unexpected response format from assistant API")]
    UnexpectedResponse,
    #[error("Request error: {0}")]
    Request(reqwest::Error),
}

// --- Wire types (OpenAI chat completions shape) ---

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize, Debug)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize, Debug)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    content: String,
}

/// Client for the chat completion API, constructed once at startup.
pub struct ChatClient {
    client: reqwest::Client,
    api_url: String,
    model: String,
    api_key: Option<String>,
}

impl ChatClient {
    pub fn from_config(config: &AssistantConfig) -> Self {
        let timeout = config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let client = create_client(timeout, true).unwrap_or_else(|_| HTTP_CLIENT.clone());
        let key_env = config.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV);

        Self {
            client,
            api_url: config
                .api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key: std::env::var(key_env).ok(),
        }
    }

    /// Sends a prompt (optionally preceded by a system instruction) and
    /// returns the completion text of the first choice.
    pub async fn complete(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, AssistantError> {
        let api_key = self.api_key.as_deref().ok_or(AssistantError::MissingApiKey)?;

        let mut messages = Vec::new();
        if let Some(system) = system_prompt {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        let request = CompletionRequest {
            model: &self.model,
            messages,
        };

        debug!("Sending completion request to {}", self.api_url);
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssistantError::Timeout
                } else {
                    AssistantError::Request(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|_| AssistantError::UnexpectedResponse)?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(AssistantError::UnexpectedResponse)
    }
}
