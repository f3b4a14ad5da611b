//! Groq chat-completions client.
//!
//! Groq exposes an OpenAI-compatible API.
//! See: <https://console.groq.com/docs/api-reference#chat-create>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::CompletionProvider;
use crate::config::ApiKey;
use crate::telemetry;
use crate::types::{CompletionOptions, Message};
use crate::{ClassifierError, Result};

/// Default base URL for the Groq OpenAI-compatible API
const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Client for the Groq chat-completions endpoint.
///
/// Build once at startup and share; the inner HTTP client pools connections.
#[derive(Clone)]
pub struct GroqClient {
    api_key: ApiKey,
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl GroqClient {
    /// Create a new Groq client with the given API key and request timeout.
    pub fn new(api_key: ApiKey, timeout: Duration) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, timeout)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(
        api_key: ApiKey,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            ClassifierError::Configuration(format!("failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            api_key,
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Run one chat completion and return the first choice's content.
    pub async fn chat(&self, messages: &[Message], options: &CompletionOptions) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(model = %options.model, %url, "sending chat completion");

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.api_key.expose())
            .json(&ChatRequest {
                model: &options.model,
                temperature: options.temperature,
                max_tokens: options.max_tokens,
                messages,
            })
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let response = Self::handle_response_errors(response, &options.model).await?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if let Some(usage) = &body.usage {
            telemetry::record_token_usage(
                self.name(),
                usage.prompt_tokens,
                usage.completion_tokens,
            );
        }

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ClassifierError::EmptyResponse)
    }

    fn map_transport_error(&self, err: reqwest::Error) -> ClassifierError {
        if err.is_timeout() {
            ClassifierError::Timeout(self.timeout)
        } else {
            ClassifierError::Http(err.to_string())
        }
    }

    /// Check response status and map to appropriate error.
    async fn handle_response_errors(
        response: reqwest::Response,
        model: &str,
    ) -> Result<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            401 | 403 => Err(ClassifierError::AuthenticationFailed),
            404 => Err(ClassifierError::ModelNotFound(model.to_string())),
            429 => {
                // Try to parse retry-after header
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(Duration::from_secs);
                Err(ClassifierError::RateLimited { retry_after })
            }
            code => {
                let message = response
                    .json::<ErrorResponse>()
                    .await
                    .map(|e| e.error.message)
                    .unwrap_or_else(|_| format!("Groq API error: {status}"));
                Err(ClassifierError::Api {
                    status: code,
                    message,
                })
            }
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

// ============================================================================
// Provider Trait Implementation
// ============================================================================

#[async_trait]
impl CompletionProvider for GroqClient {
    fn name(&self) -> &str {
        "groq"
    }

    async fn complete(&self, messages: &[Message], options: &CompletionOptions) -> Result<String> {
        GroqClient::chat(self, messages, options).await
    }
}
