//! The completion endpoint client.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ChatError, ChatResult};

/// Default API base (the service the original app shipped against).
pub const DEFAULT_BASE_URL: &str = "https://open.bigmodel.cn/api/paas/v4";

/// Default completion model.
pub const DEFAULT_MODEL: &str = "glm-4-flash";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: WireMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Some providers report errors with HTTP 200 and an `error` object in the
/// body, so both shapes have to be tried on success responses too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireReply {
    Failure { error: ApiErrorDetail },
    Success(CompletionResponse),
}

/// Client for an OpenAI-compatible chat-completion endpoint.
///
/// Completion calls can be slow relative to a UI frame, so the client uses a
/// generous timeout and is meant to be driven from an async context.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
}

impl ChatClient {
    /// Create a client with the default model and sampling parameters.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            top_p: 0.7,
            max_tokens: 1500,
        }
    }

    /// Override the completion model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Send one exchange: the character's system prompt plus the user's
    /// message. Returns the reply text, or a [`ChatError`] naming the
    /// failure stage. Never retried here.
    pub async fn complete(&self, user_message: &str, role_prompt: &str) -> ChatResult<String> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                WireMessage {
                    role: "system".to_string(),
                    content: role_prompt.to_string(),
                },
                WireMessage {
                    role: "user".to_string(),
                    content: user_message.to_string(),
                },
            ],
            temperature: self.temperature,
            top_p: self.top_p,
            max_tokens: self.max_tokens,
            stream: false,
        };

        tracing::debug!(model = %self.model, "sending completion request");

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(ChatError::Http {
                status: status.as_u16(),
                body,
            });
        }

        parse_reply(&body)
    }
}

fn parse_reply(body: &str) -> ChatResult<String> {
    let reply: WireReply =
        serde_json::from_str(body).map_err(|e| ChatError::InvalidResponse(e.to_string()))?;

    match reply {
        WireReply::Failure { error } => Err(ChatError::Api(error.message)),
        WireReply::Success(response) => response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ChatError::InvalidResponse("no choices in response".to_string())),
    }
}
