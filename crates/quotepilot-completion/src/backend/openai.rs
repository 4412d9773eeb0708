//! OpenAI-compatible chat completions backend.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::CompletionError;
use crate::request::{Completion, CompletionRequest};
use crate::{CompletionBackend, Result};

/// Default chat completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Backend posting to an OpenAI-compatible `/chat/completions` endpoint
/// with bearer authentication.
pub struct OpenAiBackend {
    client: Client,
    endpoint: String,
    api_key: String,
    timeout_secs: u64,
}

impl OpenAiBackend {
    /// Create a backend for the given endpoint and credential.
    ///
    /// Every request is bounded by `timeout_secs`; expiry surfaces as
    /// [`CompletionError::Timeout`].
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(CompletionError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| CompletionError::Http(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
            timeout_secs,
        })
    }

    fn map_error(&self, err: reqwest::Error) -> CompletionError {
        if err.is_timeout() {
            CompletionError::Timeout(self.timeout_secs)
        } else {
            CompletionError::Http(err.to_string())
        }
    }
}

impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion> {
        let body = ChatRequest {
            model: &request.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        debug!(endpoint = %self.endpoint, model = %request.model, "sending completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| self.map_error(e))?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(CompletionError::EmptyResponse)?;

        trace!("completion text: {}", text);

        Ok(Completion {
            text,
            model: parsed.model,
        })
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_rejected() {
        let result = OpenAiBackend::new(DEFAULT_ENDPOINT, "  ", 30);
        assert!(matches!(result, Err(CompletionError::MissingApiKey)));
    }

    #[test]
    fn test_chat_request_shape() {
        let request = CompletionRequest::new("o4-mini", "sys", "usr").with_max_tokens(50);
        let body = ChatRequest {
            model: &request.model,
            messages: [
                ChatMessage { role: "system", content: &request.system_prompt },
                ChatMessage { role: "user", content: &request.user_prompt },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "o4-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "usr");
        assert_eq!(json["max_tokens"], 50);
    }

    #[test]
    fn test_chat_response_without_content() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
        assert!(parsed.model.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_error() {
        let backend = OpenAiBackend::new("http://127.0.0.1:9/v1/chat/completions", "key", 2).unwrap();
        let request = CompletionRequest::new("m", "s", "u");
        let err = backend.complete(&request).await.unwrap_err();
        assert!(matches!(err, CompletionError::Http(_) | CompletionError::Timeout(_)));
    }
}
