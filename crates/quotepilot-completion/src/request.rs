//! Request and response types shared by every backend.

use serde::{Deserialize, Serialize};

/// A single-turn completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier understood by the service.
    pub model: String,
    /// Instruction framing the task.
    pub system_prompt: String,
    /// Task payload.
    pub user_prompt: String,
    /// Token ceiling for the answer.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            max_tokens: 1200,
            temperature: 0.1,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Free-form answer returned by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Raw answer text. May contain prose around any JSON payload.
    pub text: String,
    /// Model that produced the answer, when the service reports it.
    pub model: Option<String>,
}

impl Completion {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = CompletionRequest::new("o4-mini", "system", "user");
        assert_eq!(request.max_tokens, 1200);
        assert!(request.temperature < 0.2);
    }

    #[test]
    fn test_request_builders() {
        let request = CompletionRequest::new("m", "s", "u")
            .with_max_tokens(300)
            .with_temperature(0.0);
        assert_eq!(request.max_tokens, 300);
        assert_eq!(request.temperature, 0.0);
    }
}
