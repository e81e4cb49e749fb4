#![deny(missing_docs)]
//! OpenAI-compatible chat completions backend for conduit.
//!
//! Implements [`conduit_core::Backend`] for `POST {base_url}/chat/completions`.
//! Works against OpenAI itself and against compatible endpoints such as
//! Gemini's (`GEMINI_BASE_URL`).

mod error;
mod types;

use conduit_core::backend::{Backend, BackendRequest, BackendResponse, Completion, TokenUsage};
use conduit_core::error::{BackendFault, ConfigurationError};
use error::{map_http_status, map_reqwest_error};
use std::time::Duration;
use types::*;

/// Default API base URL.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Gemini's OpenAI-compatible base URL.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Backend for the OpenAI Chat Completions wire format.
pub struct OpenAiCompat {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl OpenAiCompat {
    /// Create a backend with an already-resolved API key.
    ///
    /// Fails with [`ConfigurationError::MissingValue`] if the key is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigurationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigurationError::MissingValue("api_key".into()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: OPENAI_BASE_URL.into(),
            timeout: None,
        })
    }

    /// Create a backend pointed at Gemini's OpenAI-compatible endpoint.
    pub fn gemini(api_key: impl Into<String>) -> Result<Self, ConfigurationError> {
        Ok(Self::new(api_key)?.base_url(GEMINI_BASE_URL))
    }

    /// Create a backend whose API key comes from an environment variable.
    ///
    /// A missing or empty variable is a [`ConfigurationError`].
    pub fn from_env(var_name: &str) -> Result<Self, ConfigurationError> {
        let api_key = std::env::var(var_name)
            .map_err(|_| ConfigurationError::MissingValue(format!("environment variable {var_name}")))?;
        Self::new(api_key)
            .map_err(|_| ConfigurationError::MissingValue(format!("environment variable {var_name}")))
    }

    /// Override the API base URL.
    ///
    /// Useful for compatible providers and for testing with a mock server.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a per-request timeout. No timeout is applied by default.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the chat completions endpoint URL.
    pub(crate) fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn build_request(&self, request: &BackendRequest) -> ChatRequest {
        let mut messages = Vec::with_capacity(2);

        if let Some(system) = request.system.as_ref().filter(|s| !s.is_empty()) {
            messages.push(ChatMessage {
                role: "system".into(),
                content: Some(system.clone()),
            });
        }
        messages.push(ChatMessage {
            role: "user".into(),
            content: Some(request.prompt.clone()),
        });

        ChatRequest {
            model: request.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    fn parse_response(&self, response: ChatResponse) -> BackendResponse {
        // Choices without text (tool-call-only answers) carry no completion.
        let completions = response
            .choices
            .into_iter()
            .filter_map(|choice| {
                choice.message.content.map(|text| Completion {
                    text,
                    finish_reason: choice.finish_reason,
                })
            })
            .collect();

        let usage = response
            .usage
            .map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        BackendResponse {
            completions,
            model: response.model,
            usage,
        }
    }
}

impl Backend for OpenAiCompat {
    fn complete(
        &self,
        request: BackendRequest,
    ) -> impl std::future::Future<Output = Result<BackendResponse, BackendFault>> + Send {
        let url = self.chat_url();
        let api_request = self.build_request(&request);
        let mut http_request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&api_request);
        if let Some(timeout) = self.timeout {
            http_request = http_request.timeout(timeout);
        }

        async move {
            tracing::debug!(url = %url, model = %api_request.model, "conduit.backend.openai.request");

            let http_response = http_request.send().await.map_err(map_reqwest_error)?;

            let status = http_response.status();
            let body = http_response.text().await.map_err(map_reqwest_error)?;

            if !status.is_success() {
                return Err(map_http_status(status, &body));
            }

            let api_response: ChatResponse = serde_json::from_str(&body)
                .map_err(|e| BackendFault::InvalidResponse(format!("invalid JSON response: {e}")))?;

            Ok(self.parse_response(api_response))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> OpenAiCompat {
        OpenAiCompat::new("test-key").unwrap()
    }

    fn request(system: Option<&str>) -> BackendRequest {
        BackendRequest {
            model: "gemini-1.5-flash".into(),
            system: system.map(str::to_owned),
            prompt: "What is the capital of France?".into(),
            max_tokens: 256,
            temperature: 0.5,
        }
    }

    #[test]
    fn blank_api_key_is_configuration_error() {
        assert!(matches!(
            OpenAiCompat::new("  "),
            Err(ConfigurationError::MissingValue(field)) if field == "api_key"
        ));
    }

    #[test]
    fn missing_env_var_is_configuration_error() {
        let err = OpenAiCompat::from_env("CONDUIT_TEST_SURELY_UNSET_VAR").err().unwrap();
        assert!(err.to_string().contains("CONDUIT_TEST_SURELY_UNSET_VAR"));
    }

    #[test]
    fn empty_env_var_is_configuration_error() {
        // SAFETY: the variable name is unique to this test and nothing else reads it.
        unsafe { std::env::set_var("CONDUIT_TEST_EMPTY_API_KEY", "") };
        let err = OpenAiCompat::from_env("CONDUIT_TEST_EMPTY_API_KEY").err().unwrap();
        assert_eq!(
            err,
            ConfigurationError::MissingValue("environment variable CONDUIT_TEST_EMPTY_API_KEY".into())
        );
    }

    #[test]
    fn gemini_preset_uses_gemini_endpoint() {
        let backend = OpenAiCompat::gemini("key").unwrap();
        assert_eq!(backend.chat_url(), format!("{GEMINI_BASE_URL}/chat/completions"));
    }

    #[test]
    fn chat_url_trims_trailing_slash() {
        let backend = backend().base_url("http://localhost:9999/v1/");
        assert_eq!(backend.chat_url(), "http://localhost:9999/v1/chat/completions");
    }

    #[test]
    fn build_request_with_system() {
        let api_request = backend().build_request(&request(Some("Be concise.")));
        assert_eq!(api_request.model, "gemini-1.5-flash");
        assert_eq!(api_request.messages.len(), 2);
        assert_eq!(api_request.messages[0].role, "system");
        assert_eq!(api_request.messages[0].content.as_deref(), Some("Be concise."));
        assert_eq!(api_request.messages[1].role, "user");
        assert_eq!(api_request.max_tokens, 256);
        assert_eq!(api_request.temperature, 0.5);
    }

    #[test]
    fn build_request_without_system() {
        let api_request = backend().build_request(&request(None));
        assert_eq!(api_request.messages.len(), 1);
        assert_eq!(api_request.messages[0].role, "user");
    }

    #[test]
    fn request_serializes_to_wire_shape() {
        let json = serde_json::to_value(backend().build_request(&request(None))).unwrap();
        assert_eq!(json["model"], "gemini-1.5-flash");
        assert_eq!(json["max_tokens"], 256);
        assert_eq!(json["messages"][0]["content"], "What is the capital of France?");
    }

    #[test]
    fn parse_response_keeps_choice_order() {
        let response: ChatResponse = serde_json::from_value(serde_json::json!({
            "model": "gemini-1.5-flash",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "Paris" }, "finish_reason": "stop" },
                { "index": 1, "message": { "role": "assistant", "content": "Paris, France" }, "finish_reason": "stop" }
            ],
            "usage": { "prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15 }
        }))
        .unwrap();

        let parsed = backend().parse_response(response);
        assert_eq!(parsed.completions.len(), 2);
        assert_eq!(parsed.completions[0].text, "Paris");
        assert_eq!(parsed.completions[0].finish_reason.as_deref(), Some("stop"));
        assert_eq!(parsed.usage.input_tokens, 12);
        assert_eq!(parsed.usage.output_tokens, 3);
    }

    #[test]
    fn parse_response_drops_contentless_choices() {
        let response: ChatResponse = serde_json::from_value(serde_json::json!({
            "model": "m",
            "choices": [{ "message": { "role": "assistant", "content": null }, "finish_reason": "tool_calls" }]
        }))
        .unwrap();

        let parsed = backend().parse_response(response);
        assert!(parsed.completions.is_empty());
        assert_eq!(parsed.usage, TokenUsage::default());
    }
}
