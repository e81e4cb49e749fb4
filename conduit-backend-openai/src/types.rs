//! Chat Completions request/response types.
//!
//! Only the fields conduit sends or reads. Unknown response fields are
//! ignored so any OpenAI-compatible endpoint decodes.

use serde::{Deserialize, Serialize};

/// `/chat/completions` request body.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    /// Model identifier (e.g. "gemini-1.5-flash").
    pub model: String,
    /// Conversation messages.
    pub messages: Vec<ChatMessage>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

/// A message in Chat Completions format.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant".
    pub role: String,
    /// Message text. `null` when the model answered with tool calls only.
    #[serde(default)]
    pub content: Option<String>,
}

/// `/chat/completions` response body.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// Model that generated the response.
    #[serde(default)]
    pub model: String,
    /// Response choices.
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    /// Token usage statistics.
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

/// A single choice in the response.
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// The generated message.
    pub message: ChatMessage,
    /// Why generation stopped.
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Deserialize)]
pub struct ChatUsage {
    /// Number of tokens in the prompt.
    #[serde(default)]
    pub prompt_tokens: u64,
    /// Number of tokens in the completion.
    #[serde(default)]
    pub completion_tokens: u64,
}
