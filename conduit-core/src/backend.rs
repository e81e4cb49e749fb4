//! Backend trait for raw text-generation services.
//!
//! The [`Backend`] trait uses RPITIT (return-position `impl Trait` in traits)
//! and is intentionally NOT object-safe. The object-safe boundary is
//! [`GenerationAdapter`](crate::GenerationAdapter); `ChatAdapter<B: Backend>`
//! implements it.

use crate::error::BackendFault;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Request sent to a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendRequest {
    /// Model identifier.
    pub model: String,
    /// System instruction, if the conversation carried one.
    pub system: Option<String>,
    /// The effective prompt text.
    pub prompt: String,
    /// Maximum output tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

/// One completion entry in a backend payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    /// Generated text.
    pub text: String,
    /// Backend-reported finish reason, verbatim.
    pub finish_reason: Option<String>,
}

impl Completion {
    /// A completion with text and no finish reason.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finish_reason: None,
        }
    }
}

/// Token usage from a single backend call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Input tokens consumed.
    pub input_tokens: u64,
    /// Output tokens generated.
    pub output_tokens: u64,
}

/// Response from a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendResponse {
    /// Completion entries, in backend order. May be empty.
    pub completions: Vec<Completion>,
    /// Actual model used.
    pub model: String,
    /// Token usage.
    pub usage: TokenUsage,
}

/// Raw text-generation interface.
///
/// Each concrete backend (OpenAI-compatible HTTP, a local model, a test
/// double) implements this trait. It accepts a prompt with generation
/// parameters and yields completions or a [`BackendFault`].
pub trait Backend: Send + Sync {
    /// Send one completion request.
    fn complete(
        &self,
        request: BackendRequest,
    ) -> impl Future<Output = Result<BackendResponse, BackendFault>> + Send;
}
