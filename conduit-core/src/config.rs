//! Configuration for a generation adapter.

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default output token cap.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Static configuration for one adapter.
///
/// Resolved by the caller (environment, config file, CLI) and passed in
/// explicitly. Read-only once an adapter holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Model identifier sent with every request.
    pub model_identifier: String,

    /// Maximum output tokens per backend call. Must be greater than zero.
    pub max_output_tokens: u32,

    /// Sampling temperature, within `[0, 2]`.
    pub temperature: f64,
}

impl AdapterConfig {
    /// Create a config for a model with default token cap and temperature.
    pub fn new(model_identifier: impl Into<String>) -> Self {
        Self {
            model_identifier: model_identifier.into(),
            ..Self::default()
        }
    }

    /// Override the output token cap.
    #[must_use]
    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Override the sampling temperature.
    #[must_use]
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.model_identifier.trim().is_empty() {
            return Err(ConfigurationError::MissingValue("model_identifier".into()));
        }
        if self.max_output_tokens == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "max_output_tokens".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigurationError::InvalidValue {
                field: "temperature".into(),
                reason: format!("{} is outside [0, 2]", self.temperature),
            });
        }
        Ok(())
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            model_identifier: DEFAULT_MODEL.into(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}
