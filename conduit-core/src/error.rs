//! Error types for backends, adapters, and construction.

use thiserror::Error;

/// Errors raised by a raw text-generation backend.
///
/// These never cross the [`GenerationAdapter`](crate::GenerationAdapter)
/// boundary; adapters convert them into [`BackendError`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BackendFault {
    /// HTTP or network request failed.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// Backend rate-limited the request. Carries the backend's explanation,
    /// typically quota details.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Authentication/authorization failed.
    #[error("auth failed: {0}")]
    AuthFailed(String),

    /// Could not parse the backend's response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl BackendFault {
    /// Whether retrying this request might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BackendFault::RateLimited(_) | BackendFault::RequestFailed(_))
    }
}

/// The single error a [`GenerationAdapter`](crate::GenerationAdapter) reports.
///
/// Carries the original backend message verbatim. Retryability is recorded
/// for callers that own a retry policy; conduit itself never retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BackendError {
    message: String,
    retryable: bool,
}

impl BackendError {
    /// Create a non-retryable backend error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: false,
        }
    }

    /// The original backend message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the underlying fault was transient.
    pub fn is_retryable(&self) -> bool {
        self.retryable
    }
}

impl From<BackendFault> for BackendError {
    fn from(fault: BackendFault) -> Self {
        Self {
            retryable: fault.is_retryable(),
            message: fault.to_string(),
        }
    }
}

/// Construction-time configuration failures.
///
/// Fatal to whatever was being built; never produced while running a query.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A required value was absent or empty.
    #[error("missing required configuration value: {0}")]
    MissingValue(String),

    /// A value was present but out of range.
    #[error("invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// Name of the offending field.
        field: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Two agents were registered under the same name.
    #[error("agent name already registered: {0}")]
    DuplicateAgent(String),
}
