//! The normalized invocation error.

use conduit_core::error::{BackendError, ConfigurationError};
use conduit_guardrail::GuardrailViolation;
use thiserror::Error;

/// Outcome of one invocation: response text, or exactly one error.
pub type InvocationResult = Result<String, InvocationError>;

/// Coarse classification of an [`InvocationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The query failed a guardrail before any backend call.
    GuardrailViolation,
    /// The generation backend failed.
    Backend,
    /// Construction-time configuration was invalid.
    Configuration,
}

/// Every way an invocation can fail, reported to the immediate caller.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvocationError {
    /// A guardrail rejected the query. Fix the query and try again.
    #[error("{0}")]
    GuardrailViolation(#[from] GuardrailViolation),

    /// The agent's backend failed. The original message is kept as the source.
    #[error("agent '{agent}' failed: {source}")]
    Backend {
        /// Name of the agent whose backend failed.
        agent: String,
        /// The adapter's error.
        source: BackendError,
    },

    /// Configuration was invalid.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl InvocationError {
    /// Which kind of failure this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            InvocationError::GuardrailViolation(_) => ErrorKind::GuardrailViolation,
            InvocationError::Backend { .. } => ErrorKind::Backend,
            InvocationError::Configuration(_) => ErrorKind::Configuration,
        }
    }
}
