#![deny(missing_docs)]
//! Shared toolkit for conduit.
//!
//! Provides the [`Backend`] trait for raw text-generation calls, the
//! object-safe [`GenerationAdapter`] boundary that agents hold, and the
//! conversation and error types both sides speak.

pub mod adapter;
pub mod backend;
pub mod config;
pub mod error;
pub mod types;

// Re-exports
pub use adapter::{ChatAdapter, GenerationAdapter, TOOL_ADVISORY};
pub use backend::{Backend, BackendRequest, BackendResponse, Completion, TokenUsage};
pub use config::AdapterConfig;
pub use error::{BackendError, BackendFault, ConfigurationError};
pub use types::*;
