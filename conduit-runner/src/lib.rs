#![deny(missing_docs)]
//! Agents and the invocation runner for conduit.
//!
//! An [`Agent`] binds a name and instruction prompt to one
//! [`GenerationAdapter`](conduit_core::GenerationAdapter).
//! [`InvocationRunner::run`] is the single entry point: apply guardrails,
//! make one generation call, return text or one [`InvocationError`].
//!
//! ```no_run
//! use conduit_backend_openai::OpenAiCompat;
//! use conduit_core::{AdapterConfig, ChatAdapter};
//! use conduit_guardrail::non_empty;
//! use conduit_runner::{Agent, InvocationRunner};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = OpenAiCompat::from_env("Google_Api")?
//!     .base_url(conduit_backend_openai::GEMINI_BASE_URL);
//! let agent = Agent::builder("WeatherAssistant")
//!     .instructions("You answer questions about the weather.")
//!     .adapter(ChatAdapter::new(backend, AdapterConfig::default())?)
//!     .build()?;
//!
//! let answer = InvocationRunner::new()
//!     .run(&agent, "What is the weather in New York today?", &[non_empty()])
//!     .await?;
//! # let _ = answer;
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod error;
pub mod roster;
pub mod runner;

pub use agent::{Agent, AgentBuilder};
pub use error::{ErrorKind, InvocationError, InvocationResult};
pub use roster::AgentRoster;
pub use runner::{InvocationRunner, InvocationState};
