//! The invocation runner.
//!
//! One invocation walks `Pending → GuardrailCheck → Generating` and ends in
//! `Succeeded` or `Failed`. Guardrails always finish before generation
//! starts, and the adapter call is the only suspension point. Nothing is
//! retried.

use crate::agent::Agent;
use crate::error::{InvocationError, InvocationResult};
use conduit_guardrail::{GuardrailRule, apply_all};
use futures::future::join_all;
use tokio_util::sync::CancellationToken;

/// Where an invocation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvocationState {
    /// Accepted, nothing evaluated yet.
    Pending,
    /// Applying guardrail rules in order.
    GuardrailCheck,
    /// Waiting on the adapter.
    Generating,
    /// Finished with response text.
    Succeeded,
    /// Finished with an error.
    Failed,
}

impl InvocationState {
    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, InvocationState::Succeeded | InvocationState::Failed)
    }
}

/// Runs queries against agents.
///
/// Stateless: one runner can serve any number of concurrent invocations.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvocationRunner {
    _private: (),
}

impl InvocationRunner {
    /// Create a runner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one query against one agent.
    ///
    /// `rules` are applied in order; the first failure ends the invocation
    /// before the adapter is touched. Otherwise the adapter is called
    /// exactly once with the agent's conversation and declared tools.
    pub async fn run(&self, agent: &Agent, query: &str, rules: &[GuardrailRule]) -> InvocationResult {
        let mut state = InvocationState::Pending;

        advance(agent, &mut state, InvocationState::GuardrailCheck);
        if let Err(violation) = apply_all(rules, query) {
            advance(agent, &mut state, InvocationState::Failed);
            return Err(InvocationError::GuardrailViolation(violation));
        }

        advance(agent, &mut state, InvocationState::Generating);
        let conversation = agent.build_conversation(query);
        match agent
            .adapter()
            .generate(&conversation, agent.declared_tools())
            .await
        {
            Ok(text) => {
                advance(agent, &mut state, InvocationState::Succeeded);
                Ok(text)
            }
            Err(source) => {
                advance(agent, &mut state, InvocationState::Failed);
                tracing::warn!(agent = %agent.name(), error = %source, "conduit.invocation.backend_error");
                Err(InvocationError::Backend {
                    agent: agent.name().to_string(),
                    source,
                })
            }
        }
    }

    /// Run one query unless `cancel` fires first.
    ///
    /// Returns `None` when cancelled: the invocation did not complete and
    /// no partial result exists. A token cancelled beforehand means nothing
    /// is evaluated.
    pub async fn run_until_cancelled(
        &self,
        agent: &Agent,
        query: &str,
        rules: &[GuardrailRule],
        cancel: &CancellationToken,
    ) -> Option<InvocationResult> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(agent = %agent.name(), "conduit.invocation.cancelled");
                None
            }
            result = self.run(agent, query, rules) => Some(result),
        }
    }

    /// Run several invocations concurrently on the current task.
    ///
    /// Results come back in input order. No ordering between invocations
    /// is implied beyond that.
    pub async fn run_many(
        &self,
        invocations: &[(&Agent, &str)],
        rules: &[GuardrailRule],
    ) -> Vec<InvocationResult> {
        join_all(
            invocations
                .iter()
                .map(|(agent, query)| self.run(agent, query, rules)),
        )
        .await
    }
}

fn advance(agent: &Agent, state: &mut InvocationState, next: InvocationState) {
    debug_assert!(!state.is_terminal());
    tracing::debug!(agent = %agent.name(), from = ?*state, to = ?next, "conduit.invocation.transition");
    *state = next;
}
