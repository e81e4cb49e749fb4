#![deny(missing_docs)]
//! Guardrail rules for conduit.
//!
//! A [`GuardrailRule`] is a named predicate over the raw query plus the
//! message reported when the predicate fails. Rules are applied in order
//! and short-circuit on the first failure, so order is observable: the
//! [`GuardrailChain`] keeps them in a list, never a set.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Message reported by [`non_empty`].
pub const EMPTY_QUERY_MESSAGE: &str = "Error: Query cannot be empty.";

type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// A query failed a guardrail rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GuardrailViolation {
    /// Name of the rule that failed.
    pub rule: String,
    /// The rule's failure message.
    pub message: String,
}

/// A named, stateless validation rule.
///
/// Cheap to clone; the predicate is shared.
#[derive(Clone)]
pub struct GuardrailRule {
    name: String,
    description: String,
    predicate: Predicate,
    failure_message: String,
}

impl GuardrailRule {
    /// Create a rule. `predicate` returns `true` when the query is acceptable.
    pub fn new<F>(
        name: impl Into<String>,
        description: impl Into<String>,
        predicate: F,
        failure_message: impl Into<String>,
    ) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            predicate: Arc::new(predicate),
            failure_message: failure_message.into(),
        }
    }

    /// Rule name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Message reported on failure.
    pub fn failure_message(&self) -> &str {
        &self.failure_message
    }

    /// Check a query, passing it through unchanged when it is acceptable.
    pub fn apply<'q>(&self, query: &'q str) -> Result<&'q str, GuardrailViolation> {
        if (self.predicate)(query) {
            Ok(query)
        } else {
            tracing::debug!(rule = %self.name, "conduit.guardrail.violation");
            Err(GuardrailViolation {
                rule: self.name.clone(),
                message: self.failure_message.clone(),
            })
        }
    }
}

impl fmt::Debug for GuardrailRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardrailRule")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("failure_message", &self.failure_message)
            .finish_non_exhaustive()
    }
}

/// Apply rules in order, stopping at the first failure.
pub fn apply_all<'q>(rules: &[GuardrailRule], query: &'q str) -> Result<&'q str, GuardrailViolation> {
    rules.iter().try_fold(query, |q, rule| rule.apply(q))
}

/// An ordered pipeline of guardrail rules.
///
/// Rules run in the order they were added. The pipeline stops at the
/// first failing rule; rules after it are not evaluated.
#[derive(Debug, Clone, Default)]
pub struct GuardrailChain {
    rules: Vec<GuardrailRule>,
}

impl GuardrailChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule to the end of the pipeline.
    pub fn add(&mut self, rule: GuardrailRule) {
        self.rules.push(rule);
    }

    /// Builder-style [`add`](Self::add).
    #[must_use]
    pub fn with(mut self, rule: GuardrailRule) -> Self {
        self.add(rule);
        self
    }

    /// The rules, in evaluation order.
    pub fn rules(&self) -> &[GuardrailRule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the chain holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run the pipeline over a query.
    pub fn apply<'q>(&self, query: &'q str) -> Result<&'q str, GuardrailViolation> {
        apply_all(&self.rules, query)
    }
}

impl FromIterator<GuardrailRule> for GuardrailChain {
    fn from_iter<I: IntoIterator<Item = GuardrailRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

/// Rejects empty or whitespace-only queries.
pub fn non_empty() -> GuardrailRule {
    GuardrailRule::new(
        "non_empty_query",
        "Query must contain non-whitespace text",
        |q| !q.trim().is_empty(),
        EMPTY_QUERY_MESSAGE,
    )
}

/// Rejects queries longer than `limit` characters.
pub fn max_length(limit: usize) -> GuardrailRule {
    GuardrailRule::new(
        "max_query_length",
        format!("Query must be at most {limit} characters"),
        move |q| q.chars().count() <= limit,
        format!("Error: Query exceeds {limit} characters."),
    )
}

/// Rejects queries containing any of `terms`, ignoring case.
pub fn deny_terms<I, S>(terms: I) -> GuardrailRule
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let terms: Vec<String> = terms
        .into_iter()
        .map(|t| t.into().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    GuardrailRule::new(
        "denied_terms",
        "Query must not contain blocked terms",
        move |q| {
            let lower = q.to_lowercase();
            !terms.iter().any(|t| lower.contains(t.as_str()))
        },
        "Error: Query contains a blocked term.",
    )
}
