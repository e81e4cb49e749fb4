//! A name-unique set of agents.

use crate::agent::Agent;
use conduit_core::error::ConfigurationError;
use std::collections::HashMap;

/// Agents registered by name.
///
/// Registration fails on a name that is already taken, so every agent a
/// process looks up through the roster has a unique name.
#[derive(Debug, Default)]
pub struct AgentRoster {
    agents: HashMap<String, Agent>,
}

impl AgentRoster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent under its own name.
    pub fn register(&mut self, agent: Agent) -> Result<(), ConfigurationError> {
        if self.agents.contains_key(agent.name()) {
            return Err(ConfigurationError::DuplicateAgent(agent.name().to_string()));
        }
        self.agents.insert(agent.name().to_string(), agent);
        Ok(())
    }

    /// Look up an agent by name.
    pub fn get(&self, name: &str) -> Option<&Agent> {
        self.agents.get(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.agents.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether no agents are registered.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
