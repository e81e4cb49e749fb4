//! Agents: a named role bound to one generation adapter.

use conduit_core::adapter::GenerationAdapter;
use conduit_core::error::ConfigurationError;
use conduit_core::types::{Conversation, Message, ToolCapability};
use std::fmt;

/// A named role binding an instruction prompt to one adapter.
///
/// Immutable once built. The adapter is exclusively owned.
pub struct Agent {
    name: String,
    instructions: String,
    adapter: Box<dyn GenerationAdapter>,
    declared_tools: Vec<ToolCapability>,
}

impl Agent {
    /// Start building an agent with the given name.
    pub fn builder(name: impl Into<String>) -> AgentBuilder {
        AgentBuilder::new(name)
    }

    /// The agent's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The system-role instruction text. May be empty.
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// The adapter this agent generates through.
    pub fn adapter(&self) -> &dyn GenerationAdapter {
        self.adapter.as_ref()
    }

    /// Declared tools, in declaration order, unique by name.
    pub fn declared_tools(&self) -> &[ToolCapability] {
        &self.declared_tools
    }

    /// Build the single-turn conversation for a query.
    ///
    /// Instructions become a leading system entry when non-empty; the query
    /// is always the final user entry. The query is not validated here.
    pub fn build_conversation(&self, query: &str) -> Conversation {
        let mut conversation = Conversation::new();
        if !self.instructions.is_empty() {
            conversation.push(Message::system(self.instructions.as_str()));
        }
        conversation.push(Message::user(query));
        conversation
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("instructions", &self.instructions)
            .field("model", &self.adapter.config().model_identifier)
            .field("declared_tools", &self.declared_tools)
            .finish()
    }
}

/// Builder for [`Agent`].
pub struct AgentBuilder {
    name: String,
    instructions: String,
    adapter: Option<Box<dyn GenerationAdapter>>,
    declared_tools: Vec<ToolCapability>,
}

impl AgentBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: String::new(),
            adapter: None,
            declared_tools: Vec::new(),
        }
    }

    /// Set the instruction prompt.
    #[must_use]
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Set the adapter.
    #[must_use]
    pub fn adapter(mut self, adapter: impl GenerationAdapter + 'static) -> Self {
        self.adapter = Some(Box::new(adapter));
        self
    }

    /// Set an already-boxed adapter.
    #[must_use]
    pub fn boxed_adapter(mut self, adapter: Box<dyn GenerationAdapter>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    /// Declare a tool. A later declaration with the same name is ignored.
    #[must_use]
    pub fn tool(mut self, tool: ToolCapability) -> Self {
        if !self.declared_tools.iter().any(|t| t.name == tool.name) {
            self.declared_tools.push(tool);
        }
        self
    }

    /// Declare several tools.
    #[must_use]
    pub fn tools(self, tools: impl IntoIterator<Item = ToolCapability>) -> Self {
        tools.into_iter().fold(self, AgentBuilder::tool)
    }

    /// Finish building.
    ///
    /// Fails if the name is blank, no adapter was set, or the adapter's
    /// configuration is invalid.
    pub fn build(self) -> Result<Agent, ConfigurationError> {
        if self.name.trim().is_empty() {
            return Err(ConfigurationError::MissingValue("agent name".into()));
        }
        let adapter = self
            .adapter
            .ok_or_else(|| ConfigurationError::MissingValue(format!("adapter for agent {}", self.name)))?;
        adapter.config().validate()?;

        Ok(Agent {
            name: self.name,
            instructions: self.instructions,
            adapter,
            declared_tools: self.declared_tools,
        })
    }
}
