//! Builder pattern implementation for state managers

use crate::path::DEFAULT_SEPARATOR;
use crate::{Result, StateManager, Stateful};

/// Builder for constructing and validating a [`StateManager`]
pub struct StateManagerBuilder {
    separator: char,
    states: Vec<(String, Box<dyn Stateful>)>,
}

impl Default for StateManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StateManagerBuilder {
    /// Create a new builder using `.` as the path separator
    pub fn new() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            states: Vec::new(),
        }
    }

    /// Set the path separator
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Add a state. States are registered in the order they are added,
    /// so parents must come before their children.
    pub fn state<T>(mut self, path: impl Into<String>, context: T) -> Self
    where
        T: Stateful + 'static,
    {
        self.states.push((path.into(), Box::new(context)));
        self
    }

    /// Register every state and check the default substates
    pub fn build(self) -> Result<StateManager> {
        let mut manager = StateManager::with_separator(self.separator);
        for (path, context) in self.states {
            manager.register_boxed(&path, context)?;
        }
        manager.validate()?;
        Ok(manager)
    }
}

impl std::fmt::Debug for StateManagerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let paths: Vec<&str> = self.states.iter().map(|(path, _)| path.as_str()).collect();
        f.debug_struct("StateManagerBuilder")
            .field("separator", &self.separator)
            .field("states", &paths)
            .finish()
    }
}
