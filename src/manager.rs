//! A hierarchical state manager addressing states by separator-delimited paths.
//!
//! States are registered into a tree below a virtual root (`"a"`, then
//! `"a.b"`, ...). A transition to a target path exits the active states that
//! are not shared with the target, deepest first, then enters the target's
//! new states, shallowest first. Afterwards the default substate chain of
//! the target is followed so that a transition to a composite state ends on
//! a leaf.
//!
//! # Usage
//! 1. Implement [`Stateful`] for each state, or use [`StateContext`](crate::StateContext) / `()`.
//! 2. Register parents before children with [`StateManager::register_state`].
//! 3. Call [`StateManager::change_state`] to move between states.
//!
//! # PlantUML Export
//! If the `plantuml` feature is enabled and in debug builds, transitions are
//! logged and the tree can be exported via [`StateManager::export_plantuml`].
//!
//! # Errors
//! Lookups of unregistered states fail with [`Error::UnknownChild`] and name
//! collisions with [`Error::DuplicateName`].

use crate::node::NodeId;
use crate::path::{self, DEFAULT_SEPARATOR};
use crate::tree::StateTree;
use crate::{Error, Result, Stateful};

#[cfg(all(feature = "plantuml", debug_assertions))]
use std::collections::BTreeSet;

/// A hierarchical state manager.
#[derive(Debug)]
pub struct StateManager {
    tree: StateTree,
    current_path: Vec<String>,
    separator: char,

    // Unique (from leaf, to leaf) pairs, only kept for PlantUML export
    #[cfg(all(feature = "plantuml", debug_assertions))]
    transition_log: BTreeSet<(NodeId, NodeId)>,
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StateManager {
    /// Create an empty manager using `.` as the path separator
    pub fn new() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }

    /// Create an empty manager with a custom path separator
    pub fn with_separator(separator: char) -> Self {
        Self {
            tree: StateTree::new(),
            current_path: Vec::new(),
            separator,

            #[cfg(all(feature = "plantuml", debug_assertions))]
            transition_log: BTreeSet::new(),
        }
    }

    /// The path separator
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Register a state at `path` with the given capabilities.
    ///
    /// Every ancestor of `path` must already be registered.
    ///
    /// # Errors
    /// - [`Error::EmptyName`] if `path` is empty or has an empty segment.
    /// - [`Error::UnknownChild`] if an ancestor is not registered.
    /// - [`Error::DuplicateName`] if the state already exists.
    pub fn register_state<T>(&mut self, path: &str, context: T) -> Result<()>
    where
        T: Stateful + 'static,
    {
        self.register_boxed(path, Box::new(context))
    }

    pub(crate) fn register_boxed(&mut self, path: &str, context: Box<dyn Stateful>) -> Result<()> {
        let segments = path::split(path, self.separator);
        let Some((name, parents)) = segments.split_last() else {
            return Err(Error::EmptyName { path: path.to_owned() });
        };
        if segments.iter().any(String::is_empty) {
            return Err(Error::EmptyName { path: path.to_owned() });
        }

        let parent = self
            .tree
            .resolve(parents)?
            .last()
            .copied()
            .unwrap_or(StateTree::ROOT);
        self.tree.insert(parent, name, path.to_owned(), context)?;

        tracing::debug!(state = %path, "registered state");
        Ok(())
    }

    /// Transition to `path`, leaving untouched the states it shares with the
    /// active path.
    ///
    /// An empty `path` exits every active state. After entering the target,
    /// default substates are entered until a state without one is reached.
    ///
    /// # Errors
    /// [`Error::UnknownChild`] if `path` is not registered. The target is
    /// resolved before any callback runs, so a failed transition changes nothing.
    pub fn change_state(&mut self, path: &str) -> Result<()> {
        self.transition_to(path, false)
    }

    /// Like [`change_state`](Self::change_state), but exits and re-enters every
    /// state on both paths, including the ones they share.
    pub fn force_change_state(&mut self, path: &str) -> Result<()> {
        self.transition_to(path, true)
    }

    fn transition_to(&mut self, path: &str, force_all: bool) -> Result<()> {
        let target = path::split(path, self.separator);
        let entering = self.tree.resolve(&target)?;
        let exiting = self.tree.resolve(&self.current_path)?;

        let level = if force_all {
            0
        } else {
            path::change_level(&self.current_path, &target)
        };

        tracing::debug!(
            from = %self.current_state(),
            to = %path,
            change_level = level,
            force_all,
            "changing state"
        );

        for &id in exiting[level..].iter().rev() {
            self.tree[id].exit();
        }
        for &id in &entering[level..] {
            self.tree[id].enter();
        }
        self.current_path = target;

        let mut node = entering.last().copied().unwrap_or(StateTree::ROOT);
        while let Some(child) = self.tree[node].default_child() {
            tracing::trace!(state = %self.tree[child].path(), "entering default substate");
            self.tree[child].enter();
            self.current_path.push(self.tree[child].name().to_owned());
            node = child;
        }

        let from = exiting.last().copied().unwrap_or(StateTree::ROOT);
        self.log_transition(from, node);
        Ok(())
    }

    // Log a transition (only in debug builds with plantuml feature)
    #[cfg(all(feature = "plantuml", debug_assertions))]
    fn log_transition(&mut self, from: NodeId, to: NodeId) {
        self.transition_log.insert((from, to));
    }

    #[cfg(not(all(feature = "plantuml", debug_assertions)))]
    fn log_transition(&mut self, _from: NodeId, _to: NodeId) {
        // No-op when plantuml feature is disabled or in release builds
    }

    /// The active path joined by the separator, empty when only the root is active
    pub fn current_state(&self) -> String {
        path::join(&self.current_path, self.separator)
    }

    /// The active path as individual state names
    pub fn current_path(&self) -> &[String] {
        &self.current_path
    }

    /// Whether `path` is active, i.e. a prefix of the active path
    pub fn is_active(&self, path: &str) -> bool {
        let segments = path::split(path, self.separator);
        path::change_level(&self.current_path, &segments) == segments.len()
    }

    /// Whether `path` names a registered state
    pub fn is_registered(&self, path: &str) -> bool {
        let segments = path::split(path, self.separator);
        !segments.is_empty() && self.tree.resolve(&segments).is_ok()
    }

    /// Number of registered states
    pub fn len(&self) -> usize {
        self.tree.len() - 1
    }

    /// Whether no state has been registered yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that every nominated default substate is a registered child.
    ///
    /// A default that does not resolve is silently skipped during transitions;
    /// this reports it instead.
    pub fn validate(&self) -> Result<()> {
        for (_, node) in self.tree.iter() {
            if let Some(default) = node.default_substate() {
                if node.default_child().is_none() {
                    return Err(Error::UnknownDefaultSubstate {
                        state: node.path().to_owned(),
                        default: default.to_owned(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Export the state tree, active path and observed transitions as a PlantUML diagram
    #[cfg(all(feature = "plantuml", debug_assertions))]
    pub fn export_plantuml(&self) -> String {
        let active: Vec<NodeId> = self.tree.resolve(&self.current_path).unwrap_or_default();
        crate::plantuml::generate_plantuml(&self.tree, &active, &self.transition_log)
    }

    /// Stub for export_plantuml when feature is disabled
    #[cfg(not(all(feature = "plantuml", debug_assertions)))]
    pub fn export_plantuml(&self) -> String {
        String::from("PlantUML export not available (requires 'plantuml' feature and debug build)")
    }
}
