//! A single state in the tree

use std::collections::HashMap;
use std::fmt;

use crate::{Error, Result, Stateful};

/// Index of a node inside a [`StateTree`](crate::tree::StateTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

/// A registered state: its name, its children and its capabilities.
pub(crate) struct StateNode {
    name: String,
    path: String,
    children: HashMap<String, NodeId>,
    context: Box<dyn Stateful>,
}

impl StateNode {
    pub(crate) fn new(name: String, path: String, context: Box<dyn Stateful>) -> Self {
        Self {
            name,
            path,
            children: HashMap::new(),
            context,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Full path from the root, empty for the root itself
    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    #[cfg_attr(not(all(feature = "plantuml", debug_assertions)), allow(dead_code))]
    pub(crate) fn children(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.children.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Attach a child, rejecting a name that is already taken
    pub(crate) fn add_child(&mut self, name: &str, id: NodeId) -> Result<()> {
        if self.children.contains_key(name) {
            return Err(Error::DuplicateName {
                parent: self.path.clone(),
                name: name.to_owned(),
            });
        }
        self.children.insert(name.to_owned(), id);
        Ok(())
    }

    pub(crate) fn child(&self, name: &str) -> Result<NodeId> {
        self.children
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownChild {
                parent: self.path.clone(),
                name: name.to_owned(),
            })
    }

    /// The nominated default substate name, whether or not it resolves
    pub(crate) fn default_substate(&self) -> Option<&str> {
        self.context.default_substate()
    }

    /// The child named by the default substate, if it is set and registered
    pub(crate) fn default_child(&self) -> Option<NodeId> {
        self.default_substate()
            .and_then(|name| self.children.get(name).copied())
    }

    pub(crate) fn enter(&mut self) {
        tracing::trace!(state = %self.path, "enter");
        self.context.on_enter(&self.name);
    }

    pub(crate) fn exit(&mut self) {
        tracing::trace!(state = %self.path, "exit");
        self.context.on_exit(&self.name);
    }
}

impl fmt::Debug for StateNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateNode")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("children", &self.children)
            .field("default_substate", &self.default_substate())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StateContext;
    use std::sync::{Arc, Mutex};

    fn node(name: &str, context: impl Stateful + 'static) -> StateNode {
        StateNode::new(name.to_owned(), name.to_owned(), Box::new(context))
    }

    #[test]
    fn test_add_and_get_child() {
        let mut parent = node("a", ());
        parent.add_child("b", NodeId(2)).unwrap();

        assert_eq!(parent.child("b"), Ok(NodeId(2)));
        assert_eq!(
            parent.child("c"),
            Err(Error::UnknownChild {
                parent: "a".to_string(),
                name: "c".to_string(),
            })
        );
    }

    #[test]
    fn test_duplicate_child() {
        let mut parent = node("a", ());
        parent.add_child("b", NodeId(2)).unwrap();

        let result = parent.add_child("b", NodeId(3));
        assert!(matches!(result, Err(Error::DuplicateName { ref name, .. }) if name == "b"));
        // The original child is kept
        assert_eq!(parent.child("b"), Ok(NodeId(2)));
    }

    #[test]
    fn test_default_child() {
        let mut parent = node("a", StateContext::new().with_default_substate("b"));
        assert_eq!(parent.default_child(), None);

        parent.add_child("b", NodeId(5)).unwrap();
        assert_eq!(parent.default_child(), Some(NodeId(5)));

        let plain = node("x", ());
        assert_eq!(plain.default_child(), None);
    }

    #[test]
    fn test_enter_exit_dispatch() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let enter_log = Arc::clone(&log);
        let exit_log = Arc::clone(&log);
        let mut state = node(
            "menu",
            StateContext::new()
                .with_enter(move |name| enter_log.lock().unwrap().push(format!("+{name}")))
                .with_exit(move |name| exit_log.lock().unwrap().push(format!("-{name}"))),
        );

        state.enter();
        state.exit();
        node("quiet", ()).enter();

        assert_eq!(*log.lock().unwrap(), vec!["+menu", "-menu"]);
    }
}
