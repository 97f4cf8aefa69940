//! Arena storage for the state tree

use std::ops::{Index, IndexMut};

use crate::node::{NodeId, StateNode};
use crate::{Result, Stateful};

/// Append-only tree of states. Nodes are never removed, so a [`NodeId`]
/// stays valid for the lifetime of the tree.
#[derive(Debug)]
pub(crate) struct StateTree {
    nodes: Vec<StateNode>,
}

impl StateTree {
    /// The virtual container every top-level state hangs from
    pub(crate) const ROOT: NodeId = NodeId(0);

    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![StateNode::new(String::new(), String::new(), Box::new(()))],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Create a node and attach it under `parent`
    pub(crate) fn insert(
        &mut self,
        parent: NodeId,
        name: &str,
        path: String,
        context: Box<dyn Stateful>,
    ) -> Result<NodeId> {
        let id = NodeId(self.nodes.len());
        self[parent].add_child(name, id)?;
        self.nodes.push(StateNode::new(name.to_owned(), path, context));
        Ok(id)
    }

    /// Walk `segments` from the root, returning the node at each depth
    pub(crate) fn resolve<S: AsRef<str>>(&self, segments: &[S]) -> Result<Vec<NodeId>> {
        let mut ids = Vec::with_capacity(segments.len());
        let mut node = Self::ROOT;
        for segment in segments {
            node = self[node].child(segment.as_ref())?;
            ids.push(node);
        }
        Ok(ids)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (NodeId, &StateNode)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }
}

impl Index<NodeId> for StateTree {
    type Output = StateNode;

    fn index(&self, id: NodeId) -> &StateNode {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for StateTree {
    fn index_mut(&mut self, id: NodeId) -> &mut StateNode {
        &mut self.nodes[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_insert_and_resolve() {
        let mut tree = StateTree::new();
        let a = tree
            .insert(StateTree::ROOT, "a", "a".into(), Box::new(()))
            .unwrap();
        let b = tree.insert(a, "b", "a.b".into(), Box::new(())).unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.resolve(&["a", "b"]), Ok(vec![a, b]));
        assert_eq!(tree.resolve::<&str>(&[]), Ok(vec![]));
        assert_eq!(tree[b].path(), "a.b");
    }

    #[test]
    fn test_resolve_unknown_segment() {
        let mut tree = StateTree::new();
        tree.insert(StateTree::ROOT, "a", "a".into(), Box::new(()))
            .unwrap();

        assert_eq!(
            tree.resolve(&["a", "missing"]),
            Err(Error::UnknownChild {
                parent: "a".to_string(),
                name: "missing".to_string(),
            })
        );
    }

    #[test]
    fn test_duplicate_insert_leaves_tree_unchanged() {
        let mut tree = StateTree::new();
        tree.insert(StateTree::ROOT, "a", "a".into(), Box::new(()))
            .unwrap();

        let result = tree.insert(StateTree::ROOT, "a", "a".into(), Box::new(()));
        assert!(matches!(result, Err(Error::DuplicateName { .. })));
        assert_eq!(tree.len(), 2);
    }
}
