//! PlantUML diagram generation

use std::collections::BTreeSet;

use crate::node::NodeId;
use crate::tree::StateTree;

fn alias(id: NodeId) -> String {
    if id == StateTree::ROOT {
        "[*]".to_string()
    } else {
        format!("s{}", id.0)
    }
}

/// Generate a PlantUML diagram of the state tree and the transitions seen so far
pub(crate) fn generate_plantuml(
    tree: &StateTree,
    active: &[NodeId],
    transition_log: &BTreeSet<(NodeId, NodeId)>,
) -> String {
    let mut plantuml = String::new();
    plantuml.push_str("@startuml\n");
    plantuml.push_str("skinparam state {\n");
    plantuml.push_str("  BackgroundColor<<Current>> YellowGreen\n");
    plantuml.push_str("}\n\n");

    // Nested states first
    write_children(tree, StateTree::ROOT, active, 0, &mut plantuml);

    if !transition_log.is_empty() {
        plantuml.push('\n');
    }

    // Add transitions
    for (from, to) in transition_log {
        plantuml.push_str(&format!("{} --> {}\n", alias(*from), alias(*to)));
    }

    plantuml.push_str("@enduml\n");
    plantuml
}

fn write_children(
    tree: &StateTree,
    parent: NodeId,
    active: &[NodeId],
    depth: usize,
    out: &mut String,
) {
    let indent = "  ".repeat(depth);
    let mut children: Vec<(&str, NodeId)> = tree[parent].children().collect();
    children.sort_unstable();

    if parent != StateTree::ROOT {
        if let Some(default) = tree[parent].default_child() {
            out.push_str(&format!("{indent}[*] --> {}\n", alias(default)));
        }
    }

    for (name, id) in children {
        let marker = if active.contains(&id) { " <<Current>>" } else { "" };
        out.push_str(&format!("{indent}state {name:?} as {}{marker}", alias(id)));
        if tree[id].children().next().is_some() {
            out.push_str(" {\n");
            write_children(tree, id, active, depth + 1, out);
            out.push_str(&format!("{indent}}}\n"));
        } else {
            out.push('\n');
        }
    }
}
