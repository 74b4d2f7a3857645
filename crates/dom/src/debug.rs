//! Human-readable tree dump, used by the CLI and by tests when a failure
//! needs eyeballing.

use crate::{DomTree, Node, NodeId};

/// Render the tree as indented lines: one line per node, elements annotated
/// with their resolved geometry when layout has produced any.
pub fn outline(tree: &DomTree) -> Vec<String> {
    let mut lines = Vec::new();
    walk(tree, tree.root(), 0, &mut lines);
    lines
}

fn walk(tree: &DomTree, id: NodeId, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    match tree.node(id) {
        Node::Document { .. } => lines.push(format!("{indent}#document")),
        Node::Element {
            name,
            attributes,
            resolved_style,
            ..
        } => {
            let mut line = format!("{indent}<{name}");
            for attribute in attributes {
                line.push_str(&format!(" {}=\"{}\"", attribute.name, attribute.value));
            }
            line.push('>');
            let geometry: Vec<String> = ["left", "top", "width", "height"]
                .iter()
                .filter_map(|side| {
                    resolved_style
                        .length(side)
                        .map(|value| format!("{side}={value}"))
                })
                .collect();
            if !geometry.is_empty() {
                line.push_str(&format!(" [{}]", geometry.join(" ")));
            }
            lines.push(line);
        }
        Node::Text { content, .. } => {
            let preview: String = content.chars().take(40).collect();
            lines.push(format!("{indent}{preview:?}"));
        }
    }
    for &child in tree.children(id) {
        walk(tree, child, depth + 1, lines);
    }
}
