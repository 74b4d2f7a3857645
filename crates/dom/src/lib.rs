//! Shared DOM data model for the rendering pipeline.
//!
//! Nodes are arena-owned and addressed by `NodeId` handles. The owning
//! direction is strictly parent -> child; `parent` links are plain
//! back-reference handles, so no reference cycles exist. An arena is created
//! per parse and handed back whole; nodes are never removed while a document
//! is being built.

mod debug;
mod style;

pub use crate::debug::outline;
pub use crate::style::{ComputedStyle, ResolvedStyle, StyleValue};

/// Handle into a [`DomTree`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// HTML attribute. Insertion order is preserved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug)]
pub enum Node {
    Document {
        children: Vec<NodeId>,
    },
    Element {
        name: String,
        attributes: Vec<Attribute>,
        children: Vec<NodeId>,
        parent: NodeId,
        computed_style: ComputedStyle,
        resolved_style: ResolvedStyle,
    },
    Text {
        content: String,
        parent: NodeId,
    },
}

impl Node {
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element { .. })
    }

    /// Tag name for elements, `None` for document and text nodes.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Element { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Arena-backed document tree. Index 0 is always the synthetic document root.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::Document {
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        // The document root always exists.
        false
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    /// Create an element and append it to `parent`'s children.
    pub fn create_element(
        &mut self,
        parent: NodeId,
        name: String,
        attributes: Vec<Attribute>,
    ) -> NodeId {
        let id = self.push(Node::Element {
            name,
            attributes,
            children: Vec::new(),
            parent,
            computed_style: ComputedStyle::default(),
            resolved_style: ResolvedStyle::default(),
        });
        self.attach(parent, id);
        id
    }

    /// Create a text node and append it to `parent`'s children.
    pub fn create_text(&mut self, parent: NodeId, content: String) -> NodeId {
        let id = self.push(Node::Text { content, parent });
        self.attach(parent, id);
        id
    }

    /// Append to an existing text node's content.
    pub fn append_text(&mut self, id: NodeId, chunk: &str) {
        if let Node::Text { content, .. } = self.node_mut(id) {
            content.push_str(chunk);
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.node(id) {
            Node::Document { children } | Node::Element { children, .. } => children,
            Node::Text { .. } => &[],
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id) {
            Node::Document { .. } => None,
            Node::Element { parent, .. } | Node::Text { parent, .. } => Some(*parent),
        }
    }

    pub fn element_name(&self, id: NodeId) -> Option<&str> {
        self.node(id).name()
    }

    pub fn attributes(&self, id: NodeId) -> Option<&[Attribute]> {
        match self.node(id) {
            Node::Element { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    /// Content of the first text child, if any. Used for `<style>` payloads.
    pub fn first_text(&self, id: NodeId) -> Option<&str> {
        for &child in self.children(id) {
            if let Node::Text { content, .. } = self.node(child) {
                return Some(content);
            }
        }
        None
    }

    pub fn computed_style(&self, id: NodeId) -> Option<&ComputedStyle> {
        match self.node(id) {
            Node::Element { computed_style, .. } => Some(computed_style),
            _ => None,
        }
    }

    pub fn computed_style_mut(&mut self, id: NodeId) -> Option<&mut ComputedStyle> {
        match self.node_mut(id) {
            Node::Element { computed_style, .. } => Some(computed_style),
            _ => None,
        }
    }

    pub fn resolved_style(&self, id: NodeId) -> Option<&ResolvedStyle> {
        match self.node(id) {
            Node::Element { resolved_style, .. } => Some(resolved_style),
            _ => None,
        }
    }

    pub fn resolved_style_mut(&mut self, id: NodeId) -> Option<&mut ResolvedStyle> {
        match self.node_mut(id) {
            Node::Element { resolved_style, .. } => Some(resolved_style),
            _ => None,
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        match self.node_mut(parent) {
            Node::Document { children } | Node::Element { children, .. } => children.push(child),
            Node::Text { .. } => unreachable!("text nodes cannot have children"),
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_element_links_parent_and_children() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let body = tree.create_element(root, "body".to_string(), Vec::new());
        let div = tree.create_element(body, "div".to_string(), Vec::new());

        assert_eq!(tree.children(root), &[body]);
        assert_eq!(tree.children(body), &[div]);
        assert_eq!(tree.parent(div), Some(body));
        assert_eq!(tree.parent(body), Some(root));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.element_name(div), Some("div"));
    }

    #[test]
    fn first_text_skips_nothing_and_finds_first_text_child() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let style = tree.create_element(root, "style".to_string(), Vec::new());
        tree.create_text(style, "div { color: red; }".to_string());

        assert_eq!(tree.first_text(style), Some("div { color: red; }"));
        assert_eq!(tree.first_text(root), None);
    }

    #[test]
    fn append_text_extends_existing_node() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let p = tree.create_element(root, "p".to_string(), Vec::new());
        let text = tree.create_text(p, "he".to_string());
        tree.append_text(text, "llo");

        assert!(matches!(
            tree.node(text),
            Node::Text { content, .. } if content == "hello"
        ));
    }

    #[test]
    fn deep_nesting_stays_linear() {
        let depth = 10_000u32;
        let mut tree = DomTree::new();
        let mut parent = tree.root();
        for _ in 0..depth {
            parent = tree.create_element(parent, "div".to_string(), Vec::new());
        }
        assert_eq!(tree.len() as u32, depth + 1);

        let mut seen = 0u32;
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if tree.node(id).is_element() {
                seen += 1;
            }
            cursor = tree.parent(id);
        }
        assert_eq!(seen, depth);
    }
}
