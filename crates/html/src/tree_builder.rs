//! Token stream -> DOM tree, with styling and layout interleaved.
//!
//! The builder keeps a stack of open elements rooted at the synthetic
//! document node. Opening an element matches it against the rules collected
//! so far; closing one collects `<style>` payloads and runs flex layout, at
//! which point all of the element's children are final.

use css::RuleSet;
use dom::{Attribute, DomTree, NodeId};

use crate::error::ParseError;
use crate::token::Token;

#[derive(Debug)]
pub struct TreeBuilder {
    tree: DomTree,
    stack: Vec<NodeId>,
    rules: RuleSet,
    coalesce_text: bool,
    current_text: Option<NodeId>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::with_text_coalescing(true)
    }

    /// `coalesce` controls whether adjacent text tokens merge into one node.
    pub fn with_text_coalescing(coalesce: bool) -> Self {
        let tree = DomTree::new();
        let root = tree.root();
        Self {
            tree,
            stack: vec![root],
            rules: RuleSet::new(),
            coalesce_text: coalesce,
            current_text: None,
        }
    }

    pub fn push_token(&mut self, token: Token) -> Result<(), ParseError> {
        match token {
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                self.start_tag(name, attributes, self_closing);
                Ok(())
            }
            Token::EndTag { name } => self.end_tag(&name),
            Token::Text { content } => {
                self.text(&content);
                Ok(())
            }
            Token::Eof => Ok(()),
        }
    }

    /// Number of open elements, excluding the document root.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Verify every element was closed and hand the tree over.
    pub fn finish(self) -> Result<DomTree, ParseError> {
        let open = self.stack.len() - 1;
        if open > 0 {
            return Err(ParseError::MalformedDocument { open });
        }
        Ok(self.tree)
    }

    fn start_tag(&mut self, name: String, attributes: Vec<Attribute>, self_closing: bool) {
        self.current_text = None;
        let parent = self.insertion_point();
        let element = self.tree.create_element(parent, name, attributes);

        // Match before pushing: the ancestor chain for this element is the
        // current stack, insertion point first.
        let ancestors_top_first: Vec<NodeId> = self.stack.iter().rev().copied().collect();
        css::apply_matching_rules(&self.rules, &mut self.tree, element, &ancestors_top_first);

        if !self_closing {
            self.stack.push(element);
        }
        log::trace!(
            target: "html.tree_builder",
            "open <{:?}> depth={}",
            self.tree.element_name(element),
            self.depth()
        );
    }

    fn end_tag(&mut self, name: &str) -> Result<(), ParseError> {
        self.current_text = None;
        let top = self.insertion_point();
        let top_name = self.tree.element_name(top).unwrap_or("#document");
        if top == self.tree.root() || top_name != name {
            return Err(ParseError::StructuralMismatch {
                expected: top_name.to_string(),
                found: name.to_string(),
            });
        }

        if top_name == "style" {
            if let Some(text) = self.tree.first_text(top) {
                let text = text.to_string();
                self.rules.collect(&text);
            }
        }
        layout::layout(&mut self.tree, top);

        self.stack.pop();
        log::trace!(target: "html.tree_builder", "close </{name}> depth={}", self.depth());
        Ok(())
    }

    fn text(&mut self, content: &str) {
        match self.current_text {
            Some(node) if self.coalesce_text => self.tree.append_text(node, content),
            _ => {
                let parent = self.insertion_point();
                let node = self.tree.create_text(parent, content.to_string());
                self.current_text = Some(node);
            }
        }
    }

    fn insertion_point(&self) -> NodeId {
        self.stack
            .last()
            .copied()
            .unwrap_or_else(|| self.tree.root())
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
