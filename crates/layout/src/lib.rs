//! Flexbox-subset layout over the shared DOM.
//!
//! Layout runs per container at element-close time: by then every child has
//! been laid out, so child sizes are available when the container distributes
//! space. Positions written back are container-relative; `absolute_rect`
//! composes global coordinates by walking parent offsets.

mod flex;
mod resolve;

pub use crate::flex::layout;
pub use crate::resolve::resolve_style;

use dom::{DomTree, NodeId};

/// A rectangle in CSS px units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Global position and size of an element, or `None` for non-elements.
/// Missing geometry reads as zero.
pub fn absolute_rect(tree: &DomTree, id: NodeId) -> Option<Rect> {
    let resolved = tree.resolved_style(id)?;
    let width = resolved.length("width").unwrap_or(0.0);
    let height = resolved.length("height").unwrap_or(0.0);
    let mut x = resolved.length("left").unwrap_or(0.0);
    let mut y = resolved.length("top").unwrap_or(0.0);

    let mut cursor = tree.parent(id);
    while let Some(ancestor) = cursor {
        if let Some(style) = tree.resolved_style(ancestor) {
            x += style.length("left").unwrap_or(0.0);
            y += style.length("top").unwrap_or(0.0);
        }
        cursor = tree.parent(ancestor);
    }

    Some(Rect {
        x,
        y,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::DomTree;

    #[test]
    fn absolute_rect_accumulates_ancestor_offsets() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let outer = tree.create_element(root, "div".to_string(), Vec::new());
        let inner = tree.create_element(outer, "div".to_string(), Vec::new());

        if let Some(style) = tree.resolved_style_mut(outer) {
            style.set_length("left", 10.0);
            style.set_length("top", 20.0);
        }
        if let Some(style) = tree.resolved_style_mut(inner) {
            style.set_length("left", 5.0);
            style.set_length("top", 7.0);
            style.set_length("width", 50.0);
            style.set_length("height", 40.0);
        }

        let rect = absolute_rect(&tree, inner).unwrap();
        assert_eq!(
            rect,
            Rect {
                x: 15.0,
                y: 27.0,
                width: 50.0,
                height: 40.0
            }
        );
        assert!(absolute_rect(&tree, root).is_none());
    }
}
