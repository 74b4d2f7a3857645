//! Computed -> resolved style conversion.

use dom::{DomTree, NodeId, StyleValue};

/// Copy the element's matched declarations into its resolved style, parsing
/// `px` lengths and bare numbers into [`StyleValue::Length`].
///
/// Re-resolution overwrites every property that has a computed declaration
/// but leaves other resolved entries alone, so geometry written by an earlier
/// layout pass survives unless a declaration shadows it.
pub fn resolve_style(tree: &mut DomTree, id: NodeId) {
    let Some(computed) = tree.computed_style(id) else {
        return;
    };
    let parsed: Vec<(String, StyleValue)> = computed
        .iter()
        .map(|(property, value)| (property.to_string(), parse_style_value(value)))
        .collect();
    let Some(resolved) = tree.resolved_style_mut(id) else {
        return;
    };
    for (property, value) in parsed {
        resolved.set(&property, value);
    }
}

/// `"100px"` and `"100"` become lengths; everything else stays a keyword.
pub(crate) fn parse_style_value(value: &str) -> StyleValue {
    let value = value.trim();
    if let Some(number) = value.strip_suffix("px") {
        if let Ok(length) = number.trim().parse::<f32>() {
            return StyleValue::Length(length);
        }
    }
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit() || c == '.') {
        if let Ok(length) = value.parse::<f32>() {
            return StyleValue::Length(length);
        }
    }
    StyleValue::Keyword(value.to_string())
}
