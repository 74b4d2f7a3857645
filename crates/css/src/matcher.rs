//! Selector matching against the DOM at element-open time.
//!
//! The matcher runs once per element, at the moment the tree builder inserts
//! it: the candidate ancestors are the open-element stack, and the rule set is
//! whatever has been collected so far. Elements are never re-matched when
//! later `<style>` blocks arrive; that ordering quirk is part of the streaming
//! contract.

use dom::{Attribute, DomTree, Node, NodeId};

use crate::rules::RuleSet;

/// Does one simple selector match an element with this name and attributes?
pub fn matches_simple(name: &str, attributes: &[Attribute], selector: &str) -> bool {
    if let Some(id) = selector.strip_prefix('#') {
        return attributes
            .iter()
            .any(|attribute| attribute.name == "id" && attribute.value == id);
    }
    if let Some(class) = selector.strip_prefix('.') {
        return attributes
            .iter()
            .find(|attribute| attribute.name == "class")
            .is_some_and(|attribute| {
                attribute.value.split_whitespace().any(|word| word == class)
            });
    }
    name == selector
}

fn node_matches(tree: &DomTree, id: NodeId, selector: &str) -> bool {
    match tree.node(id) {
        Node::Element {
            name, attributes, ..
        } => matches_simple(name, attributes, selector),
        _ => false,
    }
}

/// Match every collected rule against `element` and write the winning
/// declarations into its computed style.
///
/// `ancestors_top_first` is the open-element stack from the insertion point
/// down to the document root. Descendant combinators consume the first
/// matching ancestor; ancestors that do not match are skipped, not failed.
///
/// Rules are visited in ascending specificity (stable, so source order breaks
/// ties) and their declarations applied in sequence, which makes the last
/// write the highest-priority one.
pub fn apply_matching_rules(
    rules: &RuleSet,
    tree: &mut DomTree,
    element: NodeId,
    ancestors_top_first: &[NodeId],
) {
    if rules.is_empty() {
        return;
    }

    let mut order: Vec<usize> = (0..rules.len()).collect();
    order.sort_by_key(|&index| rules.rules()[index].specificity);

    let mut winners: Vec<(String, String)> = Vec::new();
    for index in order {
        let rule = &rules.rules()[index];
        let mut parts = rule.selector.split_whitespace().rev();
        let Some(target) = parts.next() else {
            continue;
        };
        if !node_matches(tree, element, target) {
            continue;
        }

        let remaining: Vec<&str> = parts.collect();
        let mut next = 0;
        for &ancestor in ancestors_top_first {
            if next >= remaining.len() {
                break;
            }
            if node_matches(tree, ancestor, remaining[next]) {
                next += 1;
            }
        }
        if next < remaining.len() {
            continue;
        }

        log::trace!(
            target: "css.matcher",
            "rule `{}` matched element {:?}",
            rule.selector,
            tree.element_name(element)
        );
        for declaration in &rule.declarations {
            winners.push((declaration.property.clone(), declaration.value.clone()));
        }
    }

    if winners.is_empty() {
        return;
    }
    if let Some(style) = tree.computed_style_mut(element) {
        for (property, value) in winners {
            style.set(&property, &value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Vec<Attribute> {
        pairs
            .iter()
            .map(|&(name, value)| Attribute::new(name, value))
            .collect()
    }

    #[test]
    fn simple_selectors_match_by_kind() {
        let attributes = attrs(&[("id", "main"), ("class", "card wide")]);
        assert!(matches_simple("div", &attributes, "div"));
        assert!(matches_simple("div", &attributes, "#main"));
        assert!(matches_simple("div", &attributes, ".card"));
        assert!(matches_simple("div", &attributes, ".wide"));
        assert!(!matches_simple("div", &attributes, "span"));
        assert!(!matches_simple("div", &attributes, "#other"));
        assert!(!matches_simple("div", &attributes, ".car"));
    }

    #[test]
    fn class_matching_requires_whole_token() {
        let attributes = attrs(&[("class", "cardholder")]);
        assert!(!matches_simple("div", &attributes, ".card"));
    }

    fn build_chain(tree: &mut DomTree, names: &[(&str, &[(&str, &str)])]) -> Vec<NodeId> {
        let mut parent = tree.root();
        let mut ids = Vec::new();
        for &(name, attributes) in names {
            parent = tree.create_element(parent, name.to_string(), attrs(attributes));
            ids.push(parent);
        }
        ids
    }

    #[test]
    fn descendant_combinator_skips_non_matching_ancestors() {
        let mut tree = DomTree::new();
        let ids = build_chain(
            &mut tree,
            &[("html", &[]), ("body", &[]), ("section", &[]), ("p", &[])],
        );
        let element = ids[3];
        // Stack from insertion point down to root, element not yet pushed.
        let ancestors: Vec<NodeId> = ids[..3].iter().rev().copied().chain([tree.root()]).collect();

        let mut rules = RuleSet::new();
        rules.collect("html p { color: red; } body section p { margin: 0; } div p { color: blue; }");
        apply_matching_rules(&rules, &mut tree, element, &ancestors);

        let style = tree.computed_style(element).unwrap();
        // `html p` matches with `body`/`section` skipped; `div p` does not.
        assert_eq!(style.get("color"), Some("red"));
        assert_eq!(style.get("margin"), Some("0"));
    }

    #[test]
    fn higher_specificity_wins_regardless_of_source_order() {
        let mut tree = DomTree::new();
        let ids = build_chain(&mut tree, &[("body", &[]), ("div", &[("id", "x")])]);
        let element = ids[1];
        let ancestors = vec![ids[0], tree.root()];

        let mut rules = RuleSet::new();
        // Id rule first in source, tag rule second: the id rule still wins.
        rules.collect("#x { color: green; } div { color: red; }");
        apply_matching_rules(&rules, &mut tree, element, &ancestors);

        assert_eq!(
            tree.computed_style(element).unwrap().get("color"),
            Some("green")
        );
    }

    #[test]
    fn equal_specificity_later_rule_wins() {
        let mut tree = DomTree::new();
        let ids = build_chain(&mut tree, &[("div", &[])]);
        let element = ids[0];
        let ancestors = vec![tree.root()];

        let mut rules = RuleSet::new();
        rules.collect("div { color: red; } div { color: blue; }");
        apply_matching_rules(&rules, &mut tree, element, &ancestors);

        assert_eq!(
            tree.computed_style(element).unwrap().get("color"),
            Some("blue")
        );
    }

    #[test]
    fn no_match_leaves_style_empty() {
        let mut tree = DomTree::new();
        let ids = build_chain(&mut tree, &[("span", &[])]);
        let element = ids[0];

        let mut rules = RuleSet::new();
        rules.collect("div { color: red; }");
        let root = tree.root();
        apply_matching_rules(&rules, &mut tree, element, &[root]);

        assert!(tree.computed_style(element).unwrap().is_empty());
    }

    #[test]
    fn combinator_fails_when_an_ancestor_part_is_absent() {
        let mut tree = DomTree::new();
        let ids = build_chain(&mut tree, &[("span", &[]), ("p", &[])]);
        let element = ids[1];
        let ancestors = vec![ids[0], tree.root()];

        let mut rules = RuleSet::new();
        // `body p` needs a body ancestor; only a span is open.
        rules.collect("body p { color: red; }");
        apply_matching_rules(&rules, &mut tree, element, &ancestors);

        assert!(tree.computed_style(element).unwrap().is_empty());
    }
}
