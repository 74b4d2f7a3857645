//! Rule collection and specificity.
//!
//! One `RuleSet` lives per parse. It grows monotonically as `<style>` blocks
//! close; rules are never removed or re-ordered after collection, so source
//! order is exactly collection order.

use crate::syntax::{Declaration, parse_stylesheet};

/// Selector weight as `(inline, id, class, tag)` counts.
///
/// The derived `Ord` compares fields left to right, which is exactly the
/// cascade's "compare from the highest-weight position" rule. The inline slot
/// is reserved; nothing sets it yet since inline `style=""` attributes are
/// not consulted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity(pub u16, pub u16, pub u16, pub u16);

impl Specificity {
    /// Compute the weight of a whitespace-separated compound selector.
    pub fn of(selector: &str) -> Self {
        let mut weight = Specificity::default();
        for part in selector.split_whitespace() {
            if part.starts_with('#') {
                weight.1 += 1;
            } else if part.starts_with('.') {
                weight.2 += 1;
            } else {
                weight.3 += 1;
            }
        }
        weight
    }
}

/// One collected rule: a single selector with its declarations and weight.
#[derive(Clone, Debug)]
pub struct CollectedRule {
    pub selector: String,
    pub declarations: Vec<Declaration>,
    pub specificity: Specificity,
}

/// All rules collected so far for one document.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<CollectedRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stylesheet and append its rules. Each rule contributes only
    /// its first selector; the rest of a comma list is dropped.
    pub fn collect(&mut self, style_text: &str) {
        let sheet = parse_stylesheet(style_text);
        for rule in sheet.rules {
            let Some(selector) = rule.selectors.into_iter().next() else {
                continue;
            };
            let specificity = Specificity::of(&selector);
            self.rules.push(CollectedRule {
                selector,
                declarations: rule.declarations,
                specificity,
            });
        }
        log::debug!(
            target: "css.rules",
            "rule set holds {} rules after collect",
            self.rules.len()
        );
    }

    pub fn rules(&self) -> &[CollectedRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specificity_counts_by_kind() {
        assert_eq!(Specificity::of("div"), Specificity(0, 0, 0, 1));
        assert_eq!(Specificity::of("#main .item"), Specificity(0, 1, 1, 0));
        assert_eq!(Specificity::of("body div .a .b"), Specificity(0, 0, 2, 2));
    }

    #[test]
    fn specificity_orders_by_highest_weight_first() {
        // One id beats any number of classes or tags.
        assert!(Specificity(0, 1, 0, 0) > Specificity(0, 0, 9, 9));
        assert!(Specificity(0, 0, 1, 0) > Specificity(0, 0, 0, 9));
        // Ties fall through to the next position.
        assert!(Specificity(0, 1, 1, 0) > Specificity(0, 1, 0, 5));
        assert_eq!(Specificity(0, 0, 1, 1), Specificity(0, 0, 1, 1));
    }

    #[test]
    fn collect_appends_and_keeps_first_selector_only() {
        let mut rules = RuleSet::new();
        rules.collect("div, .extra { color: red; }");
        rules.collect("#main { width: 100px; }");

        assert_eq!(rules.len(), 2);
        assert_eq!(rules.rules()[0].selector, "div");
        assert_eq!(rules.rules()[0].specificity, Specificity(0, 0, 0, 1));
        assert_eq!(rules.rules()[1].selector, "#main");
        assert_eq!(rules.rules()[1].specificity, Specificity(0, 1, 0, 0));
    }
}
