//! CSS collection and matching for the rendering pipeline.
//!
//! `syntax` parses stylesheet text, `rules` accumulates rules with their
//! specificity over the lifetime of one parse, and `matcher` applies them to
//! elements as the tree builder inserts them.

pub mod matcher;
pub mod rules;
pub mod syntax;

pub use crate::matcher::{apply_matching_rules, matches_simple};
pub use crate::rules::{CollectedRule, RuleSet, Specificity};
pub use crate::syntax::{Declaration, Rule, Stylesheet, parse_declarations, parse_stylesheet};

use memchr::memchr2;

/// Content-type sniff for stylesheet payloads.
pub fn is_css(content_type: &Option<String>) -> bool {
    content_type
        .as_deref()
        .is_some_and(|value| contains_ignore_ascii_case(value, "text/css"))
}

fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    let hay = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() {
        return true;
    }
    if hay.len() < needle.len() {
        return false;
    }
    let lower = needle[0].to_ascii_lowercase();
    let upper = needle[0].to_ascii_uppercase();
    let mut offset = 0;
    while let Some(found) = memchr2(lower, upper, &hay[offset..]) {
        let start = offset + found;
        match hay.get(start..start + needle.len()) {
            Some(window) if window.eq_ignore_ascii_case(needle) => return true,
            Some(_) => offset = start + 1,
            None => return false,
        }
    }
    false
}
