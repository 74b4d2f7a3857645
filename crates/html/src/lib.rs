//! HTML front end of the rendering pipeline: tokenizer, tree builder, and
//! the `Parser` session that ties them to CSS matching and layout.

mod error;
mod parser;
mod token;
mod tokenizer;
mod tree_builder;

pub use crate::error::{ParseError, TokenizerError, TokenizerErrorKind};
pub use crate::parser::{Parser, ParserConfig, ParserStats, parse};
pub use crate::token::Token;
pub use crate::tokenizer::{Tokenizer, TokenizerState, tokenize};
pub use crate::tree_builder::TreeBuilder;

use memchr::memchr2;

/// Content-type sniff for HTML payloads.
pub fn is_html(content_type: &Option<String>) -> bool {
    let Some(value) = content_type.as_deref() else {
        return false;
    };
    contains_ignore_ascii_case(value, "text/html")
        || contains_ignore_ascii_case(value, "application/xhtml")
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
