//! Grammar-level CSS parsing: source text in, selectors and declarations out.
//!
//! This layer knows nothing about matching or the DOM; the rule set in
//! `rules` sits on top of it. The grammar is deliberately small: rule blocks,
//! comma selector lists, `property: value` declarations, and `/* */` comments.
//! Malformed fragments are skipped, never errors.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub selectors: Vec<String>,
    pub declarations: Vec<Declaration>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

pub fn parse_stylesheet(input: &str) -> Stylesheet {
    let source = strip_comments(input);
    let mut rules = Vec::new();

    for block in source.split('}') {
        let Some((selector_text, declaration_text)) = block.split_once('{') else {
            continue;
        };
        let selectors: Vec<String> = selector_text
            .split(',')
            .map(str::trim)
            .filter(|selector| !selector.is_empty())
            .map(collapse_whitespace)
            .collect();
        if selectors.is_empty() {
            continue;
        }
        let declarations = parse_declarations(declaration_text);
        if declarations.is_empty() {
            continue;
        }
        rules.push(Rule {
            selectors,
            declarations,
        });
    }

    Stylesheet { rules }
}

pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    for piece in input.split(';') {
        let Some((property, value)) = piece.split_once(':') else {
            continue;
        };
        let property = property.trim();
        let value = value.trim();
        if property.is_empty() || value.is_empty() {
            continue;
        }
        declarations.push(Declaration {
            property: property.to_ascii_lowercase(),
            value: value.to_string(),
        });
    }
    declarations
}

/// Remove `/* ... */` comments. An unterminated comment runs to end of input.
fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find("/*") {
        out.push_str(&rest[..open]);
        match rest[open + 2..].find("*/") {
            Some(close) => rest = &rest[open + 2 + close + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Normalize internal whitespace so selectors compare by parts.
fn collapse_whitespace(selector: &str) -> String {
    selector.split_whitespace().collect::<Vec<_>>().join(" ")
}
