use dom::Attribute;

/// Output of the tokenizer. Tokens are handed to the tree builder as soon as
/// they are complete and are never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    StartTag {
        name: String,
        attributes: Vec<Attribute>,
        self_closing: bool,
    },
    EndTag {
        name: String,
    },
    Text {
        content: String,
    },
    Eof,
}
