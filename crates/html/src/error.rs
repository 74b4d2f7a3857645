use thiserror::Error;

/// What went wrong inside the tokenizer state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TokenizerErrorKind {
    #[error("input ended inside a tag")]
    UnterminatedTag,
    #[error("illegal character `{0}`")]
    IllegalCharacter(char),
}

/// A tokenizer failure with the character offset it occurred at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{kind} at offset {position}")]
pub struct TokenizerError {
    pub kind: TokenizerErrorKind,
    pub position: usize,
}

/// Fatal parse failures. Nothing here is recovered internally; the session
/// that hit one is unusable afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),
    #[error("end tag </{found}> does not close <{expected}>")]
    StructuralMismatch { expected: String, found: String },
    #[error("input ended with {open} element(s) still open")]
    MalformedDocument { open: usize },
}
