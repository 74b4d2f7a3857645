//! Character-level HTML tokenizer.
//!
//! An explicit state enum plus one transition function; the machine consumes
//! exactly one character per `push_char` call and is resumable at any chunk
//! boundary. Completed tokens queue up internally and are drained with
//! `next_token`.
//!
//! The grammar is intentionally small: tags, attributes in all three quoting
//! styles, self-closing tags, and text. No comments, doctypes, entities, or
//! rawtext elements. Inputs outside the grammar fail fast with a positioned
//! error instead of being repaired.

use std::collections::VecDeque;

use dom::Attribute;

use crate::error::{TokenizerError, TokenizerErrorKind};
use crate::token::Token;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenizerState {
    Data,
    TagOpen,
    EndTagOpen,
    TagName,
    BeforeAttributeName,
    AttributeName,
    AfterAttributeName,
    BeforeAttributeValue,
    DoubleQuotedAttributeValue,
    SingleQuotedAttributeValue,
    UnquotedAttributeValue,
    AfterQuotedAttributeValue,
    SelfClosingStartTag,
}

/// The tag currently being assembled, including the attribute in flight.
#[derive(Debug, Default)]
struct TagInProgress {
    name: String,
    attributes: Vec<Attribute>,
    is_end: bool,
    self_closing: bool,
    pending_name: String,
    pending_value: String,
    has_pending: bool,
}

impl TagInProgress {
    fn start(is_end: bool) -> Self {
        Self {
            is_end,
            ..Self::default()
        }
    }

    /// Commit any attribute in flight and open a fresh one.
    fn begin_attribute(&mut self) {
        self.commit_attribute();
        self.has_pending = true;
    }

    fn commit_attribute(&mut self) {
        if !self.has_pending {
            return;
        }
        let name = std::mem::take(&mut self.pending_name);
        let value = std::mem::take(&mut self.pending_value);
        self.has_pending = false;
        if name.is_empty() {
            return;
        }
        // A repeated attribute name keeps its first position but takes the
        // latest value.
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }
}

#[derive(Debug)]
pub struct Tokenizer {
    state: TokenizerState,
    position: usize,
    text_run: String,
    tag: Option<TagInProgress>,
    tokens: VecDeque<Token>,
    finished: bool,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            state: TokenizerState::Data,
            position: 0,
            text_run: String::new(),
            tag: None,
            tokens: VecDeque::new(),
            finished: false,
        }
    }

    pub fn state(&self) -> TokenizerState {
        self.state
    }

    /// Characters consumed so far; error positions index into this count.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Feed one character through the state machine.
    pub fn push_char(&mut self, ch: char) -> Result<(), TokenizerError> {
        let result = self.transition(ch);
        self.position += 1;
        result
    }

    /// Signal end of input. Pending text is flushed and `Token::Eof` queued;
    /// ending anywhere inside a tag is an error.
    pub fn finish(&mut self) -> Result<(), TokenizerError> {
        if self.finished {
            return Ok(());
        }
        if self.state != TokenizerState::Data {
            return Err(self.error(TokenizerErrorKind::UnterminatedTag));
        }
        self.flush_text();
        self.tokens.push_back(Token::Eof);
        self.finished = true;
        Ok(())
    }

    /// Drain the next completed token, if any.
    pub fn next_token(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    fn error(&self, kind: TokenizerErrorKind) -> TokenizerError {
        TokenizerError {
            kind,
            position: self.position,
        }
    }

    fn flush_text(&mut self) {
        if !self.text_run.is_empty() {
            let content = std::mem::take(&mut self.text_run);
            self.tokens.push_back(Token::Text { content });
        }
    }

    fn emit_tag(&mut self) {
        let Some(mut tag) = self.tag.take() else {
            return;
        };
        tag.commit_attribute();
        let token = if tag.is_end {
            // Anything parsed after an end tag name is dropped.
            Token::EndTag { name: tag.name }
        } else {
            Token::StartTag {
                name: tag.name,
                attributes: tag.attributes,
                self_closing: tag.self_closing,
            }
        };
        log::trace!(target: "html.tokenizer", "emit {token:?}");
        self.tokens.push_back(token);
    }

    fn tag_mut(&mut self) -> &mut TagInProgress {
        // Always present in tag states; a fresh one keeps the machine total.
        self.tag.get_or_insert_with(TagInProgress::default)
    }

    fn transition(&mut self, ch: char) -> Result<(), TokenizerError> {
        use TokenizerState::*;

        match self.state {
            Data => {
                if ch == '<' {
                    self.flush_text();
                    self.state = TagOpen;
                } else {
                    self.text_run.push(ch);
                }
                Ok(())
            }
            TagOpen => {
                if ch == '/' {
                    self.state = EndTagOpen;
                    Ok(())
                } else if ch.is_ascii_alphabetic() {
                    self.tag = Some(TagInProgress::start(false));
                    self.state = TagName;
                    self.transition(ch)
                } else {
                    // `<` not opening a tag is literal text.
                    self.text_run.push('<');
                    self.state = Data;
                    self.transition(ch)
                }
            }
            EndTagOpen => {
                if ch.is_ascii_alphabetic() {
                    self.tag = Some(TagInProgress::start(true));
                    self.state = TagName;
                    self.transition(ch)
                } else {
                    Err(self.error(TokenizerErrorKind::IllegalCharacter(ch)))
                }
            }
            TagName => {
                if ch.is_ascii_whitespace() {
                    self.state = BeforeAttributeName;
                } else if ch == '/' {
                    self.state = SelfClosingStartTag;
                } else if ch == '>' {
                    self.emit_tag();
                    self.state = Data;
                } else {
                    self.tag_mut().name.push(ch.to_ascii_lowercase());
                }
                Ok(())
            }
            BeforeAttributeName => {
                if ch.is_ascii_whitespace() {
                    Ok(())
                } else if ch == '>' || ch == '/' {
                    self.state = AfterAttributeName;
                    self.transition(ch)
                } else if ch == '=' {
                    Err(self.error(TokenizerErrorKind::IllegalCharacter(ch)))
                } else {
                    self.tag_mut().begin_attribute();
                    self.state = AttributeName;
                    self.transition(ch)
                }
            }
            AttributeName => {
                if ch.is_ascii_whitespace() || ch == '/' || ch == '>' {
                    self.state = AfterAttributeName;
                    self.transition(ch)
                } else if ch == '=' {
                    self.state = BeforeAttributeValue;
                    Ok(())
                } else if ch == '"' || ch == '\'' || ch == '<' {
                    Err(self.error(TokenizerErrorKind::IllegalCharacter(ch)))
                } else {
                    self.tag_mut().pending_name.push(ch.to_ascii_lowercase());
                    Ok(())
                }
            }
            AfterAttributeName => {
                if ch.is_ascii_whitespace() {
                    Ok(())
                } else if ch == '/' {
                    self.tag_mut().commit_attribute();
                    self.state = SelfClosingStartTag;
                    Ok(())
                } else if ch == '=' {
                    self.state = BeforeAttributeValue;
                    Ok(())
                } else if ch == '>' {
                    self.emit_tag();
                    self.state = Data;
                    Ok(())
                } else {
                    // A bare attribute followed by another name.
                    self.tag_mut().begin_attribute();
                    self.state = AttributeName;
                    self.transition(ch)
                }
            }
            BeforeAttributeValue => {
                if ch.is_ascii_whitespace() {
                    Ok(())
                } else if ch == '"' {
                    self.state = DoubleQuotedAttributeValue;
                    Ok(())
                } else if ch == '\'' {
                    self.state = SingleQuotedAttributeValue;
                    Ok(())
                } else if ch == '>' {
                    Err(self.error(TokenizerErrorKind::IllegalCharacter(ch)))
                } else {
                    self.state = UnquotedAttributeValue;
                    self.transition(ch)
                }
            }
            DoubleQuotedAttributeValue => {
                if ch == '"' {
                    self.tag_mut().commit_attribute();
                    self.state = AfterQuotedAttributeValue;
                } else {
                    self.tag_mut().pending_value.push(ch);
                }
                Ok(())
            }
            SingleQuotedAttributeValue => {
                if ch == '\'' {
                    self.tag_mut().commit_attribute();
                    self.state = AfterQuotedAttributeValue;
                } else {
                    self.tag_mut().pending_value.push(ch);
                }
                Ok(())
            }
            UnquotedAttributeValue => {
                if ch.is_ascii_whitespace() {
                    self.tag_mut().commit_attribute();
                    self.state = BeforeAttributeName;
                    Ok(())
                } else if ch == '/' {
                    self.tag_mut().commit_attribute();
                    self.state = SelfClosingStartTag;
                    Ok(())
                } else if ch == '>' {
                    self.emit_tag();
                    self.state = Data;
                    Ok(())
                } else if matches!(ch, '"' | '\'' | '<' | '=' | '`') {
                    Err(self.error(TokenizerErrorKind::IllegalCharacter(ch)))
                } else {
                    self.tag_mut().pending_value.push(ch);
                    Ok(())
                }
            }
            AfterQuotedAttributeValue => {
                if ch.is_ascii_whitespace() {
                    self.state = BeforeAttributeName;
                    Ok(())
                } else if ch == '/' {
                    self.state = SelfClosingStartTag;
                    Ok(())
                } else if ch == '>' {
                    self.emit_tag();
                    self.state = Data;
                    Ok(())
                } else {
                    // `<a href="x"id=...>`: start the next attribute.
                    self.state = BeforeAttributeName;
                    self.transition(ch)
                }
            }
            SelfClosingStartTag => {
                if ch == '>' {
                    self.tag_mut().self_closing = true;
                    self.emit_tag();
                    self.state = Data;
                    Ok(())
                } else {
                    Err(self.error(TokenizerErrorKind::IllegalCharacter(ch)))
                }
            }
        }
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokenize a complete string in one call.
pub fn tokenize(input: &str) -> Result<Vec<Token>, TokenizerError> {
    let mut tokenizer = Tokenizer::new();
    let mut tokens = Vec::new();
    for ch in input.chars() {
        tokenizer.push_char(ch)?;
        while let Some(token) = tokenizer.next_token() {
            tokens.push(token);
        }
    }
    tokenizer.finish()?;
    while let Some(token) = tokenizer.next_token() {
        tokens.push(token);
    }
    Ok(tokens)
}
