//! One parse session: bytes or text in, laid-out DOM out.
//!
//! All per-parse state (tokenizer, open-element stack, rule set, UTF-8
//! carry) lives here, so sessions are independent and any number can run
//! concurrently on their own inputs.

use css::RuleSet;
use dom::DomTree;

use crate::error::ParseError;
use crate::tokenizer::Tokenizer;
use crate::tree_builder::TreeBuilder;

#[derive(Clone, Debug)]
pub struct ParserConfig {
    /// Merge adjacent text tokens into a single DOM node.
    pub coalesce_text: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            coalesce_text: true,
        }
    }
}

/// Counters over the lifetime of one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParserStats {
    pub chars_consumed: u64,
    pub tokens_emitted: u64,
}

#[derive(Debug)]
pub struct Parser {
    tokenizer: Tokenizer,
    builder: TreeBuilder,
    carry: Vec<u8>,
    stats: ParserStats,
}

impl Parser {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            builder: TreeBuilder::with_text_coalescing(config.coalesce_text),
            carry: Vec::new(),
            stats: ParserStats::default(),
        }
    }

    /// Feed a byte chunk. Chunks may split UTF-8 sequences anywhere; a
    /// trailing incomplete sequence is carried into the next call. Invalid
    /// sequences decode as U+FFFD.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<(), ParseError> {
        let mut text = String::new();
        decode_chunk(&mut text, &mut self.carry, bytes);
        self.feed(&text)
    }

    /// Feed a text chunk.
    pub fn push_str(&mut self, text: &str) -> Result<(), ParseError> {
        self.feed(text)
    }

    /// Finish the session: flush any carried bytes, run end-of-input through
    /// the tokenizer, and verify the document closed cleanly.
    pub fn finish(mut self) -> Result<DomTree, ParseError> {
        if !self.carry.is_empty() {
            // Bytes that never completed a sequence are garbage by now.
            self.carry.clear();
            self.feed("\u{FFFD}")?;
        }
        self.tokenizer.finish()?;
        self.pump()?;
        self.builder.finish()
    }

    pub fn stats(&self) -> ParserStats {
        self.stats
    }

    /// Rules collected so far, mainly useful for diagnostics.
    pub fn rules(&self) -> &RuleSet {
        self.builder.rules()
    }

    fn feed(&mut self, text: &str) -> Result<(), ParseError> {
        for ch in text.chars() {
            self.tokenizer.push_char(ch)?;
            self.stats.chars_consumed += 1;
            self.pump()?;
        }
        Ok(())
    }

    fn pump(&mut self) -> Result<(), ParseError> {
        while let Some(token) = self.tokenizer.next_token() {
            self.stats.tokens_emitted += 1;
            self.builder.push_token(token)?;
        }
        Ok(())
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a complete document in one call.
pub fn parse(input: &str) -> Result<DomTree, ParseError> {
    let mut parser = Parser::new();
    parser.push_str(input)?;
    parser.finish()
}

/// Incremental UTF-8 decoding with a carry buffer for split sequences.
fn decode_chunk(text: &mut String, carry: &mut Vec<u8>, bytes: &[u8]) {
    let mut buffer = Vec::new();
    let mut input: &[u8] = bytes;
    if !carry.is_empty() {
        buffer = std::mem::take(carry);
        buffer.extend_from_slice(bytes);
        input = &buffer;
    }

    loop {
        match std::str::from_utf8(input) {
            Ok(valid) => {
                text.push_str(valid);
                return;
            }
            Err(error) => {
                let valid_up_to = error.valid_up_to();
                if let Ok(valid) = std::str::from_utf8(&input[..valid_up_to]) {
                    text.push_str(valid);
                }
                match error.error_len() {
                    // A malformed sequence in the middle of the chunk.
                    Some(len) => {
                        text.push('\u{FFFD}');
                        input = &input[valid_up_to + len..];
                    }
                    // A sequence cut off at the chunk boundary.
                    None => {
                        carry.extend_from_slice(&input[valid_up_to..]);
                        return;
                    }
                }
            }
        }
    }
}
