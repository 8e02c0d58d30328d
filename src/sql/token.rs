//! Token model tying a `TokenKind` to its source text and span.
//!
//! A `Token` is its classification (`kind`), the exact source text and the
//! byte offsets (`start`, `end`) into the original SQL string. Offsets let the
//! substitution engine rewrite the original text in place without re-matching
//! it, so tokens are never built from a reconstructed string.
//!
//! See sibling modules:
//! - `keyword.rs`    for the `Keyword` enum.
//! - `token_kind.rs` for `TokenKind` classification.
//! - `tokenizer.rs`  for producing `Vec<Token>` from raw SQL input.
use crate::sql::{keyword::Keyword, token_kind::TokenKind};
use std::ops::Range;

/// Quote characters stripped from candidate table names.
pub const QUOTE_CHARS: [char; 3] = ['"', '`', '\''];

/// Strip any leading and trailing quote characters.
pub fn strip_quotes(name: &str) -> &str {
    name.trim_matches(QUOTE_CHARS.as_slice())
}

/// A lexical token with its inclusive start and exclusive end byte offsets.
///
/// Invariants:
/// - `end >= start`
/// - `[start, end)` is a valid slice range for the original input and
///   `text == &input[start..end]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            start,
            end,
        }
    }

    /// Returns true if this token represents a given keyword.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.kind.is_keyword(kw)
    }

    /// Upper-cased keyword text, `None` for anything but keywords.
    pub fn normalized_keyword(&self) -> Option<String> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(
                kw.as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| self.text.to_ascii_uppercase()),
            ),
            _ => None,
        }
    }

    /// Names and quoted identifiers may be followed by an alias.
    pub fn can_carry_alias(&self) -> bool {
        self.kind.is_name_like()
    }

    /// The name this token denotes: the unquoted content of a quoted
    /// identifier (doubled quotes collapsed), the plain text otherwise, with
    /// any stray surrounding quote characters removed.
    pub fn real_name(&self) -> String {
        match self.kind {
            TokenKind::Identifier => {
                let quote = self.text.chars().next().unwrap_or('"');
                let doubled: String = [quote, quote].iter().collect();
                strip_quotes(&self.text.replace(&doubled, &quote.to_string())).to_string()
            }
            _ => strip_quotes(&self.text).to_string(),
        }
    }

    /// Byte range of this token in the original input.
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}
