//! Token kind definitions for the reference scanner's tokenizer.
//!
//! Each `TokenKind` variant represents a syntactic atom discovered during the
//! lenient scanning phase. Only four kinds matter to the scanner (keywords,
//! plain names, quoted identifiers and punctuation); literals and operators are
//! kept as tokens so that byte offsets stay contiguous and so that text inside
//! string literals can never be taken for a table name.
//!
//! See `keyword.rs` for the `Keyword` enum and `tokenizer.rs` for tokenization.

use crate::sql::keyword::Keyword;

/// Classification for a token produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Recognized SQL keyword.
    Keyword(Keyword),
    /// Unquoted table / alias / column / generic identifier.
    Name,
    /// Quoted identifier (`"name"` or `` `name` ``).
    Identifier,
    /// Structural punctuation: `(`, `)`, `,`, `;`, `.`, `:`, `[`, `]`.
    Punctuation(char),
    /// String or numeric literal.
    Literal,
    /// Any other symbol (`*`, `=`, `+`, ...).
    Operator(char),
}

impl TokenKind {
    /// True if this token is the given keyword.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == kw)
    }

    /// True for any keyword, curated or reserved.
    pub fn is_any_keyword(&self) -> bool {
        matches!(self, TokenKind::Keyword(_))
    }

    /// Names and quoted identifiers: the kinds that can denote a table and
    /// carry an alias.
    pub fn is_name_like(&self) -> bool {
        matches!(self, TokenKind::Name | TokenKind::Identifier)
    }

    /// Words only `sqlparser`'s alias list reserves. They never carry an
    /// alias but may still name a table.
    pub fn is_reserved_word(&self) -> bool {
        matches!(self, TokenKind::Keyword(Keyword::Reserved(_)))
    }

    pub fn is_punctuation(&self, c: char) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == c)
    }

    /// Punctuation other than the qualifying `.`.
    pub fn is_separator(&self) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p != '.')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::keyword::Keyword;

    #[test]
    fn keyword_detection() {
        let tk = TokenKind::Keyword(Keyword::Select);
        assert!(tk.is_keyword(Keyword::Select));
        assert!(!tk.is_keyword(Keyword::From));
        assert!(tk.is_any_keyword());
        assert!(!tk.is_name_like());
    }

    #[test]
    fn names_and_identifiers_are_name_like() {
        assert!(TokenKind::Name.is_name_like());
        assert!(TokenKind::Identifier.is_name_like());
        assert!(!TokenKind::Literal.is_name_like());
        assert!(!TokenKind::Operator('*').is_name_like());
    }

    #[test]
    fn punctuation_classification() {
        assert!(TokenKind::Punctuation(',').is_separator());
        assert!(TokenKind::Punctuation('(').is_separator());
        assert!(!TokenKind::Punctuation('.').is_separator());
        assert!(TokenKind::Punctuation('.').is_punctuation('.'));
        assert!(!TokenKind::Operator('=').is_separator());
    }
}
