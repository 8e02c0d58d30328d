//! Lightweight, lenient SQL tokenization module.
//!
//! This module groups the lexical building blocks the reference scanner uses
//! to reason about table references without requiring a full parser.
//!
//! Modules:
//! - `keyword`    : Curated scanner keywords plus `sqlparser`'s alias-reserved words.
//! - `token_kind` : Classification of lexical atoms (names, identifiers, punctuation, keywords).
//! - `token`      : Token struct pairing a `TokenKind` with its text and source span.
//! - `tokenizer`  : Single pass O(n) tokenizer producing a `Vec<Token>` from raw SQL.
//!
//! Design Principles:
//! 1. Accept any statement shape; only unterminated quotes/comments fail.
//! 2. Preserve original identifier casing for lookup and display.
//! 3. Keep byte offsets exact so the original text can be rewritten in place.
//!
//! Example:
//! ```rust
//! use dbtref::prelude::*;
//!
//! let tokens = tokenize("SELECT a, b FROM my_table").unwrap();
//! assert!(tokens.iter().any(|t| t.is_keyword(Keyword::Select)));
//! assert!(tokens.iter().any(|t| t.real_name() == "my_table"));
//! ```
//!
//! Statement structure beyond FROM / JOIN / WITH is never modelled; the
//! scanner only needs a flat token stream.

pub mod keyword;
pub mod token;
pub mod token_kind;
pub mod tokenizer;

pub use keyword::Keyword;
pub use token::{QUOTE_CHARS, Token, strip_quotes};
pub use token_kind::TokenKind;
pub use tokenizer::{statements, tokenize};

/// Convenience prelude re-exporting the most commonly used items.
///
/// Import with:
/// `use dbtref::prelude::*;`
pub mod prelude {
    pub use super::{Keyword, Token, TokenKind, statements, tokenize};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_and_access() {
        let tokens = tokenize("SELECT col FROM tbl").unwrap();
        assert!(tokens.iter().any(|t| t.is_keyword(Keyword::Select)));
        assert!(tokens.iter().any(|t| t.is_keyword(Keyword::From)));
        assert!(tokens.iter().any(|t| t.real_name() == "col"));
        assert!(tokens.iter().any(|t| t.real_name() == "tbl"));
    }

    #[test]
    fn prelude_import_works() {
        use super::prelude::*;
        let toks = tokenize("FROM X").unwrap();
        assert!(toks.iter().any(|t| t.is_keyword(Keyword::From)));
        assert!(toks.iter().any(|t| t.kind == TokenKind::Name && t.text == "X"));
    }
}
