use crate::sql::{keyword::Keyword, token::Token, token_kind::TokenKind};
use crate::*;
use std::{iter::Peekable, str::CharIndices};

type Chars<'a> = Peekable<CharIndices<'a>>;

/// Lenient SQL tokenizer producing a flat stream of `Token`s.
///
/// Scope / Intent:
/// - Feeds the CTE collector, the table reference scanner and the span
///   rewriter; accepts any statement shape without building a syntax tree.
/// - Classifies keywords via [`Keyword::classify`].
///
/// Behavior:
/// - Skips whitespace, `-- line` comments and `/* block */` comments.
/// - Aggregates `[A-Za-z0-9_$]` runs (starting with a letter or `_`) into
///   names, preserving original case.
/// - `"quoted"` and `` `quoted` `` runs become identifiers; `'quoted'` runs and
///   numbers become literals. Doubled quotes escape a quote; inside `'` and
///   `"` a backslash escapes the next character, unless that leaves the
///   quote unterminated, in which case the backslash is a plain character
///   (`'C:\'`).
/// - Emits single-character tokens for punctuation; everything else is an
///   `Operator(char)`.
///
/// Errors:
/// - Unterminated string literals, quoted identifiers and block comments are
///   reported as [`Error::Parse`] with the byte offset where they start.
///
/// Complexity:
/// - O(n) time, O(t) space where `t` is number of tokens.
pub fn tokenize(sql: &str) -> Result<Vec<Token>> {
    let mut out = Vec::new();
    let mut chars = sql.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        // Comments
        if c == '-' && matches!(chars.peek(), Some((_, '-'))) {
            for (_, cc) in chars.by_ref() {
                if cc == '\n' {
                    break;
                }
            }
            continue;
        }
        if c == '/' && matches!(chars.peek(), Some((_, '*'))) {
            chars.next();
            if !skip_block_comment(&mut chars) {
                return Err(Error::parse("unterminated block comment", start));
            }
            continue;
        }

        // Word path
        if c.is_alphabetic() || c == '_' {
            let end = consume_while(&mut chars, sql.len(), |cc| {
                cc.is_alphanumeric() || cc == '_' || cc == '$'
            });
            let text = &sql[start..end];
            let kind = Keyword::classify(text)
                .map(TokenKind::Keyword)
                .unwrap_or(TokenKind::Name);
            out.push(Token::new(kind, text, start, end));
            continue;
        }

        if c.is_ascii_digit() {
            let end = consume_while(&mut chars, sql.len(), |cc| {
                cc.is_ascii_alphanumeric() || cc == '_' || cc == '.'
            });
            out.push(Token::new(TokenKind::Literal, &sql[start..end], start, end));
            continue;
        }

        // Quoted path
        if matches!(c, '\'' | '"' | '`') {
            let rescan = chars.clone();
            let end = consume_quoted(&mut chars, c, c != '`').or_else(|| {
                chars = rescan;
                consume_quoted(&mut chars, c, false)
            });
            let Some(end) = end else {
                let what = if c == '\'' {
                    "string literal"
                } else {
                    "quoted identifier"
                };
                return Err(Error::parse(format!("unterminated {what}"), start));
            };
            let kind = if c == '\'' {
                TokenKind::Literal
            } else {
                TokenKind::Identifier
            };
            out.push(Token::new(kind, &sql[start..end], start, end));
            continue;
        }

        // Single-character tokens
        let end = start + c.len_utf8();
        let kind = match c {
            '(' | ')' | ',' | ';' | '.' | ':' | '[' | ']' => TokenKind::Punctuation(c),
            other => TokenKind::Operator(other),
        };
        out.push(Token::new(kind, &sql[start..end], start, end));
    }

    trace!(tokens = out.len(), "tokenized SQL");
    Ok(out)
}

/// Split a token stream into statements on `;`, dropping empty statements.
pub fn statements(tokens: &[Token]) -> impl Iterator<Item = &[Token]> {
    tokens
        .split(|t| t.kind.is_punctuation(';'))
        .filter(|stmt| !stmt.is_empty())
}

/// Advance while `pred` holds; returns the byte offset of the first rejected
/// character (or `eof`).
fn consume_while(chars: &mut Chars<'_>, eof: usize, pred: impl Fn(char) -> bool) -> usize {
    while let Some(&(idx, cc)) = chars.peek() {
        if !pred(cc) {
            return idx;
        }
        chars.next();
    }
    eof
}

/// Consume up to and including the closing `quote`. Returns the exclusive end
/// offset, or `None` when the input ends first.
fn consume_quoted(chars: &mut Chars<'_>, quote: char, backslash_escapes: bool) -> Option<usize> {
    while let Some((idx, cc)) = chars.next() {
        if backslash_escapes && cc == '\\' {
            chars.next();
            continue;
        }
        if cc == quote {
            if matches!(chars.peek(), Some(&(_, next)) if next == quote) {
                chars.next();
                continue;
            }
            return Some(idx + cc.len_utf8());
        }
    }
    None
}

/// Skip past the closing `*/`; false if the input ends first.
fn skip_block_comment(chars: &mut Chars<'_>) -> bool {
    let mut prev = '\0';
    for (_, cc) in chars.by_ref() {
        if prev == '*' && cc == '/' {
            return true;
        }
        prev = cc;
    }
    false
}
