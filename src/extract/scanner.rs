use crate::*;
use sqlparser::keywords::Keyword as SqlKeyword;
use std::collections::HashSet;

/// Where the scanner stands relative to a table list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Idle,
    AfterFrom,
    AfterJoin,
}

impl ScanState {
    /// True while names may still be table references.
    pub fn in_table_list(self) -> bool {
        !matches!(self, ScanState::Idle)
    }
}

/// Finite-state scanner over one statement's tokens that picks out the names
/// following `FROM` / `JOIN`.
///
/// Rules:
/// - Clause boundary keywords (`WHERE`, `ON`, `UNION`, ...) return to `Idle`.
/// - Punctuation other than `.` returns to `Idle`, except a comma right after
///   a name inside a table list (`FROM a, b`).
/// - A candidate followed by `.name` is qualified; the last part is the table.
/// - After a reference, `AS alias` or a bare `alias` sets a one-token skip so
///   the alias is never taken for a table.
/// - `LATERAL` returns to `Idle`; what follows is a call or a subquery.
/// - A word reserved only against aliases (`sample`, `view`, `settings`, ...)
///   is still a table name right after `FROM`, `JOIN` or a list comma.
/// - Names in `ctes` are shadowed and never reported.
pub struct TableScanner<'a> {
    tokens: &'a [Token],
    ctes: &'a HashSet<String>,
    state: ScanState,
    skip_next: bool,
    found: Vec<TableReference>,
}

impl<'a> TableScanner<'a> {
    pub fn new(tokens: &'a [Token], ctes: &'a HashSet<String>) -> Self {
        Self {
            tokens,
            ctes,
            state: ScanState::Idle,
            skip_next: false,
            found: Vec::new(),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn skip_pending(&self) -> bool {
        self.skip_next
    }

    /// Run the scanner to the end of the statement.
    pub fn scan(mut self) -> Vec<TableReference> {
        let mut i = 0;
        while i < self.tokens.len() {
            i = self.step(i);
        }
        self.found
    }

    /// Process the token at `i`, returning the index of the next token to
    /// visit. Qualified references consume more than one token.
    pub fn step(&mut self, i: usize) -> usize {
        let tokens = self.tokens;
        let token = &tokens[i];
        match token.kind {
            TokenKind::Keyword(kw) if kw.is_clause_boundary() => {
                if self.state.in_table_list() {
                    trace!(keyword = ?token.normalized_keyword(), "table list closed");
                }
                self.reset();
            }
            TokenKind::Keyword(Keyword::From) => self.enter(ScanState::AfterFrom),
            TokenKind::Keyword(Keyword::Join) => self.enter(ScanState::AfterJoin),
            kind if kind.is_separator() => {
                let continues_list = kind.is_punctuation(',')
                    && self.state.in_table_list()
                    && i > 0
                    && (tokens[i - 1].kind.is_name_like() || tokens[i - 1].kind.is_reserved_word());
                if !continues_list {
                    self.state = ScanState::Idle;
                }
                self.skip_next = false;
            }
            kind if kind.is_name_like() && self.state.in_table_list() => {
                if self.skip_next {
                    trace!(alias = %token.text, "skipping alias");
                    self.skip_next = false;
                } else {
                    return self.candidate(i);
                }
            }
            TokenKind::Keyword(Keyword::Reserved(SqlKeyword::LATERAL)) => self.reset(),
            TokenKind::Keyword(Keyword::Reserved(_)) if self.reserved_table_at(i) => {
                return self.candidate(i);
            }
            _ => {}
        }
        i + 1
    }

    fn reset(&mut self) {
        self.state = ScanState::Idle;
        self.skip_next = false;
    }

    fn enter(&mut self, state: ScanState) {
        self.state = state;
        self.skip_next = false;
    }

    /// True when the reserved word at `i` sits where a table name must start.
    /// A word opening a call or subquery is left alone.
    fn reserved_table_at(&self, i: usize) -> bool {
        if !self.state.in_table_list() || i == 0 {
            return false;
        }
        let prev = &self.tokens[i - 1];
        let table_position = prev.is_keyword(Keyword::From)
            || prev.is_keyword(Keyword::Join)
            || prev.kind.is_punctuation(',');
        let opens_call = self
            .tokens
            .get(i + 1)
            .is_some_and(|t| t.kind.is_punctuation('('));
        table_position && !opens_call
    }

    /// True when the name at `j` is followed by `.` and another name. Any
    /// word counts after a dot, reserved or not.
    fn qualified_at(&self, j: usize) -> bool {
        self.tokens
            .get(j + 1)
            .is_some_and(|t| t.kind.is_punctuation('.'))
            && self
                .tokens
                .get(j + 2)
                .is_some_and(|t| t.kind.is_name_like() || t.kind.is_reserved_word())
    }

    fn candidate(&mut self, i: usize) -> usize {
        let tokens = self.tokens;
        let first = &tokens[i];
        let candidate = first.real_name();
        if candidate.is_empty() {
            return i + 1;
        }

        let mut last = i;
        while self.qualified_at(last) {
            last += 2;
        }
        let table = tokens[last].real_name();

        if self.ctes.contains(&candidate) || self.ctes.contains(&table) {
            debug!(name = %candidate, "ignoring CTE reference");
        } else if !table.is_empty() {
            if last == i {
                debug!(table = %table, "found potential table");
            } else {
                debug!(qualifier = %candidate, table = %table, "found qualified table, using last part");
            }
            self.found.push(TableReference {
                name: table,
                span: first.start..tokens[last].end,
            });
        }

        let next = last + 1;
        match tokens.get(next) {
            Some(t) if t.is_keyword(Keyword::As) => {
                if tokens.get(next + 1).is_some_and(|a| a.kind.is_name_like()) {
                    self.skip_next = true;
                }
            }
            Some(t) if t.can_carry_alias() => self.skip_next = true,
            _ => {}
        }
        next
    }
}
