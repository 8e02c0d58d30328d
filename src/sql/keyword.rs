//! SQL keyword model used by the reference scanner.
//!
//! The scanner only branches on a handful of keywords (`WITH`, `FROM`,
//! `JOIN`, `AS`, the statement starters and the clause boundaries), so those
//! get their own variants. Every other word that `sqlparser` reserves against
//! use as a table alias (`LEFT`, `INNER`, `HAVING`, `QUALIFY`, ...) is still
//! classified as a keyword through [`Keyword::Reserved`], which keeps such
//! words from being mistaken for an implicit alias after a table name.
//!
//! Design notes:
//! - Curated keywords are matched case-insensitively via `from_lower` using a
//!   pre-lower-cased string slice.
//! - `as_str` provides the canonical upper-case spelling used as the token's
//!   normalized keyword text.

use sqlparser::keywords::{
    ALL_KEYWORDS, ALL_KEYWORDS_INDEX, Keyword as SqlKeyword, RESERVED_FOR_TABLE_ALIAS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    With,
    Recursive,
    Select,
    Insert,
    Update,
    Delete,
    From,
    Join,
    As,
    Where,
    Group,
    Order,
    Limit,
    On,
    Using,
    Union,
    Intersect,
    Except,
    Window,
    Partition,
    Fetch,
    Offset,
    Having,
    Qualify,
    Returning,
    /// Any other word `sqlparser` refuses as an implicit table alias.
    Reserved(SqlKeyword),
}

impl Keyword {
    /// Keywords that close a FROM / JOIN table list.
    pub const CLAUSE_BOUNDARIES: [Self; 16] = [
        Keyword::Where,
        Keyword::Group,
        Keyword::Order,
        Keyword::Limit,
        Keyword::On,
        Keyword::Using,
        Keyword::Union,
        Keyword::Intersect,
        Keyword::Except,
        Keyword::Window,
        Keyword::Partition,
        Keyword::Fetch,
        Keyword::Offset,
        Keyword::Having,
        Keyword::Qualify,
        Keyword::Returning,
    ];

    /// Keywords that start the main statement body after a WITH clause.
    pub const STATEMENT_STARTS: [Self; 4] = [
        Keyword::Select,
        Keyword::Insert,
        Keyword::Update,
        Keyword::Delete,
    ];

    /// Attempt to classify a *lower-cased* word slice into one of the
    /// curated keywords. Returns `None` if the word is not one of them.
    ///
    /// NOTE: The caller is responsible for lower-casing the input.
    pub fn from_lower(word: &str) -> Option<Self> {
        use Keyword::*;
        let kw = match word {
            "with" => With,
            "recursive" => Recursive,
            "select" => Select,
            "insert" => Insert,
            "update" => Update,
            "delete" => Delete,
            "from" => From,
            "join" => Join,
            "as" => As,
            "where" => Where,
            "group" => Group,
            "order" => Order,
            "limit" => Limit,
            "on" => On,
            "using" => Using,
            "union" => Union,
            "intersect" => Intersect,
            "except" => Except,
            "window" => Window,
            "partition" => Partition,
            "fetch" => Fetch,
            "offset" => Offset,
            "having" => Having,
            "qualify" => Qualify,
            "returning" => Returning,
            _ => return None,
        };
        Some(kw)
    }

    /// Classify a word of any case: curated keywords first, then the
    /// `sqlparser` table-alias reserved list.
    pub fn classify(word: &str) -> Option<Self> {
        if let Some(kw) = Self::from_lower(&word.to_ascii_lowercase()) {
            return Some(kw);
        }
        let upper = word.to_ascii_uppercase();
        let idx = ALL_KEYWORDS.binary_search(&upper.as_str()).ok()?;
        let kw = ALL_KEYWORDS_INDEX[idx];
        RESERVED_FOR_TABLE_ALIAS
            .contains(&kw)
            .then_some(Keyword::Reserved(kw))
    }

    pub fn is_clause_boundary(self) -> bool {
        Self::CLAUSE_BOUNDARIES.contains(&self)
    }

    pub fn is_statement_start(self) -> bool {
        Self::STATEMENT_STARTS.contains(&self)
    }

    /// Canonical upper-case string form of a curated keyword. `Reserved`
    /// keywords have no static spelling here; tokens normalize those from
    /// their own text.
    pub const fn as_str(self) -> Option<&'static str> {
        use Keyword::*;
        let s = match self {
            With => "WITH",
            Recursive => "RECURSIVE",
            Select => "SELECT",
            Insert => "INSERT",
            Update => "UPDATE",
            Delete => "DELETE",
            From => "FROM",
            Join => "JOIN",
            As => "AS",
            Where => "WHERE",
            Group => "GROUP",
            Order => "ORDER",
            Limit => "LIMIT",
            On => "ON",
            Using => "USING",
            Union => "UNION",
            Intersect => "INTERSECT",
            Except => "EXCEPT",
            Window => "WINDOW",
            Partition => "PARTITION",
            Fetch => "FETCH",
            Offset => "OFFSET",
            Having => "HAVING",
            Qualify => "QUALIFY",
            Returning => "RETURNING",
            Reserved(_) => return None,
        };
        Some(s)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self, self.as_str()) {
            (_, Some(s)) => f.write_str(s),
            (Keyword::Reserved(kw), None) => write!(f, "{kw:?}"),
            (kw, None) => write!(f, "{kw:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_curated_keywords_in_any_case() {
        for w in ["with", "FROM", "Join", "as", "Where", "oFFset", "recursive"] {
            assert!(
                matches!(Keyword::classify(w), Some(kw) if !matches!(kw, Keyword::Reserved(_))),
                "{w} should be a curated keyword"
            );
        }
    }

    #[test]
    fn reserved_alias_words_are_keywords() {
        for w in ["left", "INNER", "cross", "natural", "full"] {
            assert!(
                matches!(Keyword::classify(w), Some(Keyword::Reserved(_))),
                "{w} should be reserved"
            );
        }
    }

    #[test]
    fn rejects_ordinary_words() {
        for w in ["orders", "raw_customers", "o", "c", "stg_payments"] {
            assert!(Keyword::classify(w).is_none(), "{w} should NOT be a keyword");
        }
    }

    #[test]
    fn boundaries_and_statement_starts() {
        assert!(Keyword::Where.is_clause_boundary());
        assert!(Keyword::Partition.is_clause_boundary());
        assert!(!Keyword::From.is_clause_boundary());
        assert!(Keyword::Delete.is_statement_start());
        assert!(!Keyword::With.is_statement_start());
    }

    #[test]
    fn display_matches_as_str() {
        for kw in Keyword::CLAUSE_BOUNDARIES {
            assert_eq!(Some(kw.to_string().as_str()), kw.as_str());
        }
    }
}
