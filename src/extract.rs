//! Table reference extraction over a flat token stream.
//!
//! Two passes per input: every statement's WITH clause is collected first
//! (`cte`), then each statement is scanned for FROM / JOIN references
//! (`scanner`) with the collected CTE names shadowing catalog names.
crate::reexport!(cte);
crate::reexport!(scanner);

use crate::*;
use std::{collections::HashSet, ops::Range};

/// A table reference accepted by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReference {
    /// Table name without quotes or schema qualifier, original case.
    pub name: String,
    /// Bytes of the original text the reference occupies, qualifier included.
    pub span: Range<usize>,
}

/// Everything the scanner found in one input text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Unique table names.
    pub tables: HashSet<String>,
    /// CTE names that were shadowed while scanning.
    pub ctes: HashSet<String>,
    /// Every accepted reference occurrence, in text order.
    pub references: Vec<TableReference>,
}

impl Extraction {
    /// Run both passes over an already tokenized text.
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let ctes: HashSet<String> = statements(tokens).flat_map(collect_cte_names).collect();

        let references: Vec<TableReference> = statements(tokens)
            .flat_map(|stmt| TableScanner::new(stmt, &ctes).scan())
            .collect();
        let tables = references.iter().map(|r| r.name.clone()).collect();

        Self {
            tables,
            ctes,
            references,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Tokenize `sql` and extract its table references.
pub fn extract_tables(sql: &str) -> Result<Extraction> {
    let tokens = tokenize(sql)?;
    Ok(Extraction::from_tokens(&tokens))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(set: &HashSet<String>) -> Vec<&str> {
        let mut v: Vec<_> = set.iter().map(String::as_str).collect();
        v.sort();
        v
    }

    #[test]
    fn sql_without_from_or_join_extracts_nothing() {
        for sql in ["", "SELECT 1", "SELECT now()", "INSERT INTO t VALUES (1)"] {
            let extraction = extract_tables(sql).unwrap();
            assert!(extraction.is_empty(), "{sql}");
        }
    }

    #[test]
    fn cte_shadows_across_statements() {
        let sql = "SELECT * FROM recent; WITH recent AS (SELECT * FROM raw_orders) SELECT * FROM recent";
        let extraction = extract_tables(sql).unwrap();
        assert_eq!(sorted(&extraction.tables), vec!["raw_orders"]);
        assert_eq!(sorted(&extraction.ctes), vec!["recent"]);
    }

    #[test]
    fn references_keep_every_occurrence() {
        let sql = "SELECT * FROM a JOIN a AS a2 ON a.id = a2.id";
        let extraction = extract_tables(sql).unwrap();
        assert_eq!(extraction.tables.len(), 1);
        assert_eq!(extraction.references.len(), 2);
        assert!(extraction.references.iter().all(|r| &sql[r.span.clone()] == "a"));
    }

    #[test]
    fn malformed_input_fails_to_tokenize() {
        assert!(matches!(
            extract_tables("SELECT * FROM 'oops"),
            Err(Error::Parse { .. })
        ));
    }
}
