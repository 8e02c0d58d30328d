use crate::*;
use std::collections::HashSet;

/// Collect the names a statement's WITH clause introduces.
///
/// After `WITH` the next name at parenthesis depth 0 is a CTE alias, and so
/// is the first name after every depth-0 comma. A depth-0 `SELECT`, `INSERT`,
/// `UPDATE` or `DELETE` ends the clause. Only name identity is tracked; CTE
/// bodies are not inspected.
pub fn collect_cte_names(tokens: &[Token]) -> HashSet<String> {
    let mut names = HashSet::new();
    let mut in_with = false;
    let mut name_next = false;
    let mut depth = 0usize;

    for token in tokens {
        match token.kind {
            TokenKind::Keyword(Keyword::With) => {
                in_with = true;
                name_next = true;
            }
            _ if !in_with => {}
            TokenKind::Keyword(kw) if depth == 0 && kw.is_statement_start() => break,
            TokenKind::Name | TokenKind::Identifier if name_next && depth == 0 => {
                let name = token.real_name();
                if !name.is_empty() {
                    names.insert(name);
                }
                name_next = false;
            }
            TokenKind::Punctuation('(') => depth += 1,
            TokenKind::Punctuation(')') => depth = depth.saturating_sub(1),
            TokenKind::Punctuation(',') if depth == 0 => name_next = true,
            _ => {}
        }
    }

    if !names.is_empty() {
        debug!(?names, "found CTE names (ignored as table references)");
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctes(sql: &str) -> Vec<String> {
        let tokens = tokenize(sql).expect("tokenize");
        let mut names: Vec<_> = collect_cte_names(&tokens).into_iter().collect();
        names.sort();
        names
    }

    #[rstest]
    #[case("SELECT * FROM orders", &[])]
    #[case("WITH recent AS (SELECT * FROM raw_orders) SELECT * FROM recent", &["recent"])]
    #[case(
        "WITH a AS (SELECT 1), b AS (SELECT x, y FROM a) SELECT * FROM b",
        &["a", "b"]
    )]
    #[case("WITH RECURSIVE walk AS (SELECT 1) SELECT * FROM walk", &["walk"])]
    #[case("WITH cols(x, y) AS (SELECT 1, 2) SELECT * FROM cols", &["cols"])]
    #[case("WITH \"Quoted\" AS (SELECT 1) SELECT * FROM \"Quoted\"", &["Quoted"])]
    #[case("with lower_case as (select 1) select * from lower_case", &["lower_case"])]
    fn collects_with_clause_names(#[case] sql: &str, #[case] expected: &[&str]) {
        assert_eq!(ctes(sql), expected);
    }

    #[test]
    fn stops_at_top_level_statement() {
        // `later` follows a depth-0 comma but the clause already ended.
        assert_eq!(
            ctes("WITH a AS (SELECT 1) SELECT x, later FROM a"),
            vec!["a".to_string()]
        );
    }

    #[test]
    fn table_hint_parentheses_are_not_cte_names() {
        assert!(ctes("SELECT * FROM t WITH (NOLOCK)").is_empty());
    }
}
