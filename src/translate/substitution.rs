use crate::*;
use itertools::Itertools;
use std::{cmp::Reverse, collections::HashMap, ops::Range};

/// A resolved table name and the call that replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Replacement {
    name: String,
    lowered: String,
    call: String,
}

/// Order names longest first, ties broken lexicographically, so that a name
/// always claims its occurrences before any shorter name it contains.
pub fn substitution_order<'a>(names: impl IntoIterator<Item = &'a String>) -> Vec<&'a str> {
    names
        .into_iter()
        .map(String::as_str)
        .sorted_by_key(|name| (Reverse(name.chars().count()), *name))
        .collect()
}

/// Replace every extracted table reference in `sql` with its templated call.
///
/// All-or-nothing: if any extracted name has no catalog entry, nothing is
/// substituted and [`Error::UnresolvedReferences`] lists every such name.
///
/// Rewriting is a single left-to-right pass over `tokens`:
/// - each FROM / JOIN reference span becomes the call for its table; the
///   schema qualifier is part of the span and is intentionally dropped;
/// - any other name or quoted identifier equal to a resolved name, ignoring
///   case, is replaced as well, except where it names a CTE.
///
/// String literals and comments are never touched.
pub fn substitute<R: Resolver + ?Sized>(
    sql: &str,
    tokens: &[Token],
    extraction: &Extraction,
    resolver: &R,
) -> Result<String> {
    if extraction.is_empty() {
        return Ok(sql.to_string());
    }

    let mut replacements = Vec::new();
    let mut unmatched = Vec::new();
    for name in substitution_order(&extraction.tables) {
        let normalized = strip_quotes(name);
        if normalized.is_empty() {
            continue;
        }
        match resolver.lookup(normalized) {
            Some(entry) => {
                let call = entry.templated_call().to_string();
                debug!(table = normalized, %call, "resolved table");
                replacements.push(Replacement {
                    name: name.to_string(),
                    lowered: normalized.to_lowercase(),
                    call,
                });
            }
            None => unmatched.push(normalized.to_string()),
        }
    }

    if !unmatched.is_empty() {
        return Err(Error::unresolved(unmatched));
    }

    Ok(rewrite(sql, tokens, extraction, &replacements))
}

fn rewrite(
    sql: &str,
    tokens: &[Token],
    extraction: &Extraction,
    replacements: &[Replacement],
) -> String {
    let references: HashMap<usize, &TableReference> = extraction
        .references
        .iter()
        .map(|r| (r.span.start, r))
        .collect();
    let mut counts = vec![0usize; replacements.len()];
    let mut edits: Vec<(Range<usize>, usize)> = Vec::new();

    for token in tokens {
        if edits.last().is_some_and(|(span, _)| token.start < span.end) {
            continue;
        }

        if let Some(reference) = references.get(&token.start) {
            if let Some(idx) = replacements.iter().position(|r| r.name == reference.name) {
                edits.push((reference.span.clone(), idx));
                counts[idx] += 1;
                continue;
            }
        }

        if !token.kind.is_name_like() && !token.kind.is_reserved_word() {
            continue;
        }
        let name = token.real_name();
        if extraction.ctes.contains(&name) {
            continue;
        }
        let lowered = name.to_lowercase();
        if let Some(idx) = replacements.iter().position(|r| r.lowered == lowered) {
            edits.push((token.span(), idx));
            counts[idx] += 1;
        }
    }

    for (replacement, count) in replacements.iter().zip(&counts) {
        if *count == 0 {
            warn!(table = %replacement.name, "no occurrence replaced");
        } else {
            debug!(table = %replacement.name, count, "replaced occurrences");
        }
    }

    let mut out = String::with_capacity(sql.len());
    let mut cursor = 0;
    for (span, idx) in edits {
        out.push_str(&sql[cursor..span.start]);
        out.push_str(&replacements[idx].call);
        cursor = span.end;
    }
    out.push_str(&sql[cursor..]);
    out
}
