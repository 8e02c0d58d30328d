crate::reexport!(result);
crate::reexport!(substitution);

use crate::*;

/// Translate raw SQL into dbt-templated SQL against `catalog`.
///
/// Pure and synchronous; every failure is folded into the returned
/// [`TranslationResult`]:
/// - no catalog, or an empty one: `CatalogUnavailable`, checked first;
/// - unterminated quotes or comments: `ParseFailure`;
/// - any table without a catalog entry: `UnresolvedReferences`.
///
/// SQL without table references comes back unchanged as a success.
pub fn translate<R: Resolver + ?Sized>(catalog: Option<&R>, sql: &str) -> TranslationResult {
    let _span = span!(tracing::Level::DEBUG, "translate", bytes = sql.len()).entered();

    let catalog = match catalog {
        Some(catalog) if !catalog.is_empty() => catalog,
        _ => {
            warn!("reference map is not available or empty");
            return TranslationResult::failure(sql, Error::CatalogUnavailable);
        }
    };

    let tokens = match tokenize(sql) {
        Ok(tokens) => tokens,
        Err(err) => {
            error!(%err, "error parsing SQL during translation");
            return TranslationResult::failure(sql, err);
        }
    };

    let extraction = Extraction::from_tokens(&tokens);
    if extraction.is_empty() {
        info!("no table references found in SQL to translate");
        return TranslationResult::success(sql);
    }
    debug!(tables = ?extraction.tables, "tables found for translation attempt");

    match substitute(sql, &tokens, &extraction, catalog) {
        Ok(translated) => {
            info!(tables = extraction.tables.len(), "translation complete");
            TranslationResult::success(translated)
        }
        Err(err) => {
            warn!(%err, "translation failed");
            TranslationResult::failure(sql, err)
        }
    }
}
