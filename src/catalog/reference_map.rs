use crate::*;
use std::collections::{BTreeMap, HashMap};

/// Immutable snapshot of a project's models and sources keyed by the raw
/// table name a query would use.
///
/// Built once by [`CatalogBuilder`] and only read afterwards; share it behind
/// an `Arc` and swap the whole snapshot on reload instead of mutating it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceMap {
    entries: HashMap<String, ReferenceEntry>,
}

impl ReferenceMap {
    pub(crate) fn from_entries(entries: HashMap<String, ReferenceEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ReferenceEntry> {
        self.entries.get(name)
    }

    /// Entries ordered by name, for stable listings.
    pub fn sorted(&self) -> BTreeMap<&str, &ReferenceEntry> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v)).collect()
    }

    /// Translate `sql` against this snapshot.
    pub fn translate(&self, sql: &str) -> TranslationResult {
        translate(Some(self), sql)
    }
}

impl Resolver for ReferenceMap {
    fn lookup(&self, name: &str) -> Option<&ReferenceEntry> {
        self.get(name)
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ReferenceEntry)> for ReferenceMap {
    fn from_iter<T: IntoIterator<Item = (String, ReferenceEntry)>>(iter: T) -> Self {
        Self::from_entries(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> ReferenceMap {
        [
            ("raw_orders", ReferenceEntry::source("raw", "orders", "models/sources.yml")),
            ("stg_customers", ReferenceEntry::model("stg_customers", "models/stg_customers.sql")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    #[test]
    fn lookup_and_listing() {
        let map = map();
        assert_eq!(map.len(), 2);
        assert!(map.get("raw_orders").is_some());
        assert!(map.lookup("RAW_ORDERS").is_none());
        assert_eq!(
            map.sorted().keys().copied().collect::<Vec<_>>(),
            vec!["raw_orders", "stg_customers"]
        );
    }

    #[test]
    fn translate_through_snapshot() {
        let result = map().translate("SELECT * FROM raw_orders");
        assert!(result.is_success());
        assert_eq!(result.output, "SELECT * FROM {{ source('raw', 'orders') }}");
    }
}
