use crate::*;
use std::{collections::HashMap, sync::Arc};

/// Exact-match name lookup the translator runs against.
///
/// Matching is plain string equality: no case folding, no alternate
/// spellings. A `None` means the name is unmatched.
pub trait Resolver {
    fn lookup(&self, name: &str) -> Option<&ReferenceEntry>;

    /// An empty resolver is treated the same as no catalog at all.
    fn is_empty(&self) -> bool;
}

impl Resolver for HashMap<String, ReferenceEntry> {
    fn lookup(&self, name: &str) -> Option<&ReferenceEntry> {
        self.get(name)
    }

    fn is_empty(&self) -> bool {
        HashMap::is_empty(self)
    }
}

impl<R: Resolver + ?Sized> Resolver for &R {
    fn lookup(&self, name: &str) -> Option<&ReferenceEntry> {
        (**self).lookup(name)
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

impl<R: Resolver + ?Sized> Resolver for Arc<R> {
    fn lookup(&self, name: &str) -> Option<&ReferenceEntry> {
        (**self).lookup(name)
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_sensitive() {
        let mut map = HashMap::new();
        map.insert("orders".to_string(), ReferenceEntry::model("orders", "models/orders.sql"));
        assert!(map.lookup("orders").is_some());
        assert!(map.lookup("Orders").is_none());
        assert!(map.lookup("\"orders\"").is_none());
    }

    #[test]
    fn shared_handles_delegate() {
        let mut map = HashMap::new();
        map.insert("a".to_string(), ReferenceEntry::model("a", "models/a.sql"));
        let shared = Arc::new(map);
        assert!(!Resolver::is_empty(&shared));
        assert_eq!(
            (&shared).lookup("a").map(ReferenceEntry::primary_arg),
            Some("a")
        );
    }
}
