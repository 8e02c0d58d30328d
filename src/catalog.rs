//! Project catalog: which raw table names map to which dbt model or source.
crate::reexport!(entry);
crate::reexport!(resolver);
crate::reexport!(reference_map);
crate::reexport!(builder);
