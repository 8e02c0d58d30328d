//! Rewrite raw table references in SQL into dbt `{{ ref() }}` and
//! `{{ source() }}` calls, resolved against a project's models and sources.
reexport!(testing, test);
reexport!(sql);
reexport!(extract);
reexport!(catalog);
reexport!(translate);
reexport!(error);
reexport!(config);
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn};

#[macro_export]
macro_rules! reexport {
    ($module:ident) => {
        $crate::reexport!($module, false);
    };
    ($module:ident, test) => {
        $crate::reexport!($module, true);
    };
    ($module:ident, $is_test:literal) => {
        #[cfg_attr($is_test, cfg(test))]
        mod $module;
        #[cfg_attr($is_test, cfg(test))]
        #[allow(unused_imports)]
        #[allow(ambiguous_glob_reexports)]
        pub use $module::*;
    };
}
