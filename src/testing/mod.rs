#![cfg(test)]
crate::reexport!(context);
pub use rstest::*;

pub(crate) fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // RUST_LOG controls verbosity; output goes through the test harness
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

mod jaffle_shop_fixture {
    use super::{super::*, *};

    #[test_context(JaffleShop)]
    #[test]
    fn registers_every_model_and_source(ctx: &mut JaffleShop) {
        assert_eq!(ctx.catalog.len(), 8);
        assert_eq!(
            ctx.catalog.get("stg_orders").map(ReferenceEntry::kind),
            Some(ReferenceKind::Model)
        );
        assert_eq!(
            ctx.catalog.get("raw_orders").map(ReferenceEntry::primary_arg),
            Some("jaffle_shop")
        );
    }

    #[test_context(JaffleShop)]
    #[rstest]
    #[case("customers", "models/marts/customers.sql")]
    #[case("stg_payments", "models/staging/stg_payments.sql")]
    #[case("raw_payments", "models/staging/sources.yml")]
    fn records_origin(ctx: &mut JaffleShop, #[case] name: &str, #[case] origin: &str) {
        assert_eq!(ctx.catalog.get(name).map(ReferenceEntry::origin), Some(origin));
    }
}
