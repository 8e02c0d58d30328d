use crate::*;
pub use test_context::test_context;
use test_context::TestContext;

const SOURCES_YML: &str = r#"
version: 2

sources:
  - name: jaffle_shop
    schema: raw
    tables:
      - name: raw_customers
      - name: raw_orders
        loaded_at_field: _etl_loaded_at
      - name: raw_payments
"#;

const SCHEMA_YML: &str = r#"
version: 2

models:
  - name: customers
    columns:
      - name: customer_id
        tests: [unique, not_null]
"#;

/// In-memory copy of the classic jaffle shop project: three staging models
/// over three raw sources plus two marts.
pub struct JaffleShop {
    pub catalog: ReferenceMap,
}

impl TestContext for JaffleShop {
    fn setup() -> Self {
        crate::testing::common_init();
        let catalog = CatalogBuilder::default()
            .files([
                ("dbt_project.yml", "name: jaffle_shop\nversion: '1.0'\n"),
                ("models/staging/sources.yml", SOURCES_YML),
                (
                    "models/staging/stg_customers.sql",
                    "select id as customer_id, first_name, last_name from raw_customers",
                ),
                (
                    "models/staging/stg_orders.sql",
                    "select id as order_id, user_id as customer_id, order_date, status from raw_orders",
                ),
                (
                    "models/staging/stg_payments.sql",
                    "select id as payment_id, order_id, amount / 100 as amount from raw_payments",
                ),
                ("models/marts/customers.sql", "select * from stg_customers"),
                ("models/marts/orders.sql", "select * from stg_orders"),
                ("models/marts/schema.yml", SCHEMA_YML),
            ])
            .build();
        Self { catalog }
    }
}
