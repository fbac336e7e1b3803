#![allow(dead_code)]

use connectors::sql::postgres::PgExecutor;
use model::{core::value::Value, record, records::record::Record};
use planner::{
    Expr, ObjectQueryable, Queryable, RecordExpr, SqlQueryable, TableMapping,
};
use std::env;

pub mod parity;

/// Environment variable holding the connection string of the live test database.
pub const PG_CONNECTION_STRING: &str = "PG_CONNECTION_STRING";

/// Session-local `customer` table, shaped like the production one after all
/// migrations. Being temporary, it shadows any real table for the duration of
/// the connection and lets suites run in parallel.
pub const CUSTOMER_TABLE_DDL: &str = r#"CREATE TEMP TABLE customer (
  customer_id INTEGER PRIMARY KEY,
  name TEXT NOT NULL,
  address TEXT
);"#;

pub const CUSTOMER_SEED: &str = r#"
    INSERT INTO customer VALUES (1, 'customer 1', NULL);
    INSERT INTO customer VALUES (2, 'customer 2', NULL);
    INSERT INTO customer VALUES (3, 'customer 3', 'customer 3 address');
    INSERT INTO customer VALUES (4, 'customer 4', 'customer 4 address');
"#;

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub customer_id: i64,
    pub name: String,
    pub address: Option<String>,
}

record!(Customer {
    "customerID" => customer_id,
    "name" => name,
    "address" => address,
});

impl Customer {
    fn new(customer_id: i64, address: Option<&str>) -> Self {
        Customer {
            customer_id,
            name: format!("customer {customer_id}"),
            address: address.map(str::to_string),
        }
    }
}

/// The in-memory mirror of the seeded `customer` table.
pub fn customer_list() -> Vec<Customer> {
    vec![
        Customer::new(1, None),
        Customer::new(2, None),
        Customer::new(3, Some("customer 3 address")),
        Customer::new(4, Some("customer 4 address")),
    ]
}

pub fn customer_mapping() -> TableMapping {
    TableMapping::new()
        .mapped("customerID", "customer_id")
        .field("name")
        .field("address")
}

pub fn sql_schema() -> SqlQueryable<Customer> {
    SqlQueryable::table("customer", customer_mapping())
}

pub fn object_schema() -> ObjectQueryable<Customer> {
    ObjectQueryable::new(customer_list())
}

/// Ids of the records held by an in-memory queryable, in order.
pub fn ids<T: Record>(query: &ObjectQueryable<T>) -> Vec<i64> {
    query
        .values()
        .filter_map(|record| record.get_value("customerID").as_i64())
        .collect()
}

/// Applies `predicate` to both schemas and checks the rendered SQL, its
/// bindings and the records the in-memory backend keeps.
pub fn check_query<F>(predicate: F, expected_sql: &str, expected_bindings: &[Value], expected_ids: &[i64])
where
    F: Fn(&RecordExpr<Customer>) -> Expr<bool>,
{
    let sql = sql_schema().filter(&predicate).expect("filter SQL schema");
    let (text, bindings) = sql.to_sql().expect("render SQL");
    assert_eq!(text, expected_sql);
    assert_eq!(bindings, expected_bindings);

    let objects = object_schema()
        .filter(&predicate)
        .expect("filter object schema");
    assert_eq!(ids(&objects), expected_ids);
}

/// Connects to the live test database, or `None` when it is not configured.
pub async fn pg_executor() -> Option<PgExecutor> {
    let url = env::var(PG_CONNECTION_STRING).ok()?;
    Some(PgExecutor::connect(&url).await.expect("connect postgres"))
}

/// Creates the session-local `customer` table, optionally seeded.
pub async fn provision_customers(executor: &PgExecutor, seed: bool) {
    executor
        .client()
        .batch_execute(CUSTOMER_TABLE_DDL)
        .await
        .expect("create customer table");

    if seed {
        executor
            .client()
            .batch_execute(CUSTOMER_SEED)
            .await
            .expect("seed customer table");
    }
}
