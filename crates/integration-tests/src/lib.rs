//! Shared helpers for the CRM integration tests.
//!
//! Tests execute GraphQL operations directly through the schema against a
//! fresh in-memory database: no network, no external services.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::Value;

use crm_api::db;
use crm_api::graphql::{CrmSchema, build_schema};

/// Build a schema over a fresh, migrated in-memory database.
///
/// # Panics
///
/// Panics when the in-memory database cannot be set up; tests cannot run
/// without it.
pub async fn test_schema() -> CrmSchema {
    let pool = db::create_memory_pool().await.expect("in-memory database");
    db::run_migrations(&pool).await.expect("migrations");
    build_schema(pool)
}

/// Execute an operation expected to succeed at the GraphQL level and return
/// its data as JSON.
///
/// Business-rule failures still succeed here; they live inside the payload.
///
/// # Panics
///
/// Panics when the response carries GraphQL-level errors.
pub async fn execute(schema: &CrmSchema, query: &str) -> Value {
    let response = schema.execute(query).await;
    assert!(
        response.errors.is_empty(),
        "unexpected GraphQL errors for {query}: {:?}",
        response.errors
    );
    serde_json::to_value(response.data).expect("serialize response data")
}

/// Execute an operation and return the raw response, errors included.
pub async fn execute_raw(schema: &CrmSchema, query: &str) -> async_graphql::Response {
    schema.execute(query).await
}

/// Seed one customer through the API, returning its id string.
///
/// # Panics
///
/// Panics when the mutation reports failure.
pub async fn seed_customer(schema: &CrmSchema, name: &str, email: &str) -> String {
    let query = format!(
        r#"mutation {{ createCustomer(name: "{name}", email: "{email}") {{
            success errors customer {{ id }} }} }}"#
    );
    let data = execute(schema, &query).await;
    assert_eq!(
        data["createCustomer"]["success"], true,
        "seed customer failed: {data}"
    );
    data["createCustomer"]["customer"]["id"]
        .as_str()
        .expect("customer id")
        .to_owned()
}

/// Seed one product through the API, returning its id string.
///
/// # Panics
///
/// Panics when the mutation reports failure.
pub async fn seed_product(schema: &CrmSchema, name: &str, price: &str, stock: i64) -> String {
    let query = format!(
        r#"mutation {{ createProduct(name: "{name}", price: "{price}", stock: {stock}) {{
            success errors product {{ id }} }} }}"#
    );
    let data = execute(schema, &query).await;
    assert_eq!(
        data["createProduct"]["success"], true,
        "seed product failed: {data}"
    );
    data["createProduct"]["product"]["id"]
        .as_str()
        .expect("product id")
        .to_owned()
}
