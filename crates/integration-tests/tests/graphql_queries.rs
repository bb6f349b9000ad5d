//! End-to-end query, filter, and ordering behavior.

#![allow(clippy::unwrap_used)]

use crm_integration_tests::{execute, execute_raw, seed_customer, seed_product, test_schema};

#[tokio::test]
async fn hello_liveness_field() {
    let schema = test_schema().await;
    let data = execute(&schema, "{ hello }").await;
    assert_eq!(data["hello"], "Hello, GraphQL!");
}

#[tokio::test]
async fn customer_filters_match_substrings_case_insensitively() {
    let schema = test_schema().await;
    seed_customer(&schema, "Alice Smith", "alice@example.com").await;
    seed_customer(&schema, "Bob Jones", "bob@other.org").await;

    let data = execute(
        &schema,
        r#"{ allCustomers(filter: { nameContains: "SMITH" }) { name } }"#,
    )
    .await;
    let found = data["allCustomers"].as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["name"], "Alice Smith");

    let data = execute(
        &schema,
        r#"{ allCustomers(filter: { emailContains: "other" }) { name } }"#,
    )
    .await;
    assert_eq!(data["allCustomers"][0]["name"], "Bob Jones");
}

#[tokio::test]
async fn customer_phone_prefix_filter_is_starts_with() {
    let schema = test_schema().await;

    execute(
        &schema,
        r#"mutation { createCustomer(name: "Alice", email: "alice@example.com", phone: "+1234567890") { success } }"#,
    )
    .await;
    execute(
        &schema,
        r#"mutation { createCustomer(name: "Bob", email: "bob@example.com", phone: "123-456-7890") { success } }"#,
    )
    .await;

    let data = execute(
        &schema,
        r#"{ allCustomers(filter: { phonePrefix: "+1" }) { name } }"#,
    )
    .await;
    let found = data["allCustomers"].as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["name"], "Alice");
}

#[tokio::test]
async fn product_filters_cover_price_range_and_stock_threshold() {
    let schema = test_schema().await;
    seed_product(&schema, "Laptop", "999.99", 10).await;
    seed_product(&schema, "Mouse", "19.99", 100).await;
    seed_product(&schema, "Keyboard", "49.99", 3).await;

    let data = execute(
        &schema,
        r#"{ allProducts(filter: { priceGte: "20", priceLte: "1000" }) { name } }"#,
    )
    .await;
    let names: Vec<&str> = data["allProducts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Laptop", "Keyboard"]);

    // strictly-below filter excludes the boundary value
    let data = execute(&schema, r"{ allProducts(filter: { stockLt: 10 }) { name } }").await;
    let found = data["allProducts"].as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["name"], "Keyboard");
}

#[tokio::test]
async fn ordering_applies_fields_in_sequence() {
    let schema = test_schema().await;
    seed_product(&schema, "Alpha", "10.00", 5).await;
    seed_product(&schema, "Beta", "20.00", 5).await;
    seed_product(&schema, "Gamma", "15.00", 2).await;

    let data = execute(&schema, r#"{ allProducts(orderBy: "-price") { name } }"#).await;
    let names: Vec<&str> = data["allProducts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Beta", "Gamma", "Alpha"]);

    // primary key first, then secondary within equal groups
    let data = execute(
        &schema,
        r#"{ allProducts(orderBy: "stock,-price") { name } }"#,
    )
    .await;
    let names: Vec<&str> = data["allProducts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Gamma", "Beta", "Alpha"]);
}

#[tokio::test]
async fn ordering_rejects_unknown_fields() {
    let schema = test_schema().await;

    let response = execute_raw(&schema, r#"{ allProducts(orderBy: "evil") { id } }"#).await;
    assert!(!response.errors.is_empty());
    assert!(
        response.errors[0].message.contains("unknown sort field"),
        "{}",
        response.errors[0].message
    );
}

#[tokio::test]
async fn order_filters_cover_relations_and_ranges() {
    let schema = test_schema().await;
    let alice = seed_customer(&schema, "Alice", "alice@example.com").await;
    let bob = seed_customer(&schema, "Bob", "bob@example.com").await;
    let laptop = seed_product(&schema, "Laptop", "999.99", 10).await;
    let mouse = seed_product(&schema, "Mouse", "19.99", 100).await;

    let query = format!(
        r#"mutation {{ createOrder(customerId: "{alice}", productIds: ["{laptop}"]) {{ success }} }}"#
    );
    execute(&schema, &query).await;
    let query = format!(
        r#"mutation {{ createOrder(customerId: "{bob}", productIds: ["{mouse}"]) {{ success }} }}"#
    );
    execute(&schema, &query).await;

    // by owning customer's name
    let data = execute(
        &schema,
        r#"{ allOrders(filter: { customerName: "ali" }) { customer { name } } }"#,
    )
    .await;
    let found = data["allOrders"].as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["customer"]["name"], "Alice");

    // by linked product's name
    let data = execute(
        &schema,
        r#"{ allOrders(filter: { productName: "mouse" }) { customer { name } } }"#,
    )
    .await;
    assert_eq!(data["allOrders"][0]["customer"]["name"], "Bob");

    // by a specific linked product id
    let query = format!(
        r#"{{ allOrders(filter: {{ productId: "{laptop}" }}) {{ customer {{ name }} }} }}"#
    );
    let data = execute(&schema, &query).await;
    assert_eq!(data["allOrders"][0]["customer"]["name"], "Alice");

    // by total range: only the laptop order clears 100
    let data = execute(
        &schema,
        r#"{ allOrders(filter: { totalAmountGte: "100" }) { totalAmount } }"#,
    )
    .await;
    let found = data["allOrders"].as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["totalAmount"], "999.99");
}

#[tokio::test]
async fn order_date_range_filter_uses_explicit_dates() {
    let schema = test_schema().await;
    let alice = seed_customer(&schema, "Alice", "alice@example.com").await;
    let laptop = seed_product(&schema, "Laptop", "999.99", 10).await;

    for date in ["2024-01-01T00:00:00Z", "2024-06-01T00:00:00Z"] {
        let query = format!(
            r#"mutation {{ createOrder(customerId: "{alice}", productIds: ["{laptop}"],
                orderDate: "{date}") {{ success errors }} }}"#
        );
        let data = execute(&schema, &query).await;
        assert_eq!(data["createOrder"]["success"], true, "{data}");
    }

    let data = execute(
        &schema,
        r#"{ allOrders(filter: { orderDateGte: "2024-03-01T00:00:00Z" }) { orderDate } }"#,
    )
    .await;
    let found = data["allOrders"].as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert!(
        found[0]["orderDate"]
            .as_str()
            .unwrap()
            .starts_with("2024-06-01"),
        "{found:?}"
    );
}

#[tokio::test]
async fn plain_lists_return_everything() {
    let schema = test_schema().await;
    seed_customer(&schema, "Alice", "alice@example.com").await;
    seed_product(&schema, "Laptop", "999.99", 10).await;

    let data = execute(&schema, "{ customers { id } products { id } orders { id } }").await;
    assert_eq!(data["customers"].as_array().unwrap().len(), 1);
    assert_eq!(data["products"].as_array().unwrap().len(), 1);
    assert!(data["orders"].as_array().unwrap().is_empty());
}
