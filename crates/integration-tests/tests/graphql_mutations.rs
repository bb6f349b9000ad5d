//! End-to-end mutation behavior through the GraphQL schema.

#![allow(clippy::unwrap_used)]

use crm_integration_tests::{execute, seed_customer, seed_product, test_schema};

#[tokio::test]
async fn create_customer_succeeds_and_is_retrievable_by_email() {
    let schema = test_schema().await;

    let data = execute(
        &schema,
        r#"mutation { createCustomer(name: "Alice", email: "alice@example.com", phone: "+1234567890") {
            success message errors customer { name email phone } } }"#,
    )
    .await;

    let payload = &data["createCustomer"];
    assert_eq!(payload["success"], true);
    assert_eq!(payload["message"], "Customer created successfully");
    assert_eq!(payload["errors"].as_array().unwrap().len(), 0);
    assert_eq!(payload["customer"]["email"], "alice@example.com");

    let data = execute(
        &schema,
        r#"{ allCustomers(filter: { emailContains: "alice@example.com" }) { name email } }"#,
    )
    .await;
    let found = data["allCustomers"].as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["name"], "Alice");
}

#[tokio::test]
async fn create_customer_rejects_duplicate_email_any_case() {
    let schema = test_schema().await;
    seed_customer(&schema, "Alice", "alice@example.com").await;

    let data = execute(
        &schema,
        r#"mutation { createCustomer(name: "Imposter", email: "ALICE@EXAMPLE.COM") {
            success message errors customer { id } } }"#,
    )
    .await;

    let payload = &data["createCustomer"];
    assert_eq!(payload["success"], false);
    assert_eq!(payload["message"], "Email already exists");
    assert_eq!(payload["errors"][0], "Email already exists");
    assert!(payload["customer"].is_null());

    // no second record was created
    let data = execute(&schema, "{ customers { id } }").await;
    assert_eq!(data["customers"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_customer_validates_phone_shapes() {
    let schema = test_schema().await;

    for (email, phone, expect_success) in [
        ("a@example.com", "+1234567890", true),
        ("b@example.com", "123-456-7890", true),
        ("c@example.com", "abc", false),
        ("d@example.com", "12345", false),
    ] {
        let query = format!(
            r#"mutation {{ createCustomer(name: "X", email: "{email}", phone: "{phone}") {{
                success errors }} }}"#
        );
        let data = execute(&schema, &query).await;
        assert_eq!(
            data["createCustomer"]["success"],
            expect_success,
            "phone {phone}"
        );
        if !expect_success {
            assert_eq!(
                data["createCustomer"]["errors"][0],
                "Phone number must be like +1234567890 or 123-456-7890"
            );
        }
    }
}

#[tokio::test]
async fn bulk_create_customers_mixes_successes_and_row_errors() {
    let schema = test_schema().await;

    let data = execute(
        &schema,
        r#"mutation { bulkCreateCustomers(input: [
            { name: "Alice", email: "alice@example.com" },
            { name: "Broken", email: "not-an-email" },
            { name: "Bob", email: "bob@example.com", phone: "123-456-7890" },
            { name: "BadPhone", email: "carol@example.com", phone: "12345" }
        ]) { customers { email } errors } }"#,
    )
    .await;

    let payload = &data["bulkCreateCustomers"];
    let created = payload["customers"].as_array().unwrap();
    let errors = payload["errors"].as_array().unwrap();

    assert_eq!(created.len(), 2);
    assert_eq!(created[0]["email"], "alice@example.com");
    assert_eq!(created[1]["email"], "bob@example.com");

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0], "Row 2: Invalid email 'not-an-email'");
    assert_eq!(
        errors[1],
        "Row 4: Phone number must be like +1234567890 or 123-456-7890"
    );
}

#[tokio::test]
async fn bulk_create_customers_same_email_twice_in_one_batch() {
    let schema = test_schema().await;

    let data = execute(
        &schema,
        r#"mutation { bulkCreateCustomers(input: [
            { name: "First", email: "dup@example.com" },
            { name: "Second", email: "dup@example.com" }
        ]) { customers { name } errors } }"#,
    )
    .await;

    let payload = &data["bulkCreateCustomers"];
    assert_eq!(payload["customers"].as_array().unwrap().len(), 1);
    assert_eq!(payload["customers"][0]["name"], "First");

    let errors = payload["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0], "Row 2: Email 'dup@example.com' already exists");
}

#[tokio::test]
async fn create_product_defaults_stock_and_validates_inputs() {
    let schema = test_schema().await;

    let data = execute(
        &schema,
        r#"mutation { createProduct(name: "Mouse", price: "19.99") {
            success errors product { name price stock } } }"#,
    )
    .await;
    let payload = &data["createProduct"];
    assert_eq!(payload["success"], true);
    assert_eq!(payload["product"]["price"], "19.99");
    assert_eq!(payload["product"]["stock"], 0);

    for (price, stock, expected) in [
        ("abc", None, "Price must be a valid decimal"),
        ("0", None, "Price must be positive"),
        ("-5", None, "Price must be positive"),
        ("5.00", Some(-1), "Stock cannot be negative"),
    ] {
        let stock_arg = stock.map_or(String::new(), |s: i64| format!(", stock: {s}"));
        let query = format!(
            r#"mutation {{ createProduct(name: "Bad", price: "{price}"{stock_arg}) {{
                success errors product {{ id }} }} }}"#
        );
        let data = execute(&schema, &query).await;
        let payload = &data["createProduct"];
        assert_eq!(payload["success"], false, "price {price}");
        assert_eq!(payload["errors"][0], expected);
        assert!(payload["product"].is_null());
    }

    // failed creations persisted nothing
    let data = execute(&schema, "{ products { id } }").await;
    assert_eq!(data["products"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_order_computes_exact_total() {
    let schema = test_schema().await;
    let customer = seed_customer(&schema, "Alice", "alice@example.com").await;
    let p1 = seed_product(&schema, "Laptop", "10.00", 5).await;
    let p2 = seed_product(&schema, "Mouse", "5.50", 5).await;

    let query = format!(
        r#"mutation {{ createOrder(customerId: "{customer}", productIds: ["{p1}", "{p2}"]) {{
            success errors order {{ totalAmount customer {{ email }} products {{ name }} }} }} }}"#
    );
    let data = execute(&schema, &query).await;

    let payload = &data["createOrder"];
    assert_eq!(payload["success"], true, "{payload}");
    assert_eq!(payload["order"]["totalAmount"], "15.50");
    assert_eq!(payload["order"]["customer"]["email"], "alice@example.com");
    assert_eq!(payload["order"]["products"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn create_order_rejects_empty_product_list() {
    let schema = test_schema().await;
    let customer = seed_customer(&schema, "Alice", "alice@example.com").await;

    let query = format!(
        r#"mutation {{ createOrder(customerId: "{customer}", productIds: []) {{
            success errors order {{ id }} }} }}"#
    );
    let data = execute(&schema, &query).await;

    let payload = &data["createOrder"];
    assert_eq!(payload["success"], false);
    assert_eq!(payload["errors"][0], "At least one product must be selected");

    let data = execute(&schema, "{ orders { id } }").await;
    assert!(data["orders"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_order_lists_every_bad_product_id_and_persists_nothing() {
    let schema = test_schema().await;
    let customer = seed_customer(&schema, "Alice", "alice@example.com").await;
    let p1 = seed_product(&schema, "Laptop", "10.00", 5).await;

    let query = format!(
        r#"mutation {{ createOrder(customerId: "{customer}", productIds: ["{p1}", "999"]) {{
            success errors order {{ id }} }} }}"#
    );
    let data = execute(&schema, &query).await;

    let payload = &data["createOrder"];
    assert_eq!(payload["success"], false);
    assert_eq!(payload["errors"][0], "Invalid product ID(s): 999");
    assert!(payload["order"].is_null());

    // atomicity: the valid product did not produce a partial order
    let data = execute(&schema, "{ orders { id } }").await;
    assert!(data["orders"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_order_rejects_unknown_customer() {
    let schema = test_schema().await;
    seed_product(&schema, "Laptop", "10.00", 5).await;

    let data = execute(
        &schema,
        r#"mutation { createOrder(customerId: "42", productIds: ["1"]) {
            success errors order { id } } }"#,
    )
    .await;

    let payload = &data["createOrder"];
    assert_eq!(payload["success"], false);
    assert_eq!(payload["errors"][0], "Invalid customer ID: 42");
}

#[tokio::test]
async fn update_low_stock_products_restocks_only_qualifying_products() {
    let schema = test_schema().await;
    seed_product(&schema, "Cable", "5.00", 3).await;
    seed_product(&schema, "Hub", "25.00", 12).await;
    seed_product(&schema, "Stand", "15.00", 0).await;

    let data = execute(
        &schema,
        r"mutation { updateLowStockProducts {
            success message updatedProducts { name stock } } }",
    )
    .await;

    let payload = &data["updateLowStockProducts"];
    assert_eq!(payload["success"], true);
    assert_eq!(payload["message"], "Updated 2 products");

    let updated = payload["updatedProducts"].as_array().unwrap();
    assert_eq!(updated.len(), 2);
    assert_eq!(updated[0]["name"], "Cable");
    assert_eq!(updated[0]["stock"], 13);
    assert_eq!(updated[1]["name"], "Stand");
    assert_eq!(updated[1]["stock"], 10);

    // the well-stocked product is untouched
    let data = execute(
        &schema,
        r#"{ allProducts(filter: { nameContains: "Hub" }) { stock } }"#,
    )
    .await;
    assert_eq!(data["allProducts"][0]["stock"], 12);
}

#[tokio::test]
async fn update_low_stock_products_reports_empty_store() {
    let schema = test_schema().await;

    let data = execute(
        &schema,
        r"mutation { updateLowStockProducts { success message updatedProducts { id } } }",
    )
    .await;

    let payload = &data["updateLowStockProducts"];
    assert_eq!(payload["success"], true);
    assert_eq!(payload["message"], "No low-stock products found");
    assert!(payload["updatedProducts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn repeated_restock_keeps_incrementing() {
    let schema = test_schema().await;
    seed_product(&schema, "Cable", "5.00", 0).await;

    execute(
        &schema,
        r"mutation { updateLowStockProducts { message updatedProducts { id } } }",
    )
    .await;
    // stock is now 10, no longer below the threshold
    let data = execute(
        &schema,
        r"mutation { updateLowStockProducts { message updatedProducts { id } } }",
    )
    .await;
    assert_eq!(
        data["updateLowStockProducts"]["message"],
        "No low-stock products found"
    );
}
