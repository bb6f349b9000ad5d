//! Order creation workflow.
//!
//! The one mutation with real partial-failure semantics: references are
//! resolved up front so the error can report the complete set of bad ids,
//! then the order row, product links, and derived total are written inside
//! a single transaction.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crm_core::{CustomerId, ProductId};

use crate::db::{CustomerRepository, OrderRepository, ProductRepository};
use crate::error::MutationError;
use crate::models::{NewOrder, OrderWithDetails};

/// Raw order input as received from the client, pre-validation.
///
/// Ids arrive as the opaque strings of the GraphQL `ID` scalar; a
/// non-numeric value is an unresolvable reference, not a type error.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    /// Owning customer reference.
    pub customer_id: String,
    /// Product references; must be non-empty.
    pub product_ids: Vec<String>,
    /// Explicit order timestamp; storage time when absent.
    pub order_date: Option<DateTime<Utc>>,
}

/// Create an order.
///
/// Steps, in order:
///
/// 1. Resolve the customer, failing with the offending id.
/// 2. Reject an empty product list.
/// 3. Resolve every product reference, collecting ALL unresolvable ids
///    before failing (the error lists the complete set).
/// 4. Atomically insert the order, link the distinct products, and persist
///    the total as the exact sum of their prices (re-read inside the
///    transaction).
///
/// # Errors
///
/// `NotFound` for an unknown customer or product id(s), `EmptySelection`
/// for an empty product list, `TransactionFailure` when the atomic creation
/// fails (nothing is persisted in that case).
pub async fn create_order(
    pool: &SqlitePool,
    draft: OrderDraft,
) -> Result<OrderWithDetails, MutationError> {
    let customer_id = draft.customer_id.parse::<i64>().ok().map(CustomerId::new);
    let customer = match customer_id {
        Some(id) => CustomerRepository::new(pool).get(id).await?,
        None => None,
    };
    let Some(customer) = customer else {
        return Err(MutationError::NotFound(format!(
            "Invalid customer ID: {}",
            draft.customer_id
        )));
    };

    if draft.product_ids.is_empty() {
        return Err(MutationError::EmptySelection(
            "At least one product must be selected".to_owned(),
        ));
    }

    // Parse and dedupe while preserving first-occurrence order; product
    // attachment is set-like.
    let mut unique_ids: Vec<ProductId> = Vec::new();
    let mut seen: HashSet<i64> = HashSet::new();
    for raw in &draft.product_ids {
        if let Ok(id) = raw.parse::<i64>()
            && seen.insert(id)
        {
            unique_ids.push(ProductId::new(id));
        }
    }

    let found = ProductRepository::new(pool).get_many(&unique_ids).await?;
    let found_ids: HashSet<i64> = found.iter().map(|p| p.id.as_i64()).collect();

    // Report every unresolvable reference, in input order.
    let invalid_ids: Vec<&str> = draft
        .product_ids
        .iter()
        .filter(|raw| {
            raw.parse::<i64>()
                .map_or(true, |id| !found_ids.contains(&id))
        })
        .map(String::as_str)
        .collect();
    if !invalid_ids.is_empty() {
        return Err(MutationError::NotFound(format!(
            "Invalid product ID(s): {}",
            invalid_ids.join(", ")
        )));
    }

    let created = OrderRepository::new(pool)
        .create_with_products(&NewOrder {
            customer_id: customer.id,
            product_ids: unique_ids,
            order_date: draft.order_date,
        })
        .await
        .map_err(|e| MutationError::TransactionFailure(format!("Failed to create order: {e}")))?;

    tracing::info!(
        order_id = %created.order.id,
        total = %created.order.total_amount,
        "order created"
    );

    Ok(created)
}
