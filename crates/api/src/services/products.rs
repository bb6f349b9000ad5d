//! Product mutation workflows.

use sqlx::SqlitePool;

use crate::db::ProductRepository;
use crate::error::MutationError;
use crate::models::{NewProduct, Product};
use crate::validation::{validate_price, validate_stock};

/// Products with stock strictly below this count qualify for restocking.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// How many units a restock adds to a qualifying product.
pub const RESTOCK_INCREMENT: i64 = 10;

/// Raw product input as received from the client, pre-validation.
///
/// The price arrives as a string so an unparseable value surfaces as an
/// in-payload validation failure rather than a scalar coercion error.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    /// Display name.
    pub name: String,
    /// Unit price, unvalidated.
    pub price: String,
    /// Initial stock; defaults to zero when absent.
    pub stock: Option<i64>,
}

/// Outcome of a low-stock restock pass.
#[derive(Debug)]
pub struct RestockOutcome {
    /// Products whose stock was incremented, in id order.
    pub updated: Vec<Product>,
    /// Human-readable summary for the payload and job logs.
    pub message: String,
}

/// Create a single product.
///
/// # Errors
///
/// `InvalidFormat` for an unparseable price, `OutOfRange` for a
/// non-positive price or negative stock, `TransactionFailure` for storage
/// errors. Nothing is persisted on failure.
pub async fn create_product(
    pool: &SqlitePool,
    draft: ProductDraft,
) -> Result<Product, MutationError> {
    let price = validate_price(&draft.price)?;
    let stock = validate_stock(draft.stock)?;

    let product = ProductRepository::new(pool)
        .create(&NewProduct {
            name: draft.name,
            price,
            stock,
        })
        .await?;

    tracing::info!(product_id = %product.id, "product created");

    Ok(product)
}

/// Restock every product below the low-stock threshold.
///
/// Selects products with `stock < 10`, increments each by exactly 10 inside
/// one transaction, and reports either "No low-stock products found" or
/// "Updated {n} products". Repeated invocations keep restocking qualifying
/// products.
///
/// # Errors
///
/// `TransactionFailure` for storage errors; nothing is changed in that
/// case.
pub async fn update_low_stock_products(
    pool: &SqlitePool,
) -> Result<RestockOutcome, MutationError> {
    let updated = ProductRepository::new(pool)
        .restock_below(LOW_STOCK_THRESHOLD, RESTOCK_INCREMENT)
        .await?;

    let message = if updated.is_empty() {
        "No low-stock products found".to_owned()
    } else {
        format!("Updated {} products", updated.len())
    };

    tracing::info!(updated = updated.len(), "low-stock restock pass finished");

    Ok(RestockOutcome { updated, message })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::*;
    use crate::db;

    async fn test_pool() -> SqlitePool {
        let pool = db::create_memory_pool().await.unwrap();
        db::run_migrations(&pool).await.unwrap();
        pool
    }

    fn draft(name: &str, price: &str, stock: Option<i64>) -> ProductDraft {
        ProductDraft {
            name: name.to_owned(),
            price: price.to_owned(),
            stock,
        }
    }

    #[tokio::test]
    async fn creates_product_with_default_stock() {
        let pool = test_pool().await;

        let product = create_product(&pool, draft("Mouse", "19.99", None)).await.unwrap();
        assert_eq!(product.price, Decimal::from_str("19.99").unwrap());
        assert_eq!(product.stock, 0);
    }

    #[tokio::test]
    async fn rejects_unparseable_price() {
        let pool = test_pool().await;

        let err = create_product(&pool, draft("Mouse", "abc", None)).await.unwrap_err();
        assert!(matches!(err, MutationError::InvalidFormat(_)));
        assert_eq!(err.to_string(), "Price must be a valid decimal");
    }

    #[tokio::test]
    async fn rejects_non_positive_price_and_negative_stock() {
        let pool = test_pool().await;

        let err = create_product(&pool, draft("Mouse", "0", None)).await.unwrap_err();
        assert!(matches!(err, MutationError::OutOfRange(_)));

        let err = create_product(&pool, draft("Mouse", "5.00", Some(-1)))
            .await
            .unwrap_err();
        assert!(matches!(err, MutationError::OutOfRange(_)));
        assert_eq!(err.to_string(), "Stock cannot be negative");
    }

    #[tokio::test]
    async fn restock_reports_counts_and_leaves_stocked_products_alone() {
        let pool = test_pool().await;
        create_product(&pool, draft("Cable", "5.00", Some(3))).await.unwrap();
        create_product(&pool, draft("Hub", "25.00", Some(12))).await.unwrap();
        create_product(&pool, draft("Stand", "15.00", Some(0))).await.unwrap();

        let outcome = update_low_stock_products(&pool).await.unwrap();
        assert_eq!(outcome.message, "Updated 2 products");
        let stocks: Vec<(String, i64)> = outcome
            .updated
            .iter()
            .map(|p| (p.name.clone(), p.stock))
            .collect();
        assert_eq!(
            stocks,
            vec![("Cable".to_owned(), 13), ("Stand".to_owned(), 10)]
        );
    }

    #[tokio::test]
    async fn restock_with_no_qualifying_products() {
        let pool = test_pool().await;
        create_product(&pool, draft("Hub", "25.00", Some(12))).await.unwrap();

        let outcome = update_low_stock_products(&pool).await.unwrap();
        assert!(outcome.updated.is_empty());
        assert_eq!(outcome.message, "No low-stock products found");
    }
}
