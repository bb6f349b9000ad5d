//! Product domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crm_core::ProductId;

/// A product record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price; always positive.
    pub price: Decimal,
    /// Units in stock; never negative.
    pub stock: i64,
}

/// Validated input for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Unit price; already validated positive.
    pub price: Decimal,
    /// Initial stock; already validated non-negative.
    pub stock: i64,
}

/// Filter criteria for listing products.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring match on the name.
    pub name_contains: Option<String>,
    /// Price at or above this value.
    pub price_gte: Option<Decimal>,
    /// Price at or below this value.
    pub price_lte: Option<Decimal>,
    /// Stock at or above this count.
    pub stock_gte: Option<i64>,
    /// Stock at or below this count.
    pub stock_lte: Option<i64>,
    /// Stock strictly below this count (low-stock helper).
    pub stock_lt: Option<i64>,
}
