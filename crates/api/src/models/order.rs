//! Order domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crm_core::{CustomerId, OrderId, ProductId};

use super::{Customer, Product};

/// An order record.
///
/// `total_amount` is derived at creation time from the linked products'
/// prices and is never recomputed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Sum of the linked products' prices at creation time.
    pub total_amount: Decimal,
    /// When the order was placed (explicit input or insert time).
    pub order_date: DateTime<Utc>,
}

/// An order with its customer and product set eagerly loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithDetails {
    /// The order itself.
    pub order: Order,
    /// The owning customer.
    pub customer: Customer,
    /// The linked products, in id order.
    pub products: Vec<Product>,
}

/// Validated input for creating an order.
///
/// `product_ids` must be non-empty, deduplicated, and pre-resolved by the
/// caller; the repository re-reads the prices inside the creation
/// transaction.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Distinct products to link.
    pub product_ids: Vec<ProductId>,
    /// Explicit order timestamp; insert time when absent.
    pub order_date: Option<DateTime<Utc>>,
}

/// Filter criteria for listing orders.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Total at or above this value.
    pub total_amount_gte: Option<Decimal>,
    /// Total at or below this value.
    pub total_amount_lte: Option<Decimal>,
    /// Placed at or after this instant.
    pub order_date_gte: Option<DateTime<Utc>>,
    /// Placed at or before this instant.
    pub order_date_lte: Option<DateTime<Utc>>,
    /// Case-insensitive substring match on the owning customer's name.
    pub customer_name: Option<String>,
    /// Case-insensitive substring match on any linked product's name.
    pub product_name: Option<String>,
    /// Orders containing this product.
    pub product_id: Option<ProductId>,
}
