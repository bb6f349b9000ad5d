//! GraphQL object, payload, and input types, plus conversions from the
//! domain models.

use async_graphql::{ID, InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crm_core::ProductId;

use crate::models;
use crate::services::CustomerDraft;

/// A customer record.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Customer")]
pub struct CustomerType {
    /// Unique customer id.
    pub id: ID,
    /// Display name.
    pub name: String,
    /// Email address (unique, case-insensitively).
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<models::Customer> for CustomerType {
    fn from(customer: models::Customer) -> Self {
        Self {
            id: ID::from(customer.id.to_string()),
            name: customer.name,
            email: customer.email.into_inner(),
            phone: customer.phone,
            created_at: customer.created_at,
        }
    }
}

/// A product record.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Product")]
pub struct ProductType {
    /// Unique product id.
    pub id: ID,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Units in stock.
    pub stock: i64,
}

impl From<models::Product> for ProductType {
    fn from(product: models::Product) -> Self {
        Self {
            id: ID::from(product.id.to_string()),
            name: product.name,
            price: product.price,
            stock: product.stock,
        }
    }
}

/// An order with its customer and product set.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Order")]
pub struct OrderType {
    /// Unique order id.
    pub id: ID,
    /// Owning customer.
    pub customer: CustomerType,
    /// Linked products.
    pub products: Vec<ProductType>,
    /// Sum of the linked products' prices at creation time.
    pub total_amount: Decimal,
    /// When the order was placed.
    pub order_date: DateTime<Utc>,
}

impl From<models::OrderWithDetails> for OrderType {
    fn from(details: models::OrderWithDetails) -> Self {
        Self {
            id: ID::from(details.order.id.to_string()),
            customer: details.customer.into(),
            products: details.products.into_iter().map(Into::into).collect(),
            total_amount: details.order.total_amount,
            order_date: details.order.order_date,
        }
    }
}

/// Payload of `createCustomer`.
#[derive(Debug, SimpleObject)]
pub struct CreateCustomerPayload {
    /// The created customer, absent on failure.
    pub customer: Option<CustomerType>,
    /// Whether the customer was created.
    pub success: bool,
    /// Human-readable outcome summary.
    pub message: String,
    /// Error strings; empty on success.
    pub errors: Vec<String>,
}

/// Payload of `bulkCreateCustomers`.
#[derive(Debug, SimpleObject)]
pub struct BulkCreateCustomersPayload {
    /// Customers created, in input order.
    pub customers: Vec<CustomerType>,
    /// Per-row error strings, tagged with 1-based positions.
    pub errors: Vec<String>,
}

/// Payload of `createProduct`.
#[derive(Debug, SimpleObject)]
pub struct CreateProductPayload {
    /// The created product, absent on failure.
    pub product: Option<ProductType>,
    /// Whether the product was created.
    pub success: bool,
    /// Error strings; empty on success.
    pub errors: Vec<String>,
}

/// Payload of `createOrder`.
#[derive(Debug, SimpleObject)]
pub struct CreateOrderPayload {
    /// The created order, absent on failure.
    pub order: Option<OrderType>,
    /// Whether the order was created.
    pub success: bool,
    /// Error strings; empty on success.
    pub errors: Vec<String>,
}

/// Payload of `updateLowStockProducts`.
#[derive(Debug, SimpleObject)]
pub struct UpdateLowStockProductsPayload {
    /// Products whose stock was incremented.
    pub updated_products: Vec<ProductType>,
    /// Always true; the pass itself cannot partially fail.
    pub success: bool,
    /// "No low-stock products found" or "Updated {n} products".
    pub message: String,
}

/// One customer row for `bulkCreateCustomers`.
#[derive(Debug, Clone, InputObject)]
#[graphql(name = "CustomerInput")]
pub struct CustomerInputType {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
}

impl From<CustomerInputType> for CustomerDraft {
    fn from(input: CustomerInputType) -> Self {
        Self {
            name: input.name,
            email: input.email,
            phone: input.phone,
        }
    }
}

/// Filter options for `allCustomers`.
#[derive(Debug, Clone, Default, InputObject)]
pub struct CustomerFilterInput {
    /// Case-insensitive substring match on the name.
    pub name_contains: Option<String>,
    /// Case-insensitive substring match on the email.
    pub email_contains: Option<String>,
    /// Created at or after this instant.
    pub created_at_gte: Option<DateTime<Utc>>,
    /// Created at or before this instant.
    pub created_at_lte: Option<DateTime<Utc>>,
    /// Phone number starts with this prefix (e.g. "+1").
    pub phone_prefix: Option<String>,
}

impl From<CustomerFilterInput> for models::CustomerFilter {
    fn from(input: CustomerFilterInput) -> Self {
        Self {
            name_contains: input.name_contains,
            email_contains: input.email_contains,
            created_at_gte: input.created_at_gte,
            created_at_lte: input.created_at_lte,
            phone_prefix: input.phone_prefix,
        }
    }
}

/// Filter options for `allProducts`.
#[derive(Debug, Clone, Default, InputObject)]
pub struct ProductFilterInput {
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
    /// Stock strictly below this count.
    pub stock_lt: Option<i64>,
}

impl From<ProductFilterInput> for models::ProductFilter {
    fn from(input: ProductFilterInput) -> Self {
        Self {
            name_contains: input.name_contains,
            price_gte: input.price_gte,
            price_lte: input.price_lte,
            stock_gte: input.stock_gte,
            stock_lte: input.stock_lte,
            stock_lt: input.stock_lt,
        }
    }
}

/// Filter options for `allOrders`.
#[derive(Debug, Clone, Default, InputObject)]
pub struct OrderFilterInput {
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
    pub product_id: Option<ID>,
}

impl OrderFilterInput {
    /// Convert into the model filter, resolving the product id.
    ///
    /// # Errors
    ///
    /// Returns a GraphQL error when `productId` is not a numeric id.
    pub fn into_filter(self) -> async_graphql::Result<models::OrderFilter> {
        let product_id = self
            .product_id
            .map(|id| {
                id.parse::<i64>()
                    .map(ProductId::new)
                    .map_err(|_| async_graphql::Error::new(format!("invalid product id: {}", &*id)))
            })
            .transpose()?;

        Ok(models::OrderFilter {
            total_amount_gte: self.total_amount_gte,
            total_amount_lte: self.total_amount_lte,
            order_date_gte: self.order_date_gte,
            order_date_lte: self.order_date_lte,
            customer_name: self.customer_name,
            product_name: self.product_name,
            product_id,
        })
    }
}
