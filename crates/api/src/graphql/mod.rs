//! GraphQL API for the CRM service.
//!
//! # Example operations
//!
//! ```graphql
//! # Liveness
//! { hello }
//!
//! # Filterable listing with ordering
//! query {
//!   allProducts(filter: { stockLt: 10 }, orderBy: "name,-price") {
//!     id
//!     name
//!     price
//!     stock
//!   }
//! }
//!
//! # Create an order; the total is derived server-side
//! mutation {
//!   createOrder(customerId: "1", productIds: ["1", "2"]) {
//!     success
//!     errors
//!     order {
//!       id
//!       totalAmount
//!       products { name price }
//!     }
//!   }
//! }
//!
//! # Restock low-stock products
//! mutation {
//!   updateLowStockProducts {
//!     success
//!     message
//!     updatedProducts { name stock }
//!   }
//! }
//! ```

pub mod mutation;
pub mod query;
pub mod types;

use async_graphql::{EmptySubscription, Schema};
use sqlx::SqlitePool;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

/// The full GraphQL schema type for the CRM service.
pub type CrmSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema with the database pool as context data.
pub fn build_schema(pool: SqlitePool) -> CrmSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(pool)
        .finish()
}
