//! Mutation workflows.
//!
//! Each function is one unit of work triggered by a GraphQL mutation: it
//! validates its inputs, performs a bounded set of writes (inside a
//! transaction when more than one), and returns either the created value or
//! a [`crate::MutationError`] for the GraphQL layer to fold into a payload.

pub mod customers;
pub mod orders;
pub mod products;

pub use customers::{BulkCreateOutcome, CustomerDraft, bulk_create_customers, create_customer};
pub use orders::{OrderDraft, create_order};
pub use products::{ProductDraft, RestockOutcome, create_product, update_low_stock_products};
