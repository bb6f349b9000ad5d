//! Mutation resolvers.
//!
//! Every business-rule failure is folded into the returned payload
//! (`success: false` plus error strings); resolvers only produce a GraphQL
//! error when the schema itself is miswired (missing pool).

use async_graphql::{Context, ID, Object, Result};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::services::{self, CustomerDraft, OrderDraft, ProductDraft};

use super::types::{
    BulkCreateCustomersPayload, CreateCustomerPayload, CreateOrderPayload, CreateProductPayload,
    CustomerInputType, UpdateLowStockProductsPayload,
};

/// Root mutation object.
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a customer after validating email format, phone format, and
    /// email uniqueness.
    async fn create_customer(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
        phone: Option<String>,
    ) -> Result<CreateCustomerPayload> {
        let pool = ctx.data::<SqlitePool>()?;

        let payload = match services::create_customer(pool, CustomerDraft { name, email, phone })
            .await
        {
            Ok(customer) => CreateCustomerPayload {
                customer: Some(customer.into()),
                success: true,
                message: "Customer created successfully".to_owned(),
                errors: Vec::new(),
            },
            Err(err) => CreateCustomerPayload {
                customer: None,
                success: false,
                message: err.to_string(),
                errors: vec![err.to_string()],
            },
        };

        Ok(payload)
    }

    /// Create a batch of customers; each row succeeds or fails
    /// independently.
    async fn bulk_create_customers(
        &self,
        ctx: &Context<'_>,
        input: Vec<CustomerInputType>,
    ) -> Result<BulkCreateCustomersPayload> {
        let pool = ctx.data::<SqlitePool>()?;

        let drafts = input.into_iter().map(Into::into).collect();
        let outcome = services::bulk_create_customers(pool, drafts).await;

        Ok(BulkCreateCustomersPayload {
            customers: outcome.customers.into_iter().map(Into::into).collect(),
            errors: outcome.errors,
        })
    }

    /// Create a product after validating price and stock.
    async fn create_product(
        &self,
        ctx: &Context<'_>,
        name: String,
        price: String,
        stock: Option<i64>,
    ) -> Result<CreateProductPayload> {
        let pool = ctx.data::<SqlitePool>()?;

        let payload = match services::create_product(pool, ProductDraft { name, price, stock })
            .await
        {
            Ok(product) => CreateProductPayload {
                product: Some(product.into()),
                success: true,
                errors: Vec::new(),
            },
            Err(err) => CreateProductPayload {
                product: None,
                success: false,
                errors: vec![err.to_string()],
            },
        };

        Ok(payload)
    }

    /// Create an order linking a customer to one or more products; the
    /// total is derived inside the creation transaction.
    async fn create_order(
        &self,
        ctx: &Context<'_>,
        customer_id: ID,
        product_ids: Vec<ID>,
        order_date: Option<DateTime<Utc>>,
    ) -> Result<CreateOrderPayload> {
        let pool = ctx.data::<SqlitePool>()?;

        let draft = OrderDraft {
            customer_id: customer_id.to_string(),
            product_ids: product_ids.iter().map(|id| id.to_string()).collect(),
            order_date,
        };

        let payload = match services::create_order(pool, draft).await {
            Ok(created) => CreateOrderPayload {
                order: Some(created.into()),
                success: true,
                errors: Vec::new(),
            },
            Err(err) => CreateOrderPayload {
                order: None,
                success: false,
                errors: vec![err.to_string()],
            },
        };

        Ok(payload)
    }

    /// Restock every product with stock below 10 by 10 units.
    async fn update_low_stock_products(
        &self,
        ctx: &Context<'_>,
    ) -> Result<UpdateLowStockProductsPayload> {
        let pool = ctx.data::<SqlitePool>()?;

        let payload = match services::update_low_stock_products(pool).await {
            Ok(outcome) => UpdateLowStockProductsPayload {
                updated_products: outcome.updated.into_iter().map(Into::into).collect(),
                success: true,
                message: outcome.message,
            },
            Err(err) => UpdateLowStockProductsPayload {
                updated_products: Vec::new(),
                success: false,
                message: err.to_string(),
            },
        };

        Ok(payload)
    }
}
