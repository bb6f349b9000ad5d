//! Read-only query resolvers.

use async_graphql::{Context, Object, Result};
use sqlx::SqlitePool;

use crate::db::{CustomerRepository, OrderRepository, ProductRepository, customers, orders, products};
use crate::models::{CustomerFilter, OrderFilter, ProductFilter};

use super::types::{
    CustomerFilterInput, CustomerType, OrderFilterInput, OrderType, ProductFilterInput,
    ProductType,
};

/// Root query object.
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Liveness field.
    async fn hello(&self) -> &'static str {
        "Hello, GraphQL!"
    }

    /// All customers, unfiltered.
    async fn customers(&self, ctx: &Context<'_>) -> Result<Vec<CustomerType>> {
        let pool = ctx.data::<SqlitePool>()?;
        let listed = CustomerRepository::new(pool)
            .list(&CustomerFilter::default(), &[])
            .await?;
        Ok(listed.into_iter().map(Into::into).collect())
    }

    /// All products, unfiltered.
    async fn products(&self, ctx: &Context<'_>) -> Result<Vec<ProductType>> {
        let pool = ctx.data::<SqlitePool>()?;
        let listed = ProductRepository::new(pool)
            .list(&ProductFilter::default(), &[])
            .await?;
        Ok(listed.into_iter().map(Into::into).collect())
    }

    /// All orders with their customers and products, unfiltered.
    async fn orders(&self, ctx: &Context<'_>) -> Result<Vec<OrderType>> {
        let pool = ctx.data::<SqlitePool>()?;
        let listed = OrderRepository::new(pool)
            .list(&OrderFilter::default(), &[])
            .await?;
        Ok(listed.into_iter().map(Into::into).collect())
    }

    /// Customers with filtering and ordering.
    ///
    /// `orderBy` is a comma-separated field list; prefix a field with `-`
    /// for descending (e.g. "name,-created_at").
    async fn all_customers(
        &self,
        ctx: &Context<'_>,
        filter: Option<CustomerFilterInput>,
        order_by: Option<String>,
    ) -> Result<Vec<CustomerType>> {
        let pool = ctx.data::<SqlitePool>()?;
        let filter = filter.map(Into::into).unwrap_or_default();
        let order = customers::sort_keys(order_by.as_deref().unwrap_or_default())?;

        let listed = CustomerRepository::new(pool).list(&filter, &order).await?;
        Ok(listed.into_iter().map(Into::into).collect())
    }

    /// Products with filtering and ordering.
    async fn all_products(
        &self,
        ctx: &Context<'_>,
        filter: Option<ProductFilterInput>,
        order_by: Option<String>,
    ) -> Result<Vec<ProductType>> {
        let pool = ctx.data::<SqlitePool>()?;
        let filter = filter.map(Into::into).unwrap_or_default();
        let order = products::sort_keys(order_by.as_deref().unwrap_or_default())?;

        let listed = ProductRepository::new(pool).list(&filter, &order).await?;
        Ok(listed.into_iter().map(Into::into).collect())
    }

    /// Orders with filtering and ordering.
    async fn all_orders(
        &self,
        ctx: &Context<'_>,
        filter: Option<OrderFilterInput>,
        order_by: Option<String>,
    ) -> Result<Vec<OrderType>> {
        let pool = ctx.data::<SqlitePool>()?;
        let filter = filter.map(OrderFilterInput::into_filter).transpose()?.unwrap_or_default();
        let order = orders::sort_keys(order_by.as_deref().unwrap_or_default())?;

        let listed = OrderRepository::new(pool).list(&filter, &order).await?;
        Ok(listed.into_iter().map(Into::into).collect())
    }
}
