//! Database operations for orders.
//!
//! Order creation is the one multi-write path in the service: the order
//! row, its product links, and the derived total are written inside a
//! single transaction so a partial order is never observable.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crm_core::{CustomerId, Email, OrderId, ProductId};

use super::ordering::{OrderByError, SortKey, order_by_clause, parse_order_by};
use super::{RepositoryError, contains_pattern};
use crate::models::{Customer, NewOrder, Order, OrderFilter, OrderWithDetails, Product};

/// Sortable order fields and the SQL expressions they resolve to.
const SORT_FIELDS: &[(&'static str, &'static str)] = &[
    ("id", "o.id"),
    ("order_date", "o.order_date"),
    ("total_amount", "CAST(o.total_amount AS REAL)"),
];

/// Resolve an order sort spec against the order whitelist.
///
/// # Errors
///
/// Returns [`OrderByError`] for unknown field names.
pub fn sort_keys(spec: &str) -> Result<Vec<SortKey>, OrderByError> {
    parse_order_by(spec, SORT_FIELDS)
}

/// Internal row type for order queries, with the owning customer joined in.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer_id: i64,
    total_amount: String,
    order_date: DateTime<Utc>,
    customer_name: String,
    customer_email: String,
    customer_phone: Option<String>,
    customer_created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_parts(self) -> Result<(Order, Customer), RepositoryError> {
        let total_amount = Decimal::from_str(&self.total_amount).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid total in database: {e}"))
        })?;
        let email = Email::parse(&self.customer_email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        let order = Order {
            id: OrderId::new(self.id),
            customer_id: CustomerId::new(self.customer_id),
            total_amount,
            order_date: self.order_date,
        };
        let customer = Customer {
            id: CustomerId::new(self.customer_id),
            name: self.customer_name,
            email,
            phone: self.customer_phone,
            created_at: self.customer_created_at,
        };

        Ok((order, customer))
    }
}

/// Internal row type for products joined through the order link table.
#[derive(Debug, sqlx::FromRow)]
struct LinkedProductRow {
    order_id: i64,
    id: i64,
    name: String,
    price: String,
    stock: i64,
}

impl LinkedProductRow {
    fn into_product(self) -> Result<(i64, Product), RepositoryError> {
        let price = Decimal::from_str(&self.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok((
            self.order_id,
            Product {
                id: ProductId::new(self.id),
                name: self.name,
                price,
                stock: self.stock,
            },
        ))
    }
}

const ORDER_SELECT: &str = "SELECT o.id, o.customer_id, o.total_amount, o.order_date, \
     c.name AS customer_name, c.email AS customer_email, \
     c.phone AS customer_phone, c.created_at AS customer_created_at \
     FROM orders o JOIN customers c ON c.id = o.customer_id WHERE 1=1";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Atomically create an order: insert the order row, link the products,
    /// and persist the total as the exact sum of the linked products'
    /// prices, all read inside the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer or any product
    /// vanished since the caller resolved them, and
    /// `RepositoryError::Database` for storage failures. In every error
    /// case the transaction is rolled back and no partial order remains.
    pub async fn create_with_products(
        &self,
        input: &NewOrder,
    ) -> Result<OrderWithDetails, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let customer_row: Option<(i64, String, String, Option<String>, DateTime<Utc>)> =
            sqlx::query_as(
                "SELECT id, name, email, phone, created_at FROM customers WHERE id = ?1",
            )
            .bind(input.customer_id)
            .fetch_optional(&mut *tx)
            .await?;
        let (cid, cname, cemail, cphone, ccreated) =
            customer_row.ok_or(RepositoryError::NotFound)?;
        let customer = Customer {
            id: CustomerId::new(cid),
            name: cname,
            email: Email::parse(&cemail).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
            })?,
            phone: cphone,
            created_at: ccreated,
        };

        let mut qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT id, name, price, stock FROM products WHERE id IN (");
        let mut separated = qb.separated(", ");
        for id in &input.product_ids {
            separated.push_bind(*id);
        }
        qb.push(") ORDER BY id");

        let product_rows: Vec<(i64, String, String, i64)> =
            qb.build_query_as().fetch_all(&mut *tx).await?;
        if product_rows.len() != input.product_ids.len() {
            return Err(RepositoryError::NotFound);
        }

        let products: Vec<Product> = product_rows
            .into_iter()
            .map(|(id, name, price, stock)| {
                let price = Decimal::from_str(&price).map_err(|e| {
                    RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
                })?;
                Ok(Product {
                    id: ProductId::new(id),
                    name,
                    price,
                    stock,
                })
            })
            .collect::<Result<_, RepositoryError>>()?;

        let total_amount: Decimal = products.iter().map(|p| p.price).sum();
        let order_date = input.order_date.unwrap_or_else(Utc::now);

        let order_id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO orders (customer_id, total_amount, order_date)
            VALUES (?1, ?2, ?3)
            RETURNING id
            ",
        )
        .bind(input.customer_id)
        .bind(total_amount.to_string())
        .bind(order_date)
        .fetch_one(&mut *tx)
        .await?;

        for product in &products {
            sqlx::query("INSERT INTO order_products (order_id, product_id) VALUES (?1, ?2)")
                .bind(order_id)
                .bind(product.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(OrderWithDetails {
            order: Order {
                id: OrderId::new(order_id),
                customer_id: input.customer_id,
                total_amount,
                order_date,
            },
            customer,
            products,
        })
    }

    /// Get an order with its customer and products by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<OrderWithDetails>, RepositoryError> {
        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(ORDER_SELECT);
        qb.push(" AND o.id = ").push_bind(id);

        let row: Option<OrderRow> = qb.build_query_as().fetch_optional(self.pool).await?;
        let Some(row) = row else {
            return Ok(None);
        };

        let (order, customer) = row.into_parts()?;
        let mut products_by_order = self.load_products(&[order.id.as_i64()]).await?;
        let products = products_by_order.remove(&order.id.as_i64()).unwrap_or_default();

        Ok(Some(OrderWithDetails {
            order,
            customer,
            products,
        }))
    }

    /// List orders with filtering and ordering, each with its customer and
    /// product set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        filter: &OrderFilter,
        order: &[SortKey],
    ) -> Result<Vec<OrderWithDetails>, RepositoryError> {
        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(ORDER_SELECT);

        if let Some(gte) = filter.total_amount_gte {
            qb.push(" AND CAST(o.total_amount AS REAL) >= CAST(")
                .push_bind(gte.to_string())
                .push(" AS REAL)");
        }
        if let Some(lte) = filter.total_amount_lte {
            qb.push(" AND CAST(o.total_amount AS REAL) <= CAST(")
                .push_bind(lte.to_string())
                .push(" AS REAL)");
        }
        if let Some(gte) = filter.order_date_gte {
            qb.push(" AND datetime(o.order_date) >= datetime(")
                .push_bind(gte)
                .push(")");
        }
        if let Some(lte) = filter.order_date_lte {
            qb.push(" AND datetime(o.order_date) <= datetime(")
                .push_bind(lte)
                .push(")");
        }
        if let Some(name) = &filter.customer_name {
            qb.push(" AND c.name LIKE ")
                .push_bind(contains_pattern(name))
                .push(r" ESCAPE '\'");
        }
        if let Some(name) = &filter.product_name {
            qb.push(
                " AND EXISTS (SELECT 1 FROM order_products op \
                 JOIN products p ON p.id = op.product_id \
                 WHERE op.order_id = o.id AND p.name LIKE ",
            )
            .push_bind(contains_pattern(name))
            .push(r" ESCAPE '\')");
        }
        if let Some(product_id) = filter.product_id {
            qb.push(
                " AND EXISTS (SELECT 1 FROM order_products op \
                 WHERE op.order_id = o.id AND op.product_id = ",
            )
            .push_bind(product_id)
            .push(")");
        }

        qb.push(order_by_clause(order));

        let rows: Vec<OrderRow> = qb.build_query_as().fetch_all(self.pool).await?;
        let parts: Vec<(Order, Customer)> = rows
            .into_iter()
            .map(OrderRow::into_parts)
            .collect::<Result<_, _>>()?;

        let order_ids: Vec<i64> = parts.iter().map(|(o, _)| o.id.as_i64()).collect();
        let mut products_by_order = self.load_products(&order_ids).await?;

        Ok(parts
            .into_iter()
            .map(|(order, customer)| {
                let products = products_by_order
                    .remove(&order.id.as_i64())
                    .unwrap_or_default();
                OrderWithDetails {
                    order,
                    customer,
                    products,
                }
            })
            .collect())
    }

    /// Load the product sets for a batch of orders, grouped by order id.
    async fn load_products(
        &self,
        order_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Product>>, RepositoryError> {
        if order_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
            "SELECT op.order_id, p.id, p.name, p.price, p.stock \
             FROM order_products op JOIN products p ON p.id = op.product_id \
             WHERE op.order_id IN (",
        );
        let mut separated = qb.separated(", ");
        for id in order_ids {
            separated.push_bind(*id);
        }
        qb.push(") ORDER BY p.id");

        let rows: Vec<LinkedProductRow> = qb.build_query_as().fetch_all(self.pool).await?;

        let mut grouped: HashMap<i64, Vec<Product>> = HashMap::new();
        for row in rows {
            let (order_id, product) = row.into_product()?;
            grouped.entry(order_id).or_default().push(product);
        }

        Ok(grouped)
    }
}
