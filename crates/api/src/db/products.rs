//! Database operations for products.

use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crm_core::ProductId;

use super::ordering::{OrderByError, SortKey, order_by_clause, parse_order_by};
use super::{RepositoryError, contains_pattern};
use crate::models::{NewProduct, Product, ProductFilter};

/// Sortable product fields and the SQL expressions they resolve to.
const SORT_FIELDS: &[(&'static str, &'static str)] = &[
    ("id", "id"),
    ("name", "name"),
    ("price", "CAST(price AS REAL)"),
    ("stock", "stock"),
];

/// Resolve a product sort spec against the product whitelist.
///
/// # Errors
///
/// Returns [`OrderByError`] for unknown field names.
pub fn sort_keys(spec: &str) -> Result<Vec<SortKey>, OrderByError> {
    parse_order_by(spec, SORT_FIELDS)
}

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: String,
    stock: i64,
}

impl ProductRow {
    fn into_product(self) -> Result<Product, RepositoryError> {
        let price = Decimal::from_str(&self.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(Product {
            id: ProductId::new(self.id),
            name: self.name,
            price,
            stock: self.stock,
        })
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, input: &NewProduct) -> Result<Product, RepositoryError> {
        let row: ProductRow = sqlx::query_as(
            r"
            INSERT INTO products (name, price, stock)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, price, stock
            ",
        )
        .bind(&input.name)
        .bind(input.price.to_string())
        .bind(input.stock)
        .fetch_one(self.pool)
        .await?;

        row.into_product()
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> =
            sqlx::query_as("SELECT id, name, price, stock FROM products WHERE id = ?1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        row.map(ProductRow::into_product).transpose()
    }

    /// Get every product whose ID appears in `ids`, in id order.
    ///
    /// Missing IDs are silently absent from the result; the caller compares
    /// counts to detect them.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT id, name, price, stock FROM products WHERE id IN (");
        let mut separated = qb.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        qb.push(") ORDER BY id");

        let rows: Vec<ProductRow> = qb.build_query_as().fetch_all(self.pool).await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    /// Find a product by exact name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> =
            sqlx::query_as("SELECT id, name, price, stock FROM products WHERE name = ?1")
                .bind(name)
                .fetch_optional(self.pool)
                .await?;

        row.map(ProductRow::into_product).transpose()
    }

    /// List products with filtering and ordering.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        filter: &ProductFilter,
        order: &[SortKey],
    ) -> Result<Vec<Product>, RepositoryError> {
        let mut qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT id, name, price, stock FROM products WHERE 1=1");

        if let Some(name) = &filter.name_contains {
            qb.push(" AND name LIKE ")
                .push_bind(contains_pattern(name))
                .push(r" ESCAPE '\'");
        }
        if let Some(gte) = filter.price_gte {
            qb.push(" AND CAST(price AS REAL) >= CAST(")
                .push_bind(gte.to_string())
                .push(" AS REAL)");
        }
        if let Some(lte) = filter.price_lte {
            qb.push(" AND CAST(price AS REAL) <= CAST(")
                .push_bind(lte.to_string())
                .push(" AS REAL)");
        }
        if let Some(gte) = filter.stock_gte {
            qb.push(" AND stock >= ").push_bind(gte);
        }
        if let Some(lte) = filter.stock_lte {
            qb.push(" AND stock <= ").push_bind(lte);
        }
        if let Some(lt) = filter.stock_lt {
            qb.push(" AND stock < ").push_bind(lt);
        }

        qb.push(order_by_clause(order));

        let rows: Vec<ProductRow> = qb.build_query_as().fetch_all(self.pool).await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    /// Restock every product whose stock is strictly below `threshold` by
    /// `amount`, in one transaction.
    ///
    /// Returns the updated products in id order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails; nothing is
    /// changed in that case.
    pub async fn restock_below(
        &self,
        threshold: i64,
        amount: i64,
    ) -> Result<Vec<Product>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let rows: Vec<ProductRow> = sqlx::query_as(
            r"
            UPDATE products
            SET stock = stock + ?1
            WHERE stock < ?2
            RETURNING id, name, price, stock
            ",
        )
        .bind(amount)
        .bind(threshold)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let mut updated: Vec<Product> = rows
            .into_iter()
            .map(ProductRow::into_product)
            .collect::<Result<_, _>>()?;
        updated.sort_by_key(|p| p.id.as_i64());

        Ok(updated)
    }
}
