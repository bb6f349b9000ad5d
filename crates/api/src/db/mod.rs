//! Database access for the CRM service.
//!
//! # Layout
//!
//! - `customers` / `products` / `orders` - one repository per entity,
//!   holding a pool reference and exposing the entity's reads and writes
//! - `ordering` - parsing of comma-separated sort specs into whitelisted
//!   ORDER BY keys
//!
//! Queries are runtime-checked; dynamic filter predicates are composed with
//! `QueryBuilder`. Migrations live in `crates/api/migrations/` and are
//! embedded at compile time.

pub mod customers;
pub mod ordering;
pub mod orders;
pub mod products;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use customers::CustomerRepository;
pub use ordering::{OrderByError, SortKey};
pub use orders::OrderRepository;
pub use products::ProductRepository;

/// Embedded migrations for the CRM schema.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g. unique email).
    #[error("{0}")]
    Conflict(String),
}

/// Create a SQLite connection pool with sensible defaults.
///
/// The database file is created when missing; foreign keys are enforced.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Create a single-connection in-memory database pool.
///
/// An in-memory SQLite database lives and dies with its connection, so the
/// pool is pinned to one connection that is never recycled. Used by the
/// test suites.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Run the embedded migrations against the given pool.
///
/// # Errors
///
/// Returns `sqlx::migrate::MigrateError` if a migration fails to apply.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Escape `%`, `_`, and the escape character itself for a `LIKE ... ESCAPE '\'`
/// pattern.
fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Build a case-insensitive substring LIKE pattern.
fn contains_pattern(value: &str) -> String {
    format!("%{}%", escape_like(value))
}

/// Build a starts-with LIKE pattern.
fn prefix_pattern(value: &str) -> String {
    format!("{}%", escape_like(value))
}
