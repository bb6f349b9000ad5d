//! Seed the database with the demo catalog.
//!
//! Idempotent get-or-create: products are keyed by name, customers by
//! email, so re-running the command never duplicates rows.

use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crm_api::db::{self, CustomerRepository, ProductRepository, RepositoryError};
use crm_api::models::{NewCustomer, NewProduct};
use crm_core::{Email, PhoneNumber};

const PRODUCTS: &[(&str, &str, i64)] = &[
    ("Laptop", "999.99", 10),
    ("Mouse", "19.99", 100),
    ("Keyboard", "49.99", 50),
];

const CUSTOMERS: &[(&str, &str, Option<&str>)] = &[
    ("Alice", "alice@example.com", Some("+1234567890")),
    ("Bob", "bob@example.com", Some("123-456-7890")),
];

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// Storage failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// A seed constant is malformed.
    #[error("invalid seed data: {0}")]
    InvalidSeedData(String),
}

/// Insert the demo catalog into the given pool, skipping rows that already
/// exist.
///
/// # Errors
///
/// Returns [`SeedError`] if a lookup or insert fails.
pub async fn seed(pool: &SqlitePool) -> Result<(), SeedError> {
    let products = ProductRepository::new(pool);
    for (name, price, stock) in PRODUCTS {
        if products.find_by_name(name).await?.is_some() {
            tracing::info!(product = %name, "exists, skipping");
            continue;
        }

        let price = Decimal::from_str(price)
            .map_err(|e| SeedError::InvalidSeedData(format!("price for {name}: {e}")))?;
        products
            .create(&NewProduct {
                name: (*name).to_owned(),
                price,
                stock: *stock,
            })
            .await?;
        tracing::info!(product = %name, "created");
    }

    let customers = CustomerRepository::new(pool);
    for (name, email, phone) in CUSTOMERS {
        if customers.find_by_email(email).await?.is_some() {
            tracing::info!(customer = %email, "exists, skipping");
            continue;
        }

        let email_parsed = Email::parse(email)
            .map_err(|e| SeedError::InvalidSeedData(format!("email for {name}: {e}")))?;
        let phone_parsed = phone
            .map(PhoneNumber::parse)
            .transpose()
            .map_err(|e| SeedError::InvalidSeedData(format!("phone for {name}: {e}")))?;

        customers
            .create(&NewCustomer {
                name: (*name).to_owned(),
                email: email_parsed,
                phone: phone_parsed,
            })
            .await?;
        tracing::info!(customer = %email, "created");
    }

    Ok(())
}

/// Migrate the configured database and seed the demo catalog.
///
/// # Errors
///
/// Returns an error if the database cannot be opened, migrated, or seeded.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("CRM_DATABASE_URL").unwrap_or_else(|_| "sqlite:crm.db".to_owned());

    let pool = db::create_pool(&database_url).await?;
    db::run_migrations(&pool).await?;

    tracing::info!("Seeding demo catalog...");
    seed(&pool).await?;
    tracing::info!("Seeding complete");

    Ok(())
}
