//! Database migration command.
//!
//! # Environment Variables
//!
//! - `CRM_DATABASE_URL` - SQLite connection string (default: `sqlite:crm.db`)

use crm_api::db;

/// Run the embedded migrations against the configured database.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or a migration fails
/// to apply.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("CRM_DATABASE_URL").unwrap_or_else(|_| "sqlite:crm.db".to_owned());

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    db::run_migrations(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
