//! Database seeding command.
//!
//! Fills empty tables with the default login and a small starter catalog,
//! the same data the web app seeds at startup. Tables that already hold
//! rows are left alone, so running this twice changes nothing.
//!
//! # Usage
//!
//! ```bash
//! stockroom-cli seed
//! ```
//!
//! # Environment Variables
//!
//! - `STOCKROOM_DATABASE_URL` - SQLite connection string (`DATABASE_URL`
//!   works as a fallback)
//! - `STOCKROOM_SEED_PASSWORD` - Password for the seeded login (default
//!   `admin`)

use secrecy::SecretString;
use thiserror::Error;

use stockroom_web::services::auth::Argon2PasswordHasher;
use stockroom_web::{db, seed};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedCommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Seeding error.
    #[error("Seeding error: {0}")]
    Seed(#[from] seed::SeedError),
}

/// Seed the default login and catalog into empty tables.
///
/// Pending migrations run first so the command works on a fresh database.
///
/// # Errors
///
/// Returns an error if the database URL is missing or any database
/// operation fails.
pub async fn run() -> Result<(), SeedCommandError> {
    dotenvy::dotenv().ok();

    let database_url = super::database_url()
        .ok_or(SeedCommandError::MissingEnvVar("STOCKROOM_DATABASE_URL"))?;

    let seed_password = std::env::var("STOCKROOM_SEED_PASSWORD")
        .map_or_else(|_| SecretString::from("admin"), SecretString::from);

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    db::MIGRATOR.run(&pool).await?;

    let report = seed::run(&pool, &Argon2PasswordHasher, &seed_password).await?;

    tracing::info!("Seeding complete!");
    tracing::info!("  Users created: {}", report.users_created);
    tracing::info!("  Products created: {}", report.products_created);

    Ok(())
}
