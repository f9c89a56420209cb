//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! stockroom-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `STOCKROOM_DATABASE_URL` - SQLite connection string (`DATABASE_URL`
//!   works as a fallback)
//!
//! The web app also runs pending migrations at startup; this command exists
//! for preparing a database without starting the server.

use thiserror::Error;

use stockroom_web::db;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run pending database migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or a migration cannot be applied.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = super::database_url()
        .ok_or(MigrationError::MissingEnvVar("STOCKROOM_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    db::MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
