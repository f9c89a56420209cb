//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a regular user
//! stockroom-cli user create -u alice -p "correct horse" -r user
//!
//! # Create an admin user
//! stockroom-cli user create -u boss -p "battery staple" -r admin
//! ```
//!
//! # Environment Variables
//!
//! - `STOCKROOM_DATABASE_URL` - SQLite connection string (`DATABASE_URL`
//!   works as a fallback)

use thiserror::Error;

use stockroom_core::Role;
use stockroom_web::db;
use stockroom_web::services::auth::{Argon2PasswordHasher, AuthError, AuthService};

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: user, admin")]
    InvalidRole(String),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Account creation error.
    #[error("Cannot create user: {0}")]
    Auth(#[from] AuthError),
}

/// Create a new user.
///
/// # Arguments
///
/// * `username` - Login name
/// * `password` - Password, stored as an Argon2id hash
/// * `role` - Role (`user` or `admin`)
///
/// # Errors
///
/// Returns an error if the role or username is invalid, the username is
/// taken, or the database cannot be reached.
pub async fn create(username: &str, password: &str, role: &str) -> Result<(), UserError> {
    dotenvy::dotenv().ok();

    // Parse and validate role
    let role: Role = role
        .parse()
        .map_err(|_| UserError::InvalidRole(role.to_owned()))?;

    let database_url =
        super::database_url().ok_or(UserError::MissingEnvVar("STOCKROOM_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Creating user: {} ({})", username, role);

    let auth = AuthService::new(&pool, &Argon2PasswordHasher);
    let user = auth.create_user(username, password, role).await?;

    tracing::info!(
        "User created successfully! ID: {}, Username: {}, Role: {}",
        user.id,
        user.username,
        user.role
    );

    Ok(())
}
