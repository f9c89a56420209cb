//! Demo data seeding.
//!
//! Runs once at startup, before the server accepts requests. Each table is
//! seeded only while it is empty, so restarts against a persistent database
//! do not grow duplicate rows.

use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;
use thiserror::Error;

use stockroom_core::{Price, PriceError, Role};

use crate::db::RepositoryError;
use crate::db::products::ProductRepository;
use crate::db::users::UserRepository;
use crate::models::product::{ProductDraft, ProductValidationError};
use crate::services::auth::{AuthError, AuthService, PasswordHasher};

/// Username of the seeded demo account.
pub const SEED_USERNAME: &str = "admin";

/// Fixed demo inventory: name, description, price, quantity.
const SEED_PRODUCTS: [(&str, &str, &str, i64); 3] = [
    ("Laptop", "High-performance laptop", "999.99", 10),
    ("Mouse", "Wireless mouse", "29.99", 50),
    ("Keyboard", "Mechanical keyboard", "79.99", 30),
];

/// Errors from the seeding routine.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The demo account could not be created.
    #[error("seed user could not be created: {0}")]
    Auth(#[from] AuthError),

    /// A count or insert failed.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// A seed price failed to parse.
    #[error("seed product has an invalid price: {0}")]
    Price(#[from] PriceError),

    /// A seed product failed field validation.
    #[error("seed product failed validation: {0}")]
    Validation(#[from] ProductValidationError),
}

/// What the seeder inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Users inserted (0 or 1).
    pub users_created: usize,
    /// Products inserted (0 or 3).
    pub products_created: usize,
}

/// Populate empty tables with the demo user and products.
///
/// Each table is checked separately: a non-empty users table keeps its
/// accounts, a non-empty products table keeps its inventory. Inserts go
/// through the stores' normal create paths; the seeder has no privileged
/// access.
///
/// # Errors
///
/// Returns `SeedError` if a count, hash, or insert fails.
pub async fn run(
    pool: &SqlitePool,
    hasher: &dyn PasswordHasher,
    seed_password: &SecretString,
) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();

    let users = UserRepository::new(pool);
    if users.count().await? == 0 {
        let auth = AuthService::new(pool, hasher);
        auth.create_user(SEED_USERNAME, seed_password.expose_secret(), Role::User)
            .await?;
        report.users_created = 1;
        tracing::info!(username = SEED_USERNAME, "seeded default user");
    } else {
        tracing::debug!("users table not empty, skipping user seed");
    }

    let products = ProductRepository::new(pool);
    if products.count().await? == 0 {
        for (name, description, price, quantity) in SEED_PRODUCTS {
            let draft = ProductDraft::new(name, description, Price::parse(price)?, quantity)?;
            products.create(&draft).await?;
            report.products_created += 1;
        }
        tracing::info!(count = report.products_created, "seeded demo products");
    } else {
        tracing::debug!("products table not empty, skipping product seed");
    }

    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::services::auth::PlainTextHasher;

    fn password() -> SecretString {
        SecretString::from("admin")
    }

    #[tokio::test]
    async fn test_seed_fills_empty_database() {
        let pool = test_pool().await;

        let report = run(&pool, &PlainTextHasher, &password()).await.unwrap();
        assert_eq!(report.users_created, 1);
        assert_eq!(report.products_created, 3);

        let products = ProductRepository::new(&pool).list().await.unwrap();
        let summary: Vec<(String, String, i64)> = products
            .into_iter()
            .map(|p| (p.name, p.price.to_string(), p.quantity))
            .collect();
        assert_eq!(
            summary,
            [
                ("Laptop".to_string(), "999.99".to_string(), 10),
                ("Mouse".to_string(), "29.99".to_string(), 50),
                ("Keyboard".to_string(), "79.99".to_string(), 30),
            ]
        );

        let auth = AuthService::new(&pool, &PlainTextHasher);
        assert!(auth.verify_credentials("admin", "admin").await.unwrap());
    }

    #[tokio::test]
    async fn test_rerun_is_a_no_op() {
        let pool = test_pool().await;

        run(&pool, &PlainTextHasher, &password()).await.unwrap();
        let second = run(&pool, &PlainTextHasher, &password()).await.unwrap();

        assert_eq!(second, SeedReport::default());
        assert_eq!(UserRepository::new(&pool).count().await.unwrap(), 1);
        assert_eq!(ProductRepository::new(&pool).count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_tables_are_guarded_independently() {
        let pool = test_pool().await;

        let existing = ProductDraft::new(
            "Existing",
            "already here",
            Price::parse("5.00").unwrap(),
            1,
        )
        .unwrap();
        ProductRepository::new(&pool)
            .create(&existing)
            .await
            .unwrap();

        let report = run(&pool, &PlainTextHasher, &password()).await.unwrap();

        assert_eq!(report.users_created, 1);
        assert_eq!(report.products_created, 0);
        assert_eq!(ProductRepository::new(&pool).count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_seed_password_comes_from_config() {
        let pool = test_pool().await;

        run(&pool, &PlainTextHasher, &SecretString::from("hunter2"))
            .await
            .unwrap();

        let auth = AuthService::new(&pool, &PlainTextHasher);
        assert!(auth.verify_credentials("admin", "hunter2").await.unwrap());
        assert!(!auth.verify_credentials("admin", "admin").await.unwrap());
    }
}
