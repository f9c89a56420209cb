//! User repository for database operations.
//!
//! Queries use sqlx's runtime API (`query_as` plus binds) so builds do not
//! need a live database.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use stockroom_core::{Role, UserId, Username};

use super::RepositoryError;
use crate::models::user::User;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for user queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::parse(&row.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;
        let role = row
            .role
            .parse::<Role>()
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid role in database: {e}")))?;

        Ok(Self {
            id: UserId::new(row.id),
            username,
            password_hash: row.password_hash,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user from an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        username: &Username,
        password_hash: &str,
        role: Role,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (username, password_hash, role)
            VALUES (?1, ?2, ?3)
            RETURNING id, username, password_hash, role, created_at, updated_at
            ",
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Look up a user by username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, username, password_hash, role, created_at, updated_at
            FROM users
            WHERE username = ?1
            ",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Count all users.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn username(s: &str) -> Username {
        Username::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find_roundtrip() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        let created = repo
            .create(&username("alice"), "$argon2id$stub-hash", Role::User)
            .await
            .unwrap();
        assert_eq!(created.username.as_str(), "alice");
        assert_eq!(created.role, Role::User);

        let found = repo
            .find_by_username(&username("alice"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "$argon2id$stub-hash");
        assert_eq!(found.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        let found = repo.find_by_username(&username("ghost")).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        repo.create(&username("alice"), "hash-a", Role::User)
            .await
            .unwrap();
        let err = repo
            .create(&username("alice"), "hash-b", Role::Admin)
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_usernames_are_case_sensitive() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        repo.create(&username("Admin"), "hash", Role::User)
            .await
            .unwrap();

        assert!(
            repo.find_by_username(&username("admin"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_count() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        assert_eq!(repo.count().await.unwrap(), 0);
        repo.create(&username("a"), "hash", Role::User)
            .await
            .unwrap();
        repo.create(&username("b"), "hash", Role::Admin)
            .await
            .unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
