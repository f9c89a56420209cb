//! Authentication service.
//!
//! Username/password authentication with Argon2id hashing behind the
//! [`PasswordHasher`] capability.

mod error;
mod password;

pub use error::AuthError;
pub use password::{Argon2PasswordHasher, PasswordHashError, PasswordHasher};

#[cfg(test)]
pub(crate) use password::PlainTextHasher;

use sqlx::SqlitePool;

use stockroom_core::{Role, Username};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::User;

/// Well-formed Argon2id hash that no real credential is ever stored under.
///
/// Login attempts naming an unknown user verify against this so both
/// outcomes do the same hashing work and stay indistinguishable by timing.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$VE0e3g7DalWHgDwou3nuRA$uC6TER156UQpk0lNQ5+jHM0l5poVjPA1he8TZbuA+WE";

/// Authentication service.
///
/// Handles account creation and login against the user store.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    hasher: &'a dyn PasswordHasher,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool, hasher: &'a dyn PasswordHasher) -> Self {
        Self {
            users: UserRepository::new(pool),
            hasher,
        }
    }

    /// Create a new user with a username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` if the username fails validation.
    /// Returns `AuthError::EmptyPassword` if the password is empty.
    /// Returns `AuthError::DuplicateUsername` if the username is taken.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<User, AuthError> {
        // Validate username
        let username = Username::parse(username)?;

        // Validate password
        if password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }

        // Hash password
        let password_hash = self
            .hasher
            .hash(password)
            .map_err(|_| AuthError::PasswordHash)?;

        // Create user
        let user = self
            .users
            .create(&username, &password_hash, role)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::DuplicateUsername,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Look up a user by username.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError> {
        let user = self.users.find_by_username(username).await?;
        Ok(user)
    }

    /// Authenticate a login attempt, returning the user on success.
    ///
    /// `Ok(None)` covers unknown usernames and wrong passwords alike, so the
    /// caller cannot tell which one occurred.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the lookup fails.
    /// Returns `AuthError::PasswordHash` if the stored hash is unreadable.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, AuthError> {
        let Ok(username) = Username::parse(username) else {
            let _ = self.hasher.verify(password, DUMMY_PASSWORD_HASH);
            return Ok(None);
        };

        let Some(user) = self.users.find_by_username(&username).await? else {
            let _ = self.hasher.verify(password, DUMMY_PASSWORD_HASH);
            return Ok(None);
        };

        if self
            .hasher
            .verify(password, &user.password_hash)
            .map_err(|_| AuthError::PasswordHash)?
        {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    /// Check a username/password pair without returning the account.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::authenticate`].
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, AuthError> {
        Ok(self.authenticate(username, password).await?.is_some())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let pool = test_pool().await;
        let hasher = PlainTextHasher;
        let auth = AuthService::new(&pool, &hasher);

        let user = auth
            .create_user("admin", "admin", Role::User)
            .await
            .unwrap();

        assert_eq!(user.username.as_str(), "admin");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.password_hash, "plain:admin");
    }

    #[tokio::test]
    async fn test_verify_credentials_truth_table() {
        let pool = test_pool().await;
        let hasher = PlainTextHasher;
        let auth = AuthService::new(&pool, &hasher);

        auth.create_user("admin", "admin", Role::User)
            .await
            .unwrap();

        assert!(auth.verify_credentials("admin", "admin").await.unwrap());
        assert!(!auth.verify_credentials("admin", "wrong").await.unwrap());
        assert!(!auth.verify_credentials("nouser", "admin").await.unwrap());
    }

    #[tokio::test]
    async fn test_authenticate_returns_the_user() {
        let pool = test_pool().await;
        let hasher = PlainTextHasher;
        let auth = AuthService::new(&pool, &hasher);

        let created = auth
            .create_user("admin", "admin", Role::User)
            .await
            .unwrap();

        let found = auth
            .authenticate("admin", "admin")
            .await
            .unwrap()
            .expect("credentials should match");
        assert_eq!(found.id, created.id);

        assert!(auth.authenticate("admin", "wrong").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unparseable_username_reports_plain_false() {
        let pool = test_pool().await;
        let hasher = PlainTextHasher;
        let auth = AuthService::new(&pool, &hasher);

        assert!(!auth.verify_credentials("has space", "pw").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let pool = test_pool().await;
        let hasher = PlainTextHasher;
        let auth = AuthService::new(&pool, &hasher);

        auth.create_user("admin", "admin", Role::User)
            .await
            .unwrap();
        let err = auth
            .create_user("admin", "other", Role::Admin)
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::DuplicateUsername));
    }

    #[tokio::test]
    async fn test_empty_password_rejected() {
        let pool = test_pool().await;
        let hasher = PlainTextHasher;
        let auth = AuthService::new(&pool, &hasher);

        let err = auth.create_user("admin", "", Role::User).await.unwrap_err();
        assert!(matches!(err, AuthError::EmptyPassword));
    }

    #[tokio::test]
    async fn test_invalid_username_rejected() {
        let pool = test_pool().await;
        let hasher = PlainTextHasher;
        let auth = AuthService::new(&pool, &hasher);

        let err = auth
            .create_user("has space", "pw", Role::User)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidUsername(_)));
    }

    #[tokio::test]
    async fn test_find_by_username() {
        let pool = test_pool().await;
        let hasher = PlainTextHasher;
        let auth = AuthService::new(&pool, &hasher);

        auth.create_user("admin", "admin", Role::User)
            .await
            .unwrap();

        let username = Username::parse("admin").unwrap();
        assert!(auth.find_by_username(&username).await.unwrap().is_some());

        let missing = Username::parse("ghost").unwrap();
        assert!(auth.find_by_username(&missing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_round_trip_with_argon2() {
        // Full-stack check with the real hasher.
        let pool = test_pool().await;
        let hasher = Argon2PasswordHasher;
        let auth = AuthService::new(&pool, &hasher);

        auth.create_user("admin", "admin", Role::User)
            .await
            .unwrap();

        assert!(auth.verify_credentials("admin", "admin").await.unwrap());
        assert!(!auth.verify_credentials("admin", "Admin").await.unwrap());
    }
}
