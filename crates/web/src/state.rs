//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::services::auth::PasswordHasher;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: SqlitePool,
    hasher: Box<dyn PasswordHasher>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The password hasher is injected here so the whole application can run
    /// against a different implementation.
    #[must_use]
    pub fn new(config: AppConfig, pool: SqlitePool, hasher: impl PasswordHasher + 'static) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                hasher: Box::new(hasher),
            }),
        }
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the password hasher.
    #[must_use]
    pub fn password_hasher(&self) -> &dyn PasswordHasher {
        self.inner.hasher.as_ref()
    }
}
