//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, Utc};

use stockroom_core::{Role, UserId, Username};

/// An application user (domain type).
///
/// Used for local authentication only.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name, unique across all users.
    pub username: Username,
    /// Argon2id PHC-format password hash. Never the clear text.
    pub password_hash: String,
    /// Stored role tag.
    pub role: Role,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
