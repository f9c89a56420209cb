//! CLI command implementations.

pub mod migrate;
pub mod seed;
pub mod user;

use secrecy::SecretString;

/// Read the database URL from the environment.
///
/// `STOCKROOM_DATABASE_URL` wins; plain `DATABASE_URL` is accepted as a
/// fallback so the CLI works against the same `.env` as the web app.
pub(crate) fn database_url() -> Option<SecretString> {
    std::env::var("STOCKROOM_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .map(SecretString::from)
}
