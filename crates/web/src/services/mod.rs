//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Account creation and username/password login

pub mod auth;
