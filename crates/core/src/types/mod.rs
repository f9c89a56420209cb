//! Core types for Stockroom.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod role;
pub mod username;

pub use id::*;
pub use price::{Price, PriceError};
pub use role::Role;
pub use username::{Username, UsernameError};
