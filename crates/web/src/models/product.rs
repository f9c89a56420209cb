//! Product domain types.
//!
//! [`ProductDraft`] is the only way to hand field values to the repository,
//! so invalid products cannot reach the database.

use chrono::{DateTime, Utc};
use thiserror::Error;

use stockroom_core::{Price, ProductId};

/// Validation errors for product field values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductValidationError {
    /// The name was empty or all whitespace.
    #[error("name cannot be empty")]
    EmptyName,

    /// The quantity was below zero.
    #[error("quantity cannot be negative")]
    NegativeQuantity,
}

/// A sellable inventory item (domain type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Unique product ID. Never reused, even after deletion.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Free-form description; may be empty.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Units in stock.
    pub quantity: i64,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Validated field values for creating or updating a product.
///
/// Construction goes through [`ProductDraft::new`], so a draft in hand is
/// known to satisfy the field invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    name: String,
    description: String,
    price: Price,
    quantity: i64,
}

impl ProductDraft {
    /// Validate field values into a draft.
    ///
    /// The name must contain at least one non-whitespace character and the
    /// quantity must be non-negative. A negative price cannot occur because
    /// [`Price`] already rules it out.
    ///
    /// # Errors
    ///
    /// Returns `ProductValidationError` naming the first failed field.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Price,
        quantity: i64,
    ) -> Result<Self, ProductValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        if quantity < 0 {
            return Err(ProductValidationError::NegativeQuantity);
        }
        Ok(Self {
            name,
            description: description.into(),
            price,
            quantity,
        })
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Unit price.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Units in stock.
    #[must_use]
    pub const fn quantity(&self) -> i64 {
        self.quantity
    }
}
