//! # Error Types
//!
//! Domain-specific error types for kicks-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kicks-core errors (this file)                                         │
//! │  ├── CoreError        - Signaled conditions the user must see          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  kicks-db errors (separate crate)                                      │
//! │  └── DbError          - Storage failures (propagate, never retried)    │
//! │                                                                         │
//! │  kicks-storefront errors (app)                                         │
//! │  └── StoreError       - What the presentation layer receives           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ─┐                                  │
//! │                          DbError ───┴─► StoreError → presentation      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Conditions signaled to the presentation layer.
///
/// None of these are storage failures: they are detected before (or instead
/// of) a store mutation and leave persisted state untouched.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Registration attempted with a username that already exists.
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    /// Unknown username or wrong password.
    ///
    /// The two cases are deliberately indistinguishable to the caller.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Brand, model or size was left at its placeholder value.
    #[error("Please select a brand, model and size")]
    SelectionIncomplete,

    /// The catalog has no price for the selected brand/model pair.
    ///
    /// ## When This Occurs
    /// - Brand is not a catalog brand
    /// - Model does not belong to the selected brand
    /// - The `sneakers` reference table has not been seeded
    #[error("Price not found for {brand} {model}")]
    PriceNotFound { brand: String, model: String },

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    CartEmpty,

    /// One or more payment fields were blank.
    #[error("Payment fields must not be empty: {}", fields.join(", "))]
    PaymentFieldsEmpty { fields: Vec<String> },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before any store call is made.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. a non-numeric size).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
