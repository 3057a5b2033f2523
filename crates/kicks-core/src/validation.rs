//! # Validation Module
//!
//! Input validation for the storefront, run before any store call.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation layer                                           │
//! │  └── Maps placeholder widgets ("Select a brand") to empty input        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Credentials present, username length                              │
//! │  ├── Brand / model / size selected, size in range                      │
//! │  └── Payment fields present                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── UNIQUE(username)                                                  │
//! │  └── Foreign keys to users(id)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kicks_core::validation::{validate_selection, validate_payment};
//! use kicks_core::PaymentDetails;
//!
//! let selection = validate_selection("Nike", "AirMax", "42").unwrap();
//! assert_eq!(selection.size.value(), 42);
//!
//! assert!(validate_payment(&PaymentDetails::new("4111", "12/29", "123")).is_ok());
//! assert!(validate_payment(&PaymentDetails::new("", "12/29", "123")).is_err());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{PaymentDetails, ShoeSize};
use crate::MAX_USERNAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Credentials
// =============================================================================

/// Validates a username for registration.
///
/// ## Rules
/// - Must not be blank
/// - At most [`MAX_USERNAME_LEN`] characters after trimming
///
/// ## Returns
/// The trimmed username.
pub fn validate_username(username: &str) -> ValidationResult<String> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: MAX_USERNAME_LEN,
        });
    }

    Ok(username.to_string())
}

/// Validates a password for registration.
///
/// Only presence is required. Surrounding whitespace is not part of the
/// password; login trims the same way.
pub fn validate_password(password: &str) -> ValidationResult<&str> {
    let password = password.trim();
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    Ok(password)
}

// =============================================================================
// Catalog Selection
// =============================================================================

/// A complete brand/model/size selection, ready for a price lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub brand: String,
    pub model: String,
    pub size: ShoeSize,
}

/// Validates the three selection widgets.
///
/// ## Rules
/// - Blank brand, model or size → [`CoreError::SelectionIncomplete`]
/// - Size not a number in 36..=46 → [`CoreError::Validation`]
///
/// Whether the brand and model exist is the catalog's business: an unknown
/// pair surfaces later as [`CoreError::PriceNotFound`].
pub fn validate_selection(brand: &str, model: &str, size: &str) -> CoreResult<Selection> {
    let (brand, model, size) = (brand.trim(), model.trim(), size.trim());

    if brand.is_empty() || model.is_empty() || size.is_empty() {
        return Err(CoreError::SelectionIncomplete);
    }

    let size: ShoeSize = size.parse()?;

    Ok(Selection {
        brand: brand.to_string(),
        model: model.to_string(),
        size,
    })
}

// =============================================================================
// Payment
// =============================================================================

/// Validates that every payment field is filled in.
///
/// Format (card number digits, expiry, CVC length) is intentionally not
/// checked; any non-blank string is accepted.
pub fn validate_payment(details: &PaymentDetails) -> CoreResult<()> {
    let fields = [
        ("card number", &details.card_number),
        ("expiry", &details.expiry),
        ("cvc", &details.cvc),
    ];

    let missing: Vec<String> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(CoreError::PaymentFieldsEmpty { fields: missing });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert_eq!(validate_username("  alice ").unwrap(), "alice");
        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
        assert!(validate_username(&"a".repeat(MAX_USERNAME_LEN + 1)).is_err());
        assert!(validate_username(&"a".repeat(MAX_USERNAME_LEN)).is_ok());
    }

    #[test]
    fn test_validate_password() {
        assert_eq!(validate_password("pw1").unwrap(), "pw1");
        assert_eq!(validate_password(" pw 1 ").unwrap(), "pw 1");
        assert!(validate_password("").is_err());
        assert!(validate_password("   ").is_err());
    }

    #[test]
    fn test_validate_selection() {
        let selection = validate_selection("Nike", "AirMax", "42").unwrap();
        assert_eq!(selection.brand, "Nike");
        assert_eq!(selection.model, "AirMax");
        assert_eq!(selection.size.value(), 42);
    }

    #[test]
    fn test_validate_selection_incomplete() {
        assert!(matches!(
            validate_selection("", "AirMax", "42"),
            Err(CoreError::SelectionIncomplete)
        ));
        assert!(matches!(
            validate_selection("Nike", " ", "42"),
            Err(CoreError::SelectionIncomplete)
        ));
        assert!(matches!(
            validate_selection("Nike", "AirMax", ""),
            Err(CoreError::SelectionIncomplete)
        ));
    }

    #[test]
    fn test_validate_selection_bad_size() {
        assert!(matches!(
            validate_selection("Nike", "AirMax", "52"),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert!(matches!(
            validate_selection("Nike", "AirMax", "XL"),
            Err(CoreError::Validation(ValidationError::InvalidFormat { .. }))
        ));
    }

    #[test]
    fn test_validate_payment_accepts_any_non_blank() {
        assert!(validate_payment(&PaymentDetails::new("x", "y", "z")).is_ok());
    }

    #[test]
    fn test_validate_payment_reports_blank_fields() {
        let err = validate_payment(&PaymentDetails::new("  ", "12/29", "")).unwrap_err();
        match err {
            CoreError::PaymentFieldsEmpty { fields } => {
                assert_eq!(fields, vec!["card number".to_string(), "cvc".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
