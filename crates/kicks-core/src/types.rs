//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │  CatalogEntry   │   │    CartLine     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (rowid)     │   │  brand          │   │  id, user_id    │       │
//! │  │  username       │   │  model          │   │  brand, model   │       │
//! │  │                 │   │  price          │   │  size, price    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Order       │   │    ShoeSize     │   │ PaymentDetails  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, user_id    │   │  u8, 36..=46    │   │  card_number    │       │
//! │  │  total_price    │   │  stored as TEXT │   │  expiry, cvc    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are SQLite `INTEGER PRIMARY KEY AUTOINCREMENT` values, so they
//! are plain `i64`s generated by the store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_SHOE_SIZE, MIN_SHOE_SIZE};

/// Database identifier of a user.
pub type UserId = i64;

// =============================================================================
// User
// =============================================================================

/// A registered storefront user.
///
/// The password hash never leaves `kicks-db`; this type is safe to hand to
/// the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
}

// =============================================================================
// Catalog Entry
// =============================================================================

/// A purchasable sneaker, independent of size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub brand: String,
    pub model: String,
    pub price: Money,
}

// =============================================================================
// Shoe Size
// =============================================================================

/// A user-chosen shoe size in EU sizing.
///
/// Sizes are not validated against catalog availability, only against the
/// storefront-wide range [`MIN_SHOE_SIZE`]..=[`MAX_SHOE_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(try_from = "u8", into = "u8")]
pub struct ShoeSize(u8);

impl ShoeSize {
    /// Creates a size, rejecting values outside the offered range.
    pub fn new(size: u8) -> Result<Self, ValidationError> {
        if !(MIN_SHOE_SIZE..=MAX_SHOE_SIZE).contains(&size) {
            return Err(ValidationError::OutOfRange {
                field: "size".to_string(),
                min: i64::from(MIN_SHOE_SIZE),
                max: i64::from(MAX_SHOE_SIZE),
            });
        }
        Ok(ShoeSize(size))
    }

    /// Returns the numeric size.
    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Every selectable size, smallest first.
    pub fn all() -> impl Iterator<Item = ShoeSize> {
        (MIN_SHOE_SIZE..=MAX_SHOE_SIZE).map(ShoeSize)
    }
}

impl fmt::Display for ShoeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ShoeSize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s.trim().parse().map_err(|_| ValidationError::InvalidFormat {
            field: "size".to_string(),
            reason: format!("'{}' is not a whole number", s.trim()),
        })?;
        ShoeSize::new(value)
    }
}

impl TryFrom<u8> for ShoeSize {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ShoeSize::new(value)
    }
}

impl From<ShoeSize> for u8 {
    fn from(size: ShoeSize) -> Self {
        size.0
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One pending selection in a user's cart.
///
/// The price is captured from the catalog when the line is added; later
/// catalog changes do not affect lines already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: i64,
    pub user_id: UserId,
    pub brand: String,
    pub model: String,
    pub size: ShoeSize,
    pub price: Money,
}

// =============================================================================
// Order
// =============================================================================

/// A completed checkout. One aggregate row; no per-line breakdown is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub user_id: UserId,
    pub total_price: Money,
}

// =============================================================================
// Payment Details
// =============================================================================

/// Payment fields entered at checkout.
///
/// Only presence is checked (see [`crate::validation::validate_payment`]);
/// no payment is actually processed.
#[derive(Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub card_number: String,
    pub expiry: String,
    pub cvc: String,
}

impl PaymentDetails {
    pub fn new(
        card_number: impl Into<String>,
        expiry: impl Into<String>,
        cvc: impl Into<String>,
    ) -> Self {
        PaymentDetails {
            card_number: card_number.into(),
            expiry: expiry.into(),
            cvc: cvc.into(),
        }
    }
}

/// Card data must not end up in logs.
impl fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits: String = self.card_number.chars().filter(char::is_ascii_digit).collect();
        let last4 = digits.get(digits.len().saturating_sub(4)..).unwrap_or("");
        f.debug_struct("PaymentDetails")
            .field("card_number", &format_args!("****{}", last4))
            .field("expiry", &"**/**")
            .field("cvc", &"***")
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shoe_size_range() {
        assert!(ShoeSize::new(36).is_ok());
        assert!(ShoeSize::new(46).is_ok());
        assert!(ShoeSize::new(35).is_err());
        assert!(ShoeSize::new(47).is_err());
    }

    #[test]
    fn test_shoe_size_parse() {
        assert_eq!("42".parse::<ShoeSize>().unwrap().value(), 42);
        assert_eq!(" 43 ".parse::<ShoeSize>().unwrap().value(), 43);
        assert!(matches!(
            "forty".parse::<ShoeSize>(),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            "50".parse::<ShoeSize>(),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_shoe_size_all() {
        let sizes: Vec<u8> = ShoeSize::all().map(|s| s.value()).collect();
        assert_eq!(sizes.len(), 11);
        assert_eq!(sizes.first(), Some(&36));
        assert_eq!(sizes.last(), Some(&46));
    }

    #[test]
    fn test_shoe_size_serde_rejects_out_of_range() {
        let ok: ShoeSize = serde_json::from_str("40").unwrap();
        assert_eq!(ok.value(), 40);
        assert!(serde_json::from_str::<ShoeSize>("12").is_err());
    }

    #[test]
    fn test_payment_details_debug_masks_card() {
        let details = PaymentDetails::new("4111-1111-1111-1234", "12/29", "123");
        let rendered = format!("{:?}", details);
        assert!(rendered.contains("****1234"));
        assert!(!rendered.contains("4111"));
        assert!(!rendered.contains("123\""));
    }
}
