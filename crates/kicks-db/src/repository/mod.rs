//! # Repository Module
//!
//! Database repository implementations for the storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repositories                                         │
//! │                                                                         │
//! │  Session                                                               │
//! │       │  db.cart().add_item(user_id, "Nike", "AirMax", size, price)    │
//! │       ▼                                                                 │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────┐        │
//! │  │ UserRepository   │ │ CatalogRepository│ │ CartRepository   │        │
//! │  │ register/auth    │ │ brands/models/   │ │ get/add/clear    │        │
//! │  │                  │ │ price            │ │                  │        │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────┘        │
//! │  ┌──────────────────┐                                                  │
//! │  │ OrderRepository  │  create / for_user / checkout (transactional)    │
//! │  └──────────────────┘                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite: users, cart, orders (+ externally seeded sneakers)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Price Columns
//! Every price column is `REAL` in major units. Rows are read as `f64` and
//! converted to [`Money`] with [`money_from_real`]; writes go through
//! [`money_to_real`]. Arithmetic never happens on the floats.
//!
//! A stored value that is not finite, or whose cent amount is beyond
//! `±2^53` (the last integer an `f64` holds exactly), is rejected with
//! `DbError::Internal` instead of being clamped.

pub mod cart;
pub mod catalog;
pub mod order;
pub mod user;

use crate::error::{DbError, DbResult};
use kicks_core::Money;

/// Largest cent magnitude a `REAL` price may convert to.
const MAX_REAL_CENTS: f64 = 9_007_199_254_740_992.0;

/// Converts a stored `REAL` price (e.g. `120.0`) into cents.
pub fn money_from_real(value: f64) -> DbResult<Money> {
    let cents = (value * 100.0).round();
    if !cents.is_finite() || cents.abs() > MAX_REAL_CENTS {
        return Err(DbError::Internal(format!(
            "stored price {} is out of range",
            value
        )));
    }
    Ok(Money::from_cents(cents as i64))
}

/// Converts cents into the `REAL` value written to price columns.
pub fn money_to_real(money: Money) -> f64 {
    money.cents() as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_to_money_rounds() {
        assert_eq!(money_from_real(120.0).unwrap().cents(), 12000);
        assert_eq!(money_from_real(19.99).unwrap().cents(), 1999);
        // 0.1 + 0.2 stored as a float still lands on 30 cents
        assert_eq!(money_from_real(0.1 + 0.2).unwrap().cents(), 30);
    }

    #[test]
    fn test_real_out_of_range_is_error() {
        for value in [1e18, -1e18, f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            assert!(
                matches!(money_from_real(value), Err(DbError::Internal(_))),
                "{value} should be rejected"
            );
        }
        assert_eq!(money_from_real(1e13).unwrap().cents(), 1_000_000_000_000_000);
    }

    #[test]
    fn test_money_to_real() {
        assert_eq!(money_to_real(Money::from_cents(27000)), 270.0);
        assert_eq!(money_from_real(money_to_real(Money::from_cents(1999))).unwrap().cents(), 1999);
    }
}
