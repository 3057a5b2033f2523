//! # Cart
//!
//! The in-memory mirror of a user's persisted cart.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Mirror Operations                               │
//! │                                                                         │
//! │  Session event            Store call              Mirror change         │
//! │  ─────────────            ──────────              ─────────────         │
//! │                                                                         │
//! │  login / register ──────► cart.get_items() ─────► Cart::from_lines()   │
//! │                                                                         │
//! │  add item ──────────────► cart.add_item() ──────► lines.push(line)     │
//! │                                                                         │
//! │  checkout ──────────────► orders.checkout() ────► lines.clear()        │
//! │                                                                         │
//! │  NOTE: the store is written first; the mirror only changes after the    │
//! │        store call has committed.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::CartLine;

/// A user's cart.
///
/// ## Invariants
/// - Lines are kept in the order they were added (or loaded)
/// - Duplicate brand/model/size lines are allowed; each is a separate purchase
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,

    /// When the cart was loaded or last cleared.
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Creates a cart mirroring lines loaded from the store.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Cart {
            lines,
            created_at: Utc::now(),
        }
    }

    /// Appends a line that has already been persisted.
    pub fn push(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// The lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line prices.
    pub fn total(&self) -> Money {
        self.lines.iter().map(|line| line.price).sum()
    }

    /// When the cart was loaded or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Cart summary for presentation surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.len(),
            total: cart.total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShoeSize;

    fn line(id: i64, brand: &str, model: &str, size: u8, cents: i64) -> CartLine {
        CartLine {
            id,
            user_id: 1,
            brand: brand.to_string(),
            model: model.to_string(),
            size: ShoeSize::new(size).unwrap(),
            price: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_cart_total() {
        let mut cart = Cart::new();
        cart.push(line(1, "Nike", "AirMax", 42, 12000));
        cart.push(line(2, "Adidas", "UltraBoost", 43, 15000));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), Money::from_cents(27000));
    }

    #[test]
    fn test_duplicate_lines_are_separate_purchases() {
        let mut cart = Cart::new();
        cart.push(line(1, "Nike", "AirMax", 42, 12000));
        cart.push(line(2, "Nike", "AirMax", 42, 12000));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), Money::from_cents(24000));
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::from_lines(vec![line(1, "Puma", "Suede", 40, 8000)]);
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_totals_summary() {
        let cart = Cart::from_lines(vec![
            line(1, "Puma", "Suede", 40, 8000),
            line(2, "Vans", "Old Skool", 41, 6500),
        ]);
        let totals = CartTotals::from(&cart);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total.cents(), 14500);
    }
}
