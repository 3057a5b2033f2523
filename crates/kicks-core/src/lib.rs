//! # kicks-core: Pure Domain Logic for the Kicks Storefront
//!
//! This crate holds the domain model of the storefront as plain data and pure
//! functions. Persistence lives in `kicks-db`, sessions in `kicks-storefront`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Kicks Storefront Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation layer (GUI / CLI)                     │   │
//! │  │    Login ──► Browse ──► Cart ──► Payment ──► Order history      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            Session/Cart Manager (kicks-storefront)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kicks-core (THIS CRATE) ★                       │   │
//! │  │   types: User, CatalogEntry, CartLine, Order, ShoeSize          │   │
//! │  │   money: Money        cart: Cart        validation: rules       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          kicks-db (Catalog & Account Store, SQLite)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, CatalogEntry, CartLine, Order, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - In-memory cart mirror and its totals
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation (credentials, selections, payment)
//!
//! ## Example Usage
//!
//! ```rust
//! use kicks_core::{Cart, CartLine, Money, ShoeSize};
//!
//! let mut cart = Cart::new();
//! cart.push(CartLine {
//!     id: 1,
//!     user_id: 7,
//!     brand: "Nike".to_string(),
//!     model: "AirMax".to_string(),
//!     size: ShoeSize::new(42).unwrap(),
//!     price: Money::from_cents(12000),
//! });
//!
//! assert_eq!(cart.total().to_string(), "$120.00");
//! ```

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use cart::{Cart, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

/// Smallest shoe size offered by the storefront (EU sizing).
pub const MIN_SHOE_SIZE: u8 = 36;

/// Largest shoe size offered by the storefront (EU sizing).
pub const MAX_SHOE_SIZE: u8 = 46;

/// Maximum accepted username length in characters.
pub const MAX_USERNAME_LEN: usize = 64;
