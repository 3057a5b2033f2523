//! # Session/Cart Manager
//!
//! Binds one authenticated user to an in-memory mirror of their cart and
//! mediates every store call a presentation surface makes.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Lifecycle                                    │
//! │                                                                         │
//! │  ┌───────────┐  register/login  ┌───────────────┐                      │
//! │  │ Anonymous │ ───────────────► │ Authenticated │ ◄──────────┐         │
//! │  │ (no value)│   load_cart()    │ cart = loaded │            │         │
//! │  └───────────┘                  └───────┬───────┘            │         │
//! │                                         │ add_item()*        │         │
//! │                                         ▼                    │         │
//! │                                 ┌───────────────┐            │         │
//! │                                 │   Checkout    │ ── Order ──┘         │
//! │                                 │  (payment)    │   cart = empty       │
//! │                                 └───────────────┘                      │
//! │                                                                         │
//! │  A `Session` exists only after successful authentication, so no        │
//! │  cart or order operation can run without a user.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Store-first Updates
//! Every mutation writes to the store first and updates the mirror only
//! after the write committed. A failed write leaves the mirror unchanged.
//!
//! ## Concurrent Sessions
//! Two sessions for the same user each keep their own mirror. They are not
//! synchronized: after one session checks out, the other's mirror may still
//! show lines that are no longer persisted until it calls
//! [`Session::load_cart`].

use uuid::Uuid;

use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use kicks_core::validation::{
    validate_password, validate_payment, validate_selection, validate_username,
};
use kicks_core::{
    Cart, CartLine, CartTotals, CoreError, Money, Order, PaymentDetails, ShoeSize, User,
};
use kicks_db::Database;

// =============================================================================
// Storefront (anonymous entry point)
// =============================================================================

/// Entry point for anonymous users: catalog browsing and authentication.
#[derive(Debug, Clone)]
pub struct Storefront {
    db: Database,
}

impl Storefront {
    pub fn new(db: Database) -> Self {
        Storefront { db }
    }

    /// The underlying store handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Registers a new user and opens a session for them.
    ///
    /// ## Errors
    /// * `Validation` - blank username or password, or username too long
    /// * `UsernameTaken` - the username already exists; nothing was written
    #[tracing::instrument(name = "storefront.register", skip(self, password), err)]
    pub async fn register(&self, username: &str, password: &str) -> StoreResult<Session> {
        let username = validate_username(username)?;
        let password = validate_password(password)?;

        let user = self
            .db
            .users()
            .create_user(&username, password)
            .await?
            .ok_or_else(|| CoreError::UsernameTaken(username.clone()))?;

        Session::open(self.db.clone(), user).await
    }

    /// Authenticates and opens a session with the persisted cart loaded.
    ///
    /// Username and password are trimmed, as on registration.
    ///
    /// ## Errors
    /// * `InvalidCredentials` - unknown username or wrong password
    #[tracing::instrument(name = "storefront.login", skip(self, password), err)]
    pub async fn login(&self, username: &str, password: &str) -> StoreResult<Session> {
        let user = self
            .db
            .users()
            .authenticate(username.trim(), password.trim())
            .await?
            .ok_or(CoreError::InvalidCredentials)?;

        Session::open(self.db.clone(), user).await
    }

    /// Catalog brands, alphabetically. Empty if the catalog is not seeded.
    pub async fn brands(&self) -> StoreResult<Vec<String>> {
        Ok(self.db.catalog().all_brands().await?)
    }

    /// Models of a brand. Empty for an unknown brand.
    pub async fn models(&self, brand: &str) -> StoreResult<Vec<String>> {
        Ok(self.db.catalog().models_by_brand(brand).await?)
    }

    /// Every selectable shoe size.
    pub fn sizes(&self) -> Vec<ShoeSize> {
        ShoeSize::all().collect()
    }
}

// =============================================================================
// Session (authenticated)
// =============================================================================

/// An authenticated user's session.
///
/// Not `Clone`: the cart mirror has exactly one owner.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    db: Database,
    user: User,
    cart: Cart,
}

impl Session {
    async fn open(db: Database, user: User) -> StoreResult<Self> {
        let mut session = Session {
            id: Uuid::new_v4(),
            db,
            user,
            cart: Cart::new(),
        };
        session.load_cart().await?;

        info!(
            session_id = %session.id,
            user_id = session.user.id,
            lines = session.cart.len(),
            "Session opened"
        );
        Ok(session)
    }

    /// Identifier used to correlate this session's log lines.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// The in-memory cart mirror.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Cart lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Sum of the in-memory line prices.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(&self.cart)
    }

    /// Replaces the mirror with the persisted cart.
    #[tracing::instrument(
        name = "session.load_cart",
        skip(self),
        fields(session_id = %self.id, user_id = self.user.id)
    )]
    pub async fn load_cart(&mut self) -> StoreResult<()> {
        let lines = self.db.cart().get_items(self.user.id).await?;
        debug!(lines = lines.len(), "Cart loaded");
        self.cart = Cart::from_lines(lines);
        Ok(())
    }

    /// Adds one selection to the cart at the catalog price.
    ///
    /// ## Errors
    /// * `SelectionIncomplete` - brand, model or size left blank
    /// * `Validation` - size not a number in 36..=46
    /// * `PriceNotFound` - brand/model pair not in the catalog
    #[tracing::instrument(
        name = "session.add_item",
        skip(self),
        fields(session_id = %self.id, user_id = self.user.id),
        err
    )]
    pub async fn add_item(&mut self, brand: &str, model: &str, size: &str) -> StoreResult<CartLine> {
        let selection = validate_selection(brand, model, size)?;

        let price = self
            .db
            .catalog()
            .price(&selection.brand, &selection.model)
            .await?
            .ok_or_else(|| CoreError::PriceNotFound {
                brand: selection.brand.clone(),
                model: selection.model.clone(),
            })?;

        let line = self
            .db
            .cart()
            .add_item(
                self.user.id,
                &selection.brand,
                &selection.model,
                selection.size,
                price,
            )
            .await?;

        self.cart.push(line.clone());
        debug!(line_id = line.id, total = %self.cart.total(), "Line added");
        Ok(line)
    }

    /// Pays for the cart.
    ///
    /// Payment fields and the in-memory cart are checked before the store is
    /// touched. The store then creates the order and clears the persisted
    /// cart in one transaction; the order total is the sum of the lines the
    /// store actually held.
    ///
    /// ## Errors
    /// * `PaymentFieldsEmpty` - card number, expiry or CVC blank
    /// * `CartEmpty` - nothing to pay for (also when another session already
    ///   checked out these lines; the mirror is reloaded in that case)
    #[tracing::instrument(
        name = "session.checkout",
        skip(self, payment),
        fields(session_id = %self.id, user_id = self.user.id),
        err
    )]
    pub async fn checkout(&mut self, payment: &PaymentDetails) -> StoreResult<Order> {
        validate_payment(payment)?;

        if self.cart.is_empty() {
            return Err(CoreError::CartEmpty.into());
        }

        match self.db.orders().checkout(self.user.id).await? {
            Some(order) => {
                if order.total_price != self.cart.total() {
                    debug!(
                        mirror = %self.cart.total(),
                        persisted = %order.total_price,
                        "Cart mirror was stale at checkout"
                    );
                }
                self.cart.clear();
                info!(order_id = order.id, total = %order.total_price, "Order created");
                Ok(order)
            }
            None => {
                self.load_cart().await?;
                Err(StoreError::from(CoreError::CartEmpty))
            }
        }
    }

    /// The user's order history, oldest first.
    pub async fn orders(&self) -> StoreResult<Vec<Order>> {
        Ok(self.db.orders().for_user(self.user.id).await?)
    }

    /// Catalog brands, alphabetically.
    pub async fn brands(&self) -> StoreResult<Vec<String>> {
        Ok(self.db.catalog().all_brands().await?)
    }

    /// Models of a brand.
    pub async fn models(&self, brand: &str) -> StoreResult<Vec<String>> {
        Ok(self.db.catalog().models_by_brand(brand).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kicks_core::{CatalogEntry, ValidationError};
    use kicks_db::{DbConfig, DbError};

    async fn storefront() -> Storefront {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let catalog = db.catalog();
        catalog.ensure_table().await.unwrap();
        for (brand, model, cents) in [("Nike", "AirMax", 12000), ("Adidas", "UltraBoost", 15000)] {
            catalog
                .upsert(&CatalogEntry {
                    brand: brand.to_string(),
                    model: model.to_string(),
                    price: Money::from_cents(cents),
                })
                .await
                .unwrap();
        }
        Storefront::new(db)
    }

    fn card() -> PaymentDetails {
        PaymentDetails::new("4111 1111 1111 1111", "12/29", "123")
    }

    #[tokio::test]
    async fn test_register_blank_is_validation_error() {
        let store = storefront().await;

        let err = store.register("  ", "pw1").await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::Validation(ValidationError::Required { .. }))
        ));

        let err = store.register("alice", "").await.unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::Validation(_))));
        assert_eq!(store.database().users().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_register_taken() {
        let store = storefront().await;
        store.register("alice", "pw1").await.unwrap();

        let err = store.register("alice", "pw2").await.unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::UsernameTaken(ref name)) if name == "alice"));
    }

    #[tokio::test]
    async fn test_login_bad_credentials() {
        let store = storefront().await;
        store.register("alice", "pw1").await.unwrap();

        assert!(matches!(
            store.login("alice", "wrong").await.unwrap_err(),
            StoreError::Core(CoreError::InvalidCredentials)
        ));
        assert!(matches!(
            store.login("nobody", "pw1").await.unwrap_err(),
            StoreError::Core(CoreError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_login_loads_persisted_cart() {
        let store = storefront().await;
        let mut first = store.register("alice", "pw1").await.unwrap();
        first.add_item("Nike", "AirMax", "42").await.unwrap();

        let second = store.login("alice", "pw1").await.unwrap();
        assert_eq!(second.lines().len(), 1);
        assert_eq!(second.total(), Money::from_cents(12000));
        assert_ne!(first.id(), second.id());
    }

    #[tokio::test]
    async fn test_add_item_signals() {
        let store = storefront().await;
        let mut session = store.register("alice", "pw1").await.unwrap();

        assert!(matches!(
            session.add_item("", "AirMax", "42").await.unwrap_err(),
            StoreError::Core(CoreError::SelectionIncomplete)
        ));
        assert!(matches!(
            session.add_item("Nike", "AirMax", "50").await.unwrap_err(),
            StoreError::Core(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert!(matches!(
            session.add_item("Nike", "UltraBoost", "42").await.unwrap_err(),
            StoreError::Core(CoreError::PriceNotFound { .. })
        ));

        assert!(session.cart().is_empty());
        assert_eq!(store.database().cart().count(session.user().id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_checkout_signals_before_store() {
        let store = storefront().await;
        let mut session = store.register("alice", "pw1").await.unwrap();

        // blank payment wins over an empty cart
        let err = session
            .checkout(&PaymentDetails::new("", "12/29", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::PaymentFieldsEmpty { .. })));

        let err = session.checkout(&card()).await.unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::CartEmpty)));

        session.add_item("Nike", "AirMax", "42").await.unwrap();
        let err = session
            .checkout(&PaymentDetails::new("4111", "  ", "123"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::PaymentFieldsEmpty { .. })));

        assert!(session.orders().await.unwrap().is_empty());
        assert_eq!(session.lines().len(), 1);
    }

    #[tokio::test]
    async fn test_checkout_clears_mirror_and_store() {
        let store = storefront().await;
        let mut session = store.register("alice", "pw1").await.unwrap();
        session.add_item("Nike", "AirMax", "42").await.unwrap();
        session.add_item("Adidas", "UltraBoost", "43").await.unwrap();

        let order = session.checkout(&card()).await.unwrap();

        assert_eq!(order.total_price, Money::from_cents(27000));
        assert!(session.cart().is_empty());
        assert_eq!(session.total(), Money::zero());
        assert_eq!(session.orders().await.unwrap(), vec![order]);
    }

    #[tokio::test]
    async fn test_catalog_helpers() {
        let store = storefront().await;
        let session = store.register("alice", "pw1").await.unwrap();

        assert_eq!(store.brands().await.unwrap(), vec!["Adidas", "Nike"]);
        assert_eq!(session.models("Nike").await.unwrap(), vec!["AirMax"]);
        assert_eq!(store.sizes().len(), 11);
    }

    #[tokio::test]
    async fn test_password_whitespace_is_trimmed() {
        let store = storefront().await;
        store.register("alice", " pw1 ").await.unwrap();

        let session = store.login(" alice ", "pw1").await.unwrap();
        assert_eq!(session.user().username, "alice");
        store.login("alice", "\tpw1\n").await.unwrap();
        assert!(store.login("alice", "pw 1").await.is_err());
    }

    #[tokio::test]
    async fn test_unrepresentable_catalog_price_is_store_error() {
        let store = storefront().await;
        store
            .database()
            .catalog()
            .upsert(&CatalogEntry {
                brand: "Nike".to_string(),
                model: "Gold".to_string(),
                price: Money::from_cents(i64::MAX),
            })
            .await
            .unwrap();
        let mut session = store.register("alice", "pw1").await.unwrap();

        let err = session.add_item("Nike", "Gold", "42").await.unwrap_err();
        assert!(matches!(err, StoreError::Database(DbError::Internal(_))));
        assert!(session.cart().is_empty());
        assert_eq!(session.total(), Money::zero());
    }
}
