//! # Order Repository
//!
//! Order history and the transactional checkout.
//!
//! ## Checkout Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    checkout(user_id)                                    │
//! │                                                                         │
//! │  BEGIN IMMEDIATE (write lock taken up front, waits on busy_timeout)    │
//! │    │                                                                    │
//! │    ├── SELECT cart lines for user ──► none? ──► ROLLBACK, return None  │
//! │    │                                                                    │
//! │    ├── total = Σ line.price (cents)                                    │
//! │    ├── INSERT INTO orders (user_id, total_price)                       │
//! │    └── DELETE FROM cart WHERE user_id = ?                              │
//! │    │                                                                    │
//! │  COMMIT ──► Some(Order)                                                │
//! │                                                                         │
//! │  Lines added by another session before BEGIN are included; lines      │
//! │  added after COMMIT stay in the cart. Nothing is lost in between.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{FromRow, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::cart::lines_for_user;
use crate::repository::{money_from_real, money_to_real};
use kicks_core::{Money, Order, UserId};

#[derive(Debug, Clone, FromRow)]
struct OrderRow {
    id: i64,
    user_id: i64,
    total_price: f64,
}

impl TryFrom<OrderRow> for Order {
    type Error = DbError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            id: row.id,
            user_id: row.user_id,
            total_price: money_from_real(row.total_price)?,
        })
    }
}

/// Repository for order operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts one order row with the given total.
    ///
    /// Does not touch the cart; see [`OrderRepository::checkout`] for the
    /// combined operation.
    pub async fn create(&self, user_id: UserId, total_price: Money) -> DbResult<Order> {
        debug!(user_id = user_id, total = %total_price, "Creating order");

        let result = sqlx::query("INSERT INTO orders (user_id, total_price) VALUES (?1, ?2)")
            .bind(user_id)
            .bind(money_to_real(total_price))
            .execute(&self.pool)
            .await?;

        Ok(Order {
            id: result.last_insert_rowid(),
            user_id,
            total_price,
        })
    }

    /// Order history for a user, oldest first. No orders → empty.
    pub async fn for_user(&self, user_id: UserId) -> DbResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, CAST(total_price AS REAL) AS total_price
            FROM orders
            WHERE user_id = ?1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(user_id = user_id, count = rows.len(), "Loaded order history");
        rows.into_iter().map(Order::try_from).collect()
    }

    /// Turns the persisted cart into an order in one transaction.
    ///
    /// The transaction takes the write lock before reading, so a concurrent
    /// writer makes this wait up to the busy timeout instead of failing on a
    /// stale snapshot.
    ///
    /// ## Returns
    /// * `Ok(Some(Order))` - Order created, cart emptied, both committed
    /// * `Ok(None)` - Persisted cart was empty; nothing changed
    pub async fn checkout(&self, user_id: UserId) -> DbResult<Option<Order>> {
        let mut tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let lines = lines_for_user(&mut *tx, user_id).await?;
        if lines.is_empty() {
            debug!(user_id = user_id, "Checkout with empty persisted cart");
            tx.rollback()
                .await
                .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
            return Ok(None);
        }

        let total: Money = lines.iter().map(|line| line.price).sum();

        let inserted = sqlx::query("INSERT INTO orders (user_id, total_price) VALUES (?1, ?2)")
            .bind(user_id)
            .bind(money_to_real(total))
            .execute(&mut *tx)
            .await?;

        let cleared = sqlx::query("DELETE FROM cart WHERE user_id = ?1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let order = Order {
            id: inserted.last_insert_rowid(),
            user_id,
            total_price: total,
        };

        info!(
            order_id = order.id,
            user_id = user_id,
            lines = cleared.rows_affected(),
            total = %total,
            "Checkout committed"
        );

        Ok(Some(order))
    }
}
