//! # Cart Repository
//!
//! Persisted cart lines (`cart` table).
//!
//! Every call commits on its own. Lines are returned in insertion order
//! (`ORDER BY id`) so a reloaded cart renders the same way it was built.

use sqlx::{FromRow, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{money_from_real, money_to_real};
use kicks_core::{CartLine, Money, ShoeSize, UserId};

#[derive(Debug, Clone, FromRow)]
struct CartRow {
    id: i64,
    user_id: i64,
    brand: String,
    model: String,
    size: String,
    price: f64,
}

impl TryFrom<CartRow> for CartLine {
    type Error = DbError;

    fn try_from(row: CartRow) -> Result<Self, Self::Error> {
        let size: ShoeSize = row.size.parse().map_err(|e| {
            DbError::Internal(format!("cart line {} has invalid size: {}", row.id, e))
        })?;

        Ok(CartLine {
            id: row.id,
            user_id: row.user_id,
            brand: row.brand,
            model: row.model,
            size,
            price: money_from_real(row.price)?,
        })
    }
}

/// Loads a user's lines through any executor (pool or open transaction).
pub(crate) async fn lines_for_user<'e, E>(executor: E, user_id: UserId) -> DbResult<Vec<CartLine>>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, CartRow>(
        r#"
        SELECT
            id,
            user_id,
            brand,
            model,
            CAST(size AS TEXT) AS size,
            CAST(price AS REAL) AS price
        FROM cart
        WHERE user_id = ?1
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await?;

    rows.into_iter().map(CartLine::try_from).collect()
}

/// Repository for cart operations.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// All cart lines for a user, oldest first.
    pub async fn get_items(&self, user_id: UserId) -> DbResult<Vec<CartLine>> {
        let lines = lines_for_user(&self.pool, user_id).await?;
        debug!(user_id = user_id, count = lines.len(), "Loaded cart");
        Ok(lines)
    }

    /// Persists one line and returns it with its generated id.
    ///
    /// ## Errors
    /// * `DbError::ForeignKeyViolation` - `user_id` does not exist
    pub async fn add_item(
        &self,
        user_id: UserId,
        brand: &str,
        model: &str,
        size: ShoeSize,
        price: Money,
    ) -> DbResult<CartLine> {
        debug!(user_id = user_id, brand = %brand, model = %model, size = %size, price = %price, "Adding cart line");

        let result = sqlx::query(
            "INSERT INTO cart (user_id, brand, model, size, price) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(user_id)
        .bind(brand)
        .bind(model)
        .bind(size.to_string())
        .bind(money_to_real(price))
        .execute(&self.pool)
        .await?;

        Ok(CartLine {
            id: result.last_insert_rowid(),
            user_id,
            brand: brand.to_string(),
            model: model.to_string(),
            size,
            price,
        })
    }

    /// Deletes every line for a user. Returns how many were removed.
    pub async fn clear(&self, user_id: UserId) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM cart WHERE user_id = ?1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        debug!(user_id = user_id, removed = result.rows_affected(), "Cleared cart");
        Ok(result.rows_affected())
    }

    /// Number of persisted lines for a user.
    pub async fn count(&self, user_id: UserId) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cart WHERE user_id = ?1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn db_with_user() -> (Database, UserId) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let user = db.users().create_user("alice", "pw1").await.unwrap().unwrap();
        (db, user.id)
    }

    fn size(n: u8) -> ShoeSize {
        ShoeSize::new(n).unwrap()
    }

    #[tokio::test]
    async fn test_add_and_read_back() {
        let (db, user_id) = db_with_user().await;
        let cart = db.cart();

        let first = cart
            .add_item(user_id, "Nike", "AirMax", size(42), Money::from_cents(12000))
            .await
            .unwrap();
        cart.add_item(user_id, "Adidas", "UltraBoost", size(43), Money::from_cents(15000))
            .await
            .unwrap();

        let lines = cart.get_items(user_id).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], first);
        assert_eq!(lines[1].size.value(), 43);

        let total: Money = lines.iter().map(|l| l.price).sum();
        assert_eq!(total, Money::from_cents(27000));
    }

    #[tokio::test]
    async fn test_lines_are_per_user() {
        let (db, alice) = db_with_user().await;
        let bob = db.users().create_user("bob", "pw2").await.unwrap().unwrap().id;

        db.cart()
            .add_item(alice, "Nike", "AirMax", size(42), Money::from_cents(12000))
            .await
            .unwrap();

        assert!(db.cart().get_items(bob).await.unwrap().is_empty());
        assert_eq!(db.cart().count(alice).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let (db, user_id) = db_with_user().await;
        for _ in 0..3 {
            db.cart()
                .add_item(user_id, "Nike", "AirMax", size(42), Money::from_cents(12000))
                .await
                .unwrap();
        }

        assert_eq!(db.cart().clear(user_id).await.unwrap(), 3);
        assert!(db.cart().get_items(user_id).await.unwrap().is_empty());
        assert_eq!(db.cart().clear(user_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_user_rejected() {
        let (db, _) = db_with_user().await;
        let err = db
            .cart()
            .add_item(9999, "Nike", "AirMax", size(42), Money::from_cents(12000))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
