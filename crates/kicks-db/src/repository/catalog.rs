//! # Catalog Repository
//!
//! Read access to the `sneakers` reference table.
//!
//! ## Reference Data
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sneakers(brand, model, price)                                          │
//! │                                                                         │
//! │  Nike    │ AirMax      │ 120.00                                         │
//! │  Nike    │ Pegasus     │ 110.00                                         │
//! │  Adidas  │ UltraBoost  │ 150.00                                         │
//! │                                                                         │
//! │  • Seeded externally (kicks-seed); migrations never create it          │
//! │  • Missing table → empty brand/model lists and no price, not an error  │
//! │  • Rows with a NULL brand, model or price are skipped                  │
//! │  • Size is not part of the catalog                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{money_from_real, money_to_real};
use kicks_core::{CatalogEntry, Money};

#[derive(Debug, Clone, FromRow)]
struct CatalogRow {
    brand: String,
    model: String,
    price: f64,
}

impl TryFrom<CatalogRow> for CatalogEntry {
    type Error = DbError;

    fn try_from(row: CatalogRow) -> Result<Self, Self::Error> {
        Ok(CatalogEntry {
            brand: row.brand,
            model: row.model,
            price: money_from_real(row.price)?,
        })
    }
}

/// Repository for the sneaker catalog.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Whether the `sneakers` table has been provisioned.
    pub async fn is_available(&self) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'sneakers'",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Distinct brands, alphabetically.
    pub async fn all_brands(&self) -> DbResult<Vec<String>> {
        if !self.is_available().await? {
            debug!("Catalog table missing, no brands");
            return Ok(Vec::new());
        }

        let brands: Vec<String> =
            sqlx::query_scalar(
                "SELECT DISTINCT brand FROM sneakers WHERE brand IS NOT NULL ORDER BY brand",
            )
                .fetch_all(&self.pool)
                .await?;

        debug!(count = brands.len(), "Loaded brands");
        Ok(brands)
    }

    /// Models of a brand in catalog order. Unknown brand → empty.
    pub async fn models_by_brand(&self, brand: &str) -> DbResult<Vec<String>> {
        if !self.is_available().await? {
            return Ok(Vec::new());
        }

        let models: Vec<String> = sqlx::query_scalar(
            "SELECT model FROM sneakers WHERE brand = ?1 AND model IS NOT NULL ORDER BY rowid",
        )
        .bind(brand)
        .fetch_all(&self.pool)
        .await?;

        debug!(brand = %brand, count = models.len(), "Loaded models");
        Ok(models)
    }

    /// Catalog price for a brand/model pair.
    ///
    /// ## Returns
    /// * `Ok(Some(Money))` - Pair is in the catalog
    /// * `Ok(None)` - Unknown pair, pair without a price, or the catalog is
    ///   not provisioned
    /// * `Err(DbError::Internal)` - Stored price is not a representable amount
    pub async fn price(&self, brand: &str, model: &str) -> DbResult<Option<Money>> {
        if !self.is_available().await? {
            return Ok(None);
        }

        let price: Option<f64> = sqlx::query_scalar(
            r#"
            SELECT CAST(price AS REAL) FROM sneakers
            WHERE brand = ?1 AND model = ?2 AND price IS NOT NULL
            LIMIT 1
            "#,
        )
        .bind(brand)
        .bind(model)
        .fetch_optional(&self.pool)
        .await?;

        debug!(brand = %brand, model = %model, found = price.is_some(), "Price lookup");
        price.map(money_from_real).transpose()
    }

    /// Every catalog entry, ordered by brand then catalog order.
    pub async fn entries(&self) -> DbResult<Vec<CatalogEntry>> {
        if !self.is_available().await? {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, CatalogRow>(
            r#"
            SELECT brand, model, CAST(price AS REAL) AS price
            FROM sneakers
            WHERE brand IS NOT NULL AND model IS NOT NULL AND price IS NOT NULL
            ORDER BY brand, rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CatalogEntry::try_from).collect()
    }

    // =========================================================================
    // Provisioning (seed tool only)
    // =========================================================================

    /// Creates the `sneakers` table if it does not exist.
    pub async fn ensure_table(&self) -> DbResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sneakers (
                brand   TEXT NOT NULL,
                model   TEXT NOT NULL,
                price   REAL NOT NULL,
                UNIQUE (brand, model)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Inserts an entry, or updates the price of an existing brand/model.
    pub async fn upsert(&self, entry: &CatalogEntry) -> DbResult<()> {
        debug!(brand = %entry.brand, model = %entry.model, price = %entry.price, "Upserting catalog entry");

        sqlx::query(
            r#"
            INSERT INTO sneakers (brand, model, price) VALUES (?1, ?2, ?3)
            ON CONFLICT (brand, model) DO UPDATE SET price = excluded.price
            "#,
        )
        .bind(&entry.brand)
        .bind(&entry.model)
        .bind(money_to_real(entry.price))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn entry(brand: &str, model: &str, cents: i64) -> CatalogEntry {
        CatalogEntry {
            brand: brand.to_string(),
            model: model.to_string(),
            price: Money::from_cents(cents),
        }
    }

    async fn seeded() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let catalog = db.catalog();
        catalog.ensure_table().await.unwrap();
        for e in [
            entry("Nike", "AirMax", 12000),
            entry("Adidas", "UltraBoost", 15000),
            entry("Nike", "Pegasus", 11000),
        ] {
            catalog.upsert(&e).await.unwrap();
        }
        db
    }

    #[tokio::test]
    async fn test_missing_table_is_empty_not_error() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let catalog = db.catalog();

        assert!(!catalog.is_available().await.unwrap());
        assert!(catalog.all_brands().await.unwrap().is_empty());
        assert!(catalog.models_by_brand("Nike").await.unwrap().is_empty());
        assert_eq!(catalog.price("Nike", "AirMax").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_brands_sorted_and_distinct() {
        let db = seeded().await;
        assert_eq!(db.catalog().all_brands().await.unwrap(), vec!["Adidas", "Nike"]);
    }

    #[tokio::test]
    async fn test_models_by_brand() {
        let db = seeded().await;
        assert_eq!(
            db.catalog().models_by_brand("Nike").await.unwrap(),
            vec!["AirMax", "Pegasus"]
        );
        assert!(db.catalog().models_by_brand("Reebok").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_price_lookup() {
        let db = seeded().await;
        let catalog = db.catalog();

        assert_eq!(
            catalog.price("Adidas", "UltraBoost").await.unwrap(),
            Some(Money::from_cents(15000))
        );
        // model belongs to another brand
        assert_eq!(catalog.price("Adidas", "AirMax").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_upsert_updates_price() {
        let db = seeded().await;
        db.catalog().upsert(&entry("Nike", "AirMax", 9999)).await.unwrap();

        assert_eq!(
            db.catalog().price("Nike", "AirMax").await.unwrap(),
            Some(Money::from_cents(9999))
        );
        assert_eq!(db.catalog().entries().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_integer_prices_from_external_seed() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query("CREATE TABLE sneakers (brand TEXT, model TEXT, price)")
            .execute(db.pool())
            .await
            .unwrap();
        sqlx::query("INSERT INTO sneakers VALUES ('Puma', 'Suede', 80)")
            .execute(db.pool())
            .await
            .unwrap();

        assert_eq!(
            db.catalog().price("Puma", "Suede").await.unwrap(),
            Some(Money::from_cents(8000))
        );
    }

    async fn external_catalog(rows: &str) -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query("CREATE TABLE sneakers (brand TEXT, model TEXT, price)")
            .execute(db.pool())
            .await
            .unwrap();
        sqlx::query(&format!("INSERT INTO sneakers VALUES {rows}"))
            .execute(db.pool())
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_null_columns_from_external_seed_are_skipped() {
        let db = external_catalog(
            "('Nike', 'AirMax', NULL), (NULL, 'Ghost', 90), ('Nike', NULL, 70), ('Nike', 'Pegasus', 110)",
        )
        .await;
        let catalog = db.catalog();

        assert_eq!(catalog.price("Nike", "AirMax").await.unwrap(), None);
        assert_eq!(catalog.all_brands().await.unwrap(), vec!["Nike"]);
        assert_eq!(
            catalog.models_by_brand("Nike").await.unwrap(),
            vec!["AirMax", "Pegasus"]
        );

        let entries = catalog.entries().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].price, Money::from_cents(11000));
    }

    #[tokio::test]
    async fn test_unrepresentable_price_is_error() {
        let db = external_catalog("('Nike', 'Gold', 1e18)").await;

        let err = db.catalog().price("Nike", "Gold").await.unwrap_err();
        assert!(matches!(err, DbError::Internal(_)));
        assert!(db.catalog().entries().await.is_err());
    }
}
