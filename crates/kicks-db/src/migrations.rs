//! # Database Migrations
//!
//! Embedded SQL migrations for the storefront tables.
//!
//! ## What Migrations Own
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Schema Ownership                                   │
//! │                                                                         │
//! │  migrations/sqlite/001_initial_schema.sql                              │
//! │  ├── users   (id, username UNIQUE, password)                           │
//! │  ├── orders  (id, user_id → users, total_price)                        │
//! │  └── cart    (id, user_id → users, brand, model, size, price)          │
//! │                                                                         │
//! │  NOT owned here:                                                        │
//! │  └── sneakers (brand, model, price)  ← provisioned by kicks-seed        │
//! │                                                                         │
//! │  Applied versions are tracked in `_sqlx_migrations`.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql`
//! 3. **NEVER** modify existing migrations - always add new ones

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// Idempotent: already-applied versions are skipped.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Migration counts for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationStatus {
    pub total: usize,
    pub applied: usize,
}

impl MigrationStatus {
    /// Whether every embedded migration has been applied.
    pub fn is_current(&self) -> bool {
        self.applied >= self.total
    }
}

/// Returns how many embedded migrations exist and how many are applied.
///
/// A database that has never been migrated reports zero applied.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<MigrationStatus> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok(MigrationStatus {
        total,
        applied: applied as usize,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_status_after_migrate() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let status = migration_status(db.pool()).await.unwrap();

        assert!(status.total >= 1);
        assert!(status.is_current());
    }

    #[tokio::test]
    async fn test_status_without_migrate() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();
        let status = migration_status(db.pool()).await.unwrap();

        assert_eq!(status.applied, 0);
        assert!(!status.is_current());
    }

    #[tokio::test]
    async fn test_run_twice_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.run_migrations().await.unwrap();
        assert!(migration_status(db.pool()).await.unwrap().is_current());
    }
}
