//! # kicks-db: Catalog & Account Store
//!
//! Persistent state for the Kicks storefront: users, the sneaker catalog,
//! cart lines and orders, in one local SQLite file.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kicks Data Flow                                  │
//! │                                                                         │
//! │  Session (kicks-storefront)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     kicks-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ UserRepo      │    │ 001_initial  │  │   │
//! │  │   │ SqlitePool    │◄───│ CatalogRepo   │    │ _schema.sql  │  │   │
//! │  │   │ WAL + FKs     │    │ CartRepo      │    │              │  │   │
//! │  │   │ busy timeout  │    │ OrderRepo     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sneakers.db (users, cart, orders + seeded sneakers)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`password`] - Argon2id password hashing
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kicks_db::{Database, DbConfig};
//!
//! # async fn run() -> kicks_db::DbResult<()> {
//! let db = Database::new(DbConfig::new("sneakers.db")).await?;
//!
//! if db.users().register_user("alice", "pw1").await? {
//!     let alice = db.users().authenticate("alice", "pw1").await?;
//!     assert!(alice.is_some());
//! }
//!
//! let brands = db.catalog().all_brands().await?;
//! # let _ = brands;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod password;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use migrations::MigrationStatus;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::cart::CartRepository;
pub use repository::catalog::CatalogRepository;
pub use repository::order::OrderRepository;
pub use repository::user::UserRepository;
