//! # Kicks Storefront
//!
//! Session layer of the Kicks sneaker storefront, plus the `kicks` CLI that
//! drives it.
//!
//! ## Module Organization
//! ```text
//! kicks_storefront/
//! ├── lib.rs          ◄─── You are here (exports, logging setup)
//! ├── session.rs      ◄─── Storefront + Session (user, cart mirror, checkout)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Configuration from environment
//! │   └── theme.rs    ◄─── Theme, Themable surfaces, AppState
//! ├── cli.rs          ◄─── clap commands and the console surface
//! └── error.rs        ◄─── StoreError and user-facing error codes
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use kicks_core::PaymentDetails;
//! use kicks_db::{Database, DbConfig};
//! use kicks_storefront::Storefront;
//!
//! # async fn demo() -> kicks_storefront::StoreResult<()> {
//! let db = Database::new(DbConfig::new("sneakers.db")).await?;
//! let store = Storefront::new(db);
//!
//! let mut session = store.login("alice", "pw1").await?;
//! session.add_item("Nike", "AirMax", "42").await?;
//! let order = session
//!     .checkout(&PaymentDetails::new("4111", "12/30", "123"))
//!     .await?;
//! println!("order {} paid", order.id);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod error;
pub mod session;
pub mod state;

use tracing_subscriber::EnvFilter;

pub use error::{ErrorCode, ErrorResponse, StoreError, StoreResult};
pub use session::{Session, Storefront};
pub use state::{AppState, ConfigState, Themable, Theme};

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=kicks=trace` - Show trace for kicks crates only
/// - Default: `info,kicks=debug,sqlx=warn`
///
/// Calling it twice is harmless; the first subscriber wins.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kicks=debug,sqlx=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
