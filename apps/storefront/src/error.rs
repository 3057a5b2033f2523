//! # Store Error Type
//!
//! Unified error type returned by the session layer to presentation surfaces.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Presentation surface            Session layer                          │
//! │  ────────────────────            ─────────────                          │
//! │                                                                         │
//! │  session.add_item("Nike", "Cortez", "42")                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Result<T, StoreError>                                           │  │
//! │  │         │                                                        │  │
//! │  │  Signaled condition? ── CoreError::PriceNotFound ─┐              │  │
//! │  │         │                                         ▼              │  │
//! │  │  Storage failure? ───── DbError::QueryFailed ── StoreError ─────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  err.code()          → PRICE_NOT_FOUND        (branch on this)         │
//! │  err.user_message()  → "Price not found for Nike Cortez"               │
//! │                                                                         │
//! │  Storage failures never leak SQL text into user_message(); the detail  │
//! │  is logged at ERROR instead.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;
use tracing::error;

use kicks_core::CoreError;
use kicks_db::DbError;

/// Error returned from every session operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A condition the user must see (bad input, empty cart, ...).
    /// Nothing was written to the store.
    #[error(transparent)]
    Core(CoreError),

    /// The store failed. Not retried.
    #[error(transparent)]
    Database(DbError),
}

/// Result type for session operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Machine-readable error codes.
///
/// ## Serialization
/// ```json
/// { "code": "CART_EMPTY", "message": "Cart is empty" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    UsernameTaken,
    InvalidCredentials,
    SelectionIncomplete,
    PriceNotFound,
    CartEmpty,
    PaymentFieldsEmpty,

    /// Input validation failed
    ValidationError,

    /// Database operation failed
    DatabaseError,
}

/// Serializable error body for JSON output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

impl StoreError {
    /// The machine-readable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::Core(err) => match err {
                CoreError::UsernameTaken(_) => ErrorCode::UsernameTaken,
                CoreError::InvalidCredentials => ErrorCode::InvalidCredentials,
                CoreError::SelectionIncomplete => ErrorCode::SelectionIncomplete,
                CoreError::PriceNotFound { .. } => ErrorCode::PriceNotFound,
                CoreError::CartEmpty => ErrorCode::CartEmpty,
                CoreError::PaymentFieldsEmpty { .. } => ErrorCode::PaymentFieldsEmpty,
                CoreError::Validation(_) => ErrorCode::ValidationError,
            },
            StoreError::Database(_) => ErrorCode::DatabaseError,
        }
    }

    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Core(CoreError::Validation(e)) => e.to_string(),
            StoreError::Core(err) => err.to_string(),
            StoreError::Database(err) => match err {
                DbError::ConnectionFailed(_) => "Database connection failed".to_string(),
                DbError::MigrationFailed(_) => "Database migration failed".to_string(),
                DbError::PoolExhausted => "Database is busy, please try again".to_string(),
                _ => "Database operation failed".to_string(),
            },
        }
    }

    /// Whether the error is a signaled condition rather than a failure.
    pub fn is_user_error(&self) -> bool {
        matches!(self, StoreError::Core(_))
    }

    /// Serializable form for JSON output.
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code(),
            message: self.user_message(),
        }
    }
}

impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        StoreError::Core(err)
    }
}

impl From<kicks_core::ValidationError> for StoreError {
    fn from(err: kicks_core::ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

/// Converts database errors, logging the detail that the user won't see.
impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match &err {
            DbError::QueryFailed(e) | DbError::Internal(e) => {
                error!("Database operation failed: {}", e)
            }
            DbError::TransactionFailed(e) => error!("Transaction failed: {}", e),
            DbError::ForeignKeyViolation { message } => {
                error!("Foreign key violation: {}", message)
            }
            other => error!("Database error: {}", other),
        }
        StoreError::Database(err)
    }
}
