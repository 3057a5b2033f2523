//! # User Repository
//!
//! Registration and authentication against the `users` table.
//!
//! ## Registration
//! ```text
//! register_user("alice", "pw1")
//!      │
//!      ├── hash_password("pw1") → "$argon2id$v=19$..."
//!      │
//!      ▼
//! INSERT INTO users (username, password)
//!      │
//!      ├── OK ─────────────────────────────► true   (committed)
//!      └── UNIQUE constraint failed ───────► false  (nothing written)
//! ```
//!
//! Authentication looks the user up by username only and verifies the
//! password in Rust; the hash never leaves this module.

use sqlx::{FromRow, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::password::{hash_password, verify_password};
use kicks_core::{User, UserId};

/// Column that enforces username uniqueness.
const USERNAME_UNIQUE: &str = "users.username";

/// Raw `users` row, including the stored hash.
#[derive(Debug, Clone, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
        }
    }
}

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new user and returns it.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - Created and committed
    /// * `Ok(None)` - Username already exists; nothing was written
    /// * `Err(DbError)` - Any other storage failure
    pub async fn create_user(&self, username: &str, password: &str) -> DbResult<Option<User>> {
        debug!(username = %username, "Registering user");

        let hash = hash_password(password)?;

        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?1, ?2)")
            .bind(username)
            .bind(&hash)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => {
                let user = User {
                    id: done.last_insert_rowid(),
                    username: username.to_string(),
                };
                info!(user_id = user.id, username = %username, "User registered");
                Ok(Some(user))
            }
            Err(err) => {
                let err = DbError::from(err);
                if err.is_unique_violation_on(USERNAME_UNIQUE) {
                    debug!(username = %username, "Username already taken");
                    Ok(None)
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Registers a user, reporting only whether it succeeded.
    ///
    /// `false` means the username was taken and state is unchanged.
    pub async fn register_user(&self, username: &str, password: &str) -> DbResult<bool> {
        Ok(self.create_user(username, password).await?.is_some())
    }

    /// Verifies credentials.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - Username exists and the password matches
    /// * `Ok(None)` - Unknown username, wrong password, or a stored hash that
    ///   cannot be parsed (logged)
    pub async fn authenticate(&self, username: &str, password: &str) -> DbResult<Option<User>> {
        debug!(username = %username, "Authenticating user");

        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password FROM users WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            warn!(username = %username, "Authentication failed: unknown user");
            return Ok(None);
        };

        match verify_password(password, &row.password) {
            Ok(true) => Ok(Some(row.into())),
            Ok(false) => {
                warn!(username = %username, "Authentication failed: wrong password");
                Ok(None)
            }
            Err(err) => {
                warn!(user_id = row.id, error = %err, "Stored password hash is malformed");
                Ok(None)
            }
        }
    }

    /// Gets a user by id.
    pub async fn get_by_id(&self, id: UserId) -> DbResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password FROM users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// Gets a user by username.
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password FROM users WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// Counts registered users (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_register_twice() {
        let db = db().await;
        let users = db.users();

        assert!(users.register_user("alice", "pw1").await.unwrap());
        assert!(!users.register_user("alice", "other").await.unwrap());
        assert_eq!(users.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_returns_id() {
        let db = db().await;
        let alice = db.users().create_user("alice", "pw1").await.unwrap().unwrap();
        let bob = db.users().create_user("bob", "pw2").await.unwrap().unwrap();

        assert_ne!(alice.id, bob.id);
        assert_eq!(db.users().get_by_id(bob.id).await.unwrap(), Some(bob));
    }

    #[tokio::test]
    async fn test_authenticate() {
        let db = db().await;
        let created = db.users().create_user("alice", "pw1").await.unwrap().unwrap();

        let user = db.users().authenticate("alice", "pw1").await.unwrap();
        assert_eq!(user.map(|u| u.id), Some(created.id));

        assert!(db.users().authenticate("alice", "nope").await.unwrap().is_none());
        assert!(db.users().authenticate("mallory", "pw1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_password_not_stored_in_plaintext() {
        let db = db().await;
        db.users().register_user("alice", "pw1").await.unwrap();

        let stored: String = sqlx::query_scalar("SELECT password FROM users WHERE username = 'alice'")
            .fetch_one(db.pool())
            .await
            .unwrap();

        assert_ne!(stored, "pw1");
        assert!(stored.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_malformed_hash_rejects_login() {
        let db = db().await;
        sqlx::query("INSERT INTO users (username, password) VALUES ('legacy', 'pw1')")
            .execute(db.pool())
            .await
            .unwrap();

        assert!(db.users().authenticate("legacy", "pw1").await.unwrap().is_none());
    }
}
