//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (applied by the CLI on top of this)
//! 2. Environment variables (`KICKS_*`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only after initialization. The live theme is held
//! by [`AppState`](super::AppState), which starts from `ConfigState::theme`.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

use super::theme::Theme;

/// Database file name inside the data directory.
pub const DATABASE_FILE_NAME: &str = "sneakers.db";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// SQLite database file.
    pub database_path: PathBuf,

    /// Theme applied to surfaces at startup.
    pub theme: Theme,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Database: platform data dir, `sneakers.db`
    /// - Theme: light
    /// - Currency: `$`, two decimals
    fn default() -> Self {
        ConfigState {
            database_path: default_database_path(),
            theme: Theme::default(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `KICKS_DB_PATH`: database file
    /// - `KICKS_THEME`: `light` or `dark`
    /// - `KICKS_CURRENCY_SYMBOL`: e.g. `€`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(path) = lookup("KICKS_DB_PATH").filter(|p| !p.trim().is_empty()) {
            config.database_path = PathBuf::from(path);
        }

        if let Some(theme) = lookup("KICKS_THEME") {
            match theme.parse::<Theme>() {
                Ok(theme) => config.theme = theme,
                Err(e) => warn!(value = %theme, "Ignoring KICKS_THEME: {}", e),
            }
        }

        if let Some(symbol) = lookup("KICKS_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        config
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use kicks_storefront::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(27000), "$270.00");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

/// Determines the default database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.kicks.storefront/sneakers.db`
/// - **Windows**: `%APPDATA%\kicks\storefront\data\sneakers.db`
/// - **Linux**: `~/.local/share/storefront/sneakers.db`
///
/// Falls back to the working directory when no home directory is known.
pub fn default_database_path() -> PathBuf {
    match ProjectDirs::from("com", "kicks", "storefront") {
        Some(dirs) => dirs.data_dir().join(DATABASE_FILE_NAME),
        None => PathBuf::from(DATABASE_FILE_NAME),
    }
}
