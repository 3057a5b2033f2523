//! # Command-line Surface
//!
//! A presentation surface that drives the storefront one operation per
//! invocation.
//!
//! ## Command Flow
//! ```text
//! kicks add -u alice -p pw1 --brand Nike --model AirMax --size 42
//!   │
//!   ├── ConfigState::from_env() + flags ──► AppState (theme)
//!   ├── ConsoleSurface registered as a Themable surface
//!   ├── Database::new(config.database_path)
//!   ├── Storefront::login("alice", "pw1") ──► Session (cart loaded)
//!   └── session.add_item("Nike", "AirMax", "42") ──► print line + total
//! ```
//!
//! ## Exit Codes
//! - `0` success
//! - `1` signaled condition (bad input, empty cart, taken username, ...)
//! - `2` storage failure

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::session::{Session, Storefront};
use crate::state::{AppState, ConfigState, Themable, Theme};
use kicks_core::{CartLine, CartTotals, Money, Order, PaymentDetails};
use kicks_db::{Database, DbConfig, DbError};

// =============================================================================
// Arguments
// =============================================================================

/// Kicks sneaker storefront.
#[derive(Debug, Parser)]
#[command(name = "kicks", version, about)]
pub struct Cli {
    /// Database file (overrides KICKS_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Color theme (overrides KICKS_THEME)
    #[arg(long, global = true)]
    pub theme: Option<Theme>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account
    Register(Credentials),

    /// List catalog brands
    Brands,

    /// List the models of a brand
    Models {
        brand: String,
    },

    /// List selectable shoe sizes
    Sizes,

    /// Add a sneaker to the cart
    Add {
        #[command(flatten)]
        credentials: Credentials,

        #[arg(long)]
        brand: String,

        #[arg(long)]
        model: String,

        #[arg(long)]
        size: String,
    },

    /// Show the cart
    Cart(Credentials),

    /// Pay for the cart
    Checkout {
        #[command(flatten)]
        credentials: Credentials,

        #[arg(long, default_value = "")]
        card: String,

        #[arg(long, default_value = "")]
        expiry: String,

        #[arg(long, default_value = "")]
        cvc: String,
    },

    /// Show order history
    Orders(Credentials),
}

impl Command {
    /// Subcommand name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Register(_) => "register",
            Command::Brands => "brands",
            Command::Models { .. } => "models",
            Command::Sizes => "sizes",
            Command::Add { .. } => "add",
            Command::Cart(_) => "cart",
            Command::Checkout { .. } => "checkout",
            Command::Orders(_) => "orders",
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct Credentials {
    #[arg(short, long, env = "KICKS_USERNAME")]
    pub username: String,

    #[arg(short, long, env = "KICKS_PASSWORD", hide_env_values = true)]
    pub password: String,
}

// =============================================================================
// Console surface
// =============================================================================

/// Standard output, painted with the current theme.
#[derive(Debug)]
pub struct ConsoleSurface {
    theme: Mutex<Theme>,
    json: bool,
    color: bool,
}

impl ConsoleSurface {
    /// `color` enables ANSI styling of headings; it is ignored in JSON mode.
    pub fn new(json: bool, color: bool) -> Self {
        ConsoleSurface {
            theme: Mutex::new(Theme::default()),
            json,
            color: color && !json,
        }
    }

    /// The theme this surface was last painted with.
    pub fn theme(&self) -> Theme {
        *self.theme.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Heading text, painted with the theme palette when color is on.
    pub fn heading(&self, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        match self.theme().palette().ansi_sgr() {
            Some(sgr) => format!("\x1b[1;{}m{}\x1b[0m", sgr, text),
            None => text.to_string(),
        }
    }

    fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("failed to encode output: {}", e),
        }
    }

    fn list(&self, title: &str, items: &[String]) {
        if self.json {
            return self.json(&items);
        }
        println!("{}", self.heading(title));
        if items.is_empty() {
            println!("  (none)");
        }
        for item in items {
            println!("  {}", item);
        }
    }

    fn error(&self, err: &StoreError) {
        if self.json {
            return self.json(&err.to_response());
        }
        eprintln!("✗ {}", err.user_message());
    }
}

impl Themable for ConsoleSurface {
    fn surface_name(&self) -> &str {
        "console"
    }

    fn apply_theme(&self, theme: Theme) {
        *self.theme.lock().unwrap_or_else(PoisonError::into_inner) = theme;
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CartView<'a> {
    lines: &'a [CartLine],
    totals: CartTotals,
}

// =============================================================================
// Execution
// =============================================================================

/// Runs one CLI invocation and maps the outcome to an exit code.
pub async fn run(cli: Cli) -> ExitCode {
    let mut config = ConfigState::from_env();
    if let Some(db) = &cli.db {
        config.database_path = db.clone();
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }

    let app = AppState::new(config);
    let console = Arc::new(ConsoleSurface::new(
        cli.json,
        std::io::stdout().is_terminal(),
    ));
    app.register_surface(console.clone());

    let outcome = match open_store(app.config()).await {
        Ok(store) => run_on(&store, &cli.command, &app, &console).await,
        Err(err) => Err(err),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            console.error(&err);
            if err.is_user_error() {
                ExitCode::from(1)
            } else {
                ExitCode::from(2)
            }
        }
    }
}

/// Opens the configured database, creating its directory if needed.
pub async fn open_store(config: &ConfigState) -> StoreResult<Storefront> {
    let path = &config.database_path;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            DbError::ConnectionFailed(format!("cannot create {}: {}", parent.display(), e))
        })?;
    }

    let db = Database::new(DbConfig::new(path)).await?;
    Ok(Storefront::new(db))
}

/// Runs one command against an open store and closes it, whether or not
/// the command succeeded.
pub async fn run_on(
    store: &Storefront,
    command: &Command,
    app: &AppState,
    console: &ConsoleSurface,
) -> StoreResult<()> {
    let result = execute(store, command, app, console).await;
    store.database().close().await;
    result
}

async fn execute(
    store: &Storefront,
    command: &Command,
    app: &AppState,
    console: &ConsoleSurface,
) -> StoreResult<()> {
    let config = app.config();
    debug!(command = command.name(), db = %config.database_path.display(), "Executing command");

    let money = |m: Money| config.format_currency(m.cents());

    match command {
        Command::Register(creds) => {
            let session = store.register(&creds.username, &creds.password).await?;
            if console.json {
                console.json(session.user());
            } else {
                println!("✓ Registered {}", session.user().username);
            }
        }

        Command::Brands => {
            let brands = store.brands().await?;
            console.list("Brands", &brands);
        }

        Command::Models { brand } => {
            let models = store.models(brand).await?;
            console.list(&format!("{} models", brand), &models);
        }

        Command::Sizes => {
            let sizes: Vec<String> = store.sizes().iter().map(ToString::to_string).collect();
            console.list("Sizes", &sizes);
        }

        Command::Add {
            credentials,
            brand,
            model,
            size,
        } => {
            let mut session = login(store, credentials).await?;
            let line = session.add_item(brand, model, size).await?;
            if console.json {
                console.json(&line);
            } else {
                println!(
                    "✓ Added {} {} (size {}) for {}",
                    line.brand,
                    line.model,
                    line.size,
                    money(line.price)
                );
                println!("  Cart total: {}", money(session.total()));
            }
        }

        Command::Cart(creds) => {
            let session = login(store, creds).await?;
            if console.json {
                console.json(&CartView {
                    lines: session.lines(),
                    totals: session.totals(),
                });
            } else {
                println!("{}", console.heading("Cart"));
                if session.lines().is_empty() {
                    println!("  (empty)");
                }
                for line in session.lines() {
                    println!(
                        "  {} {} - Size: {} - Price: {}",
                        line.brand,
                        line.model,
                        line.size,
                        money(line.price)
                    );
                }
                println!("  Total: {}", money(session.total()));
            }
        }

        Command::Checkout {
            credentials,
            card,
            expiry,
            cvc,
        } => {
            let mut session = login(store, credentials).await?;
            let order = session
                .checkout(&PaymentDetails::new(card.as_str(), expiry.as_str(), cvc.as_str()))
                .await?;
            if console.json {
                console.json(&order);
            } else {
                println!("✓ Order #{} paid: {}", order.id, money(order.total_price));
            }
        }

        Command::Orders(creds) => {
            let session = login(store, creds).await?;
            let orders: Vec<Order> = session.orders().await?;
            if console.json {
                console.json(&orders);
            } else {
                let rows: Vec<String> = orders
                    .iter()
                    .map(|o| format!("Order #{} - {}", o.id, money(o.total_price)))
                    .collect();
                console.list("Orders", &rows);
            }
        }
    }

    Ok(())
}

async fn login(store: &Storefront, creds: &Credentials) -> StoreResult<Session> {
    store.login(&creds.username, &creds.password).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "kicks", "--theme", "dark", "add", "-u", "alice", "-p", "pw1", "--brand", "Nike",
            "--model", "AirMax", "--size", "42",
        ])
        .unwrap();

        assert_eq!(cli.theme, Some(Theme::Dark));
        match cli.command {
            Command::Add { credentials, size, .. } => {
                assert_eq!(credentials.username, "alice");
                assert_eq!(size, "42");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_console_follows_theme() {
        let app = AppState::new(ConfigState::default());
        let console = Arc::new(ConsoleSurface::new(false, true));
        app.register_surface(console.clone());
        assert_eq!(
            console.heading("Cart"),
            "\x1b[1;38;2;0;0;0;48;2;255;255;255mCart\x1b[0m"
        );

        app.set_theme(Theme::Dark);
        assert_eq!(console.theme(), Theme::Dark);
        assert_eq!(
            console.heading("Cart"),
            "\x1b[1;38;2;255;255;255;48;2;51;51;51mCart\x1b[0m"
        );
    }

    #[test]
    fn test_console_plain_without_color() {
        assert_eq!(ConsoleSurface::new(false, false).heading("Cart"), "Cart");
        assert_eq!(ConsoleSurface::new(true, true).heading("Cart"), "Cart");
    }

    #[tokio::test]
    async fn test_open_store_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState {
            database_path: dir.path().join("nested").join("sneakers.db"),
            ..ConfigState::default()
        };

        let store = open_store(&config).await.unwrap();
        assert!(store.database().health_check().await);
        assert!(config.database_path.exists());
    }

    #[tokio::test]
    async fn test_store_closed_after_failed_command() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState {
            database_path: dir.path().join("sneakers.db"),
            ..ConfigState::default()
        };
        let store = open_store(&config).await.unwrap();
        let app = AppState::new(config);
        let console = ConsoleSurface::new(true, false);

        let command = Command::Cart(Credentials {
            username: "nobody".to_string(),
            password: "pw".to_string(),
        });
        let err = run_on(&store, &command, &app, &console).await.unwrap_err();

        assert_eq!(err.code(), crate::error::ErrorCode::InvalidCredentials);
        assert!(store.database().pool().is_closed());
    }
}
