//! # State Module
//!
//! Application state shared by presentation surfaces.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐        ┌──────────────────────────────────────┐  │
//! │  │   ConfigState    │──────► │              AppState                │  │
//! │  │                  │ theme  │                                      │  │
//! │  │  database_path   │        │  current theme (watch channel)       │  │
//! │  │  theme           │        │  SurfaceRegistry (Weak<dyn Themable>)│  │
//! │  │  currency_symbol │        │                                      │  │
//! │  └──────────────────┘        └──────────────────────────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • ConfigState: read-only after initialization                         │
//! │  • AppState: theme in a watch channel, registry behind a Mutex         │
//! │  • Sessions are NOT part of AppState; each surface owns its Session    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod theme;

pub use config::{default_database_path, ConfigState, DATABASE_FILE_NAME};
pub use theme::{AppState, Palette, SurfaceRegistry, Themable, Theme};
