//! # Theme State
//!
//! The current theme and every surface that renders it.
//!
//! ## Propagation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    set_theme(Theme::Dark)                               │
//! │                                                                         │
//! │  AppState                                                              │
//! │  ├── watch::Sender<Theme> ──────► every Receiver from subscribe()      │
//! │  │                                                                      │
//! │  └── SurfaceRegistry                                                   │
//! │      ├── Weak<dyn Themable> ──upgrade──► apply_theme(Dark)             │
//! │      ├── Weak<dyn Themable> ──upgrade──► apply_theme(Dark)             │
//! │      └── Weak<dyn Themable> ──(dropped)─► pruned                       │
//! │                                                                         │
//! │  Surfaces are held weakly: closing a window never requires telling    │
//! │  the registry.                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tokio::sync::watch;
use tracing::{debug, info};

use super::config::ConfigState;

// =============================================================================
// Theme
// =============================================================================

/// Storefront color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Colors a surface paints with, as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub background: &'static str,
    pub foreground: &'static str,
}

impl Theme {
    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: "#ffffff",
                foreground: "#000000",
            },
            Theme::Dark => Palette {
                background: "#333333",
                foreground: "#ffffff",
            },
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl Palette {
    /// ANSI SGR parameters painting text in this palette (24-bit color).
    ///
    /// `None` if a color is not `#rrggbb`.
    pub fn ansi_sgr(&self) -> Option<String> {
        let (fr, fg, fb) = hex_rgb(self.foreground)?;
        let (br, bg, bb) = hex_rgb(self.background)?;
        Some(format!("38;2;{fr};{fg};{fb};48;2;{br};{bg};{bb}"))
    }
}

fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(hex.get(at..at + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}', expected light or dark", other)),
        }
    }
}

// =============================================================================
// Surfaces
// =============================================================================

/// Anything that renders with the current theme (a window, a console, ...).
pub trait Themable: Send + Sync {
    /// Name used in logs.
    fn surface_name(&self) -> &str;

    /// Repaints with the given theme.
    fn apply_theme(&self, theme: Theme);
}

/// Weakly-held set of live surfaces.
#[derive(Default)]
pub struct SurfaceRegistry {
    surfaces: Mutex<Vec<Weak<dyn Themable>>>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a surface. The registry never keeps it alive.
    pub fn register(&self, surface: Arc<dyn Themable>) {
        let mut surfaces = self.surfaces.lock().unwrap_or_else(PoisonError::into_inner);
        surfaces.push(Arc::downgrade(&surface));
    }

    /// Applies `theme` to every live surface and prunes dropped ones.
    ///
    /// Returns the number of surfaces notified.
    pub fn notify(&self, theme: Theme) -> usize {
        // Upgrade under the lock, paint outside it so a surface may register
        // another surface from apply_theme.
        let live: Vec<Arc<dyn Themable>> = {
            let mut surfaces = self.surfaces.lock().unwrap_or_else(PoisonError::into_inner);
            surfaces.retain(|weak| weak.strong_count() > 0);
            surfaces.iter().filter_map(Weak::upgrade).collect()
        };

        for surface in &live {
            debug!(surface = surface.surface_name(), theme = %theme, "Applying theme");
            surface.apply_theme(theme);
        }

        live.len()
    }

    /// Number of registered surfaces that are still alive.
    pub fn live_count(&self) -> usize {
        let surfaces = self.surfaces.lock().unwrap_or_else(PoisonError::into_inner);
        surfaces.iter().filter(|weak| weak.strong_count() > 0).count()
    }
}

impl fmt::Debug for SurfaceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceRegistry")
            .field("live", &self.live_count())
            .finish()
    }
}

// =============================================================================
// AppState
// =============================================================================

/// Application-wide state shared by every presentation surface.
///
/// Passed around by reference or `Arc`; there is no global instance.
#[derive(Debug)]
pub struct AppState {
    config: ConfigState,
    theme: watch::Sender<Theme>,
    surfaces: SurfaceRegistry,
}

impl AppState {
    /// Creates the state, starting from the configured theme.
    pub fn new(config: ConfigState) -> Self {
        let (theme, _) = watch::channel(config.theme);
        AppState {
            config,
            theme,
            surfaces: SurfaceRegistry::new(),
        }
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    /// The current theme.
    pub fn theme(&self) -> Theme {
        *self.theme.borrow()
    }

    /// Registers a surface and paints it with the current theme right away.
    pub fn register_surface(&self, surface: Arc<dyn Themable>) {
        let theme = self.theme();
        debug!(surface = surface.surface_name(), theme = %theme, "Registering surface");
        surface.apply_theme(theme);
        self.surfaces.register(surface);
    }

    /// Switches theme, repainting every live surface and waking subscribers.
    ///
    /// Returns the number of surfaces repainted.
    pub fn set_theme(&self, theme: Theme) -> usize {
        self.theme.send_replace(theme);
        let notified = self.surfaces.notify(theme);
        info!(theme = %theme, surfaces = notified, "Theme changed");
        notified
    }

    /// Flips between light and dark.
    pub fn toggle_theme(&self) -> Theme {
        let next = self.theme().toggled();
        self.set_theme(next);
        next
    }

    /// Receiver that observes every theme change.
    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.theme.subscribe()
    }

    /// Number of live registered surfaces.
    pub fn surface_count(&self) -> usize {
        self.surfaces.live_count()
    }
}
