//! Videotheque: client-side views of a personal movie collection.
//!
//! The crate drives the pages of the videotheque web application:
//! - A filterable movie collection store with category and free-text search
//! - Dual-layout HTML rendering (seven-column table, stacked phone table)
//! - A viewport-driven layout switch
//! - The home page grid of movie cards
//! - REST envelopes, request sequencing and forms for add, edit and delete
//! - Search and import against a third-party metadata provider through the
//!   server proxy
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Page runtime (main.rs)                             │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Collection stores and filters                    │
//! │  - Forms                                            │
//! └─────────────────────────────────────────────────────┘
//!              │                         │
//! ┌──────────────────────┐   ┌──────────────────────────┐
//! │ UI Layer (ui/)       │   │ API Layer (api/)         │
//! │ - maud components    │   │ - Envelopes              │
//! │ - Layout switch      │   │ - Transport seam         │
//! │ - Themes             │   │ - Request sequencing     │
//! └──────────────────────┘   └──────────────────────────┘
//!              │                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Config and log paths (infrastructure/)           │
//! │  - Error types (domain/error)                       │
//! │  - Movie and provider models (domain/)              │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber, rotating log file            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`api`]: Server client, envelopes and sequencing
//! - [`domain`]: Movie records, provider records and errors
//! - [`infrastructure`]: Config and data directories
//! - [`ui`]: HTML rendering with theme support
//! - [`observability`]: Logging setup
//!
//! # Configuration
//!
//! ```toml
//! # ~/.config/videotheque/config.toml
//! base_url = "http://localhost:5000"
//! breakpoint_px = 768
//! theme = "bootstrap"
//! trace_level = "info"
//! log_file = "~/.local/share/videotheque/videotheque.log"
//! timeout_secs = 10
//! ```
//!
//! # Example
//!
//! ```rust
//! use videotheque::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::OpenManagement)?;
//! assert!(matches!(actions[0], Action::Dispatch { .. }));
//! # Ok::<(), videotheque::VideothequeError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{MovieRecord, Result, VideothequeError};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::app::state::DEFAULT_COVER_BASE_URL;
use crate::ui::layout::DEFAULT_BREAKPOINT_PX;

/// Default server address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration.
///
/// Built from `key=value` pairs with [`Config::from_map`] or from a TOML file
/// with [`Config::from_file`]. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server root; endpoint paths are appended to it.
    pub base_url: String,

    /// Viewport width at or below which the narrow table is shown. Default: 768
    pub breakpoint_px: u32,

    /// Prefix for provider cover paths.
    pub cover_base_url: String,

    /// Built-in theme name (`bootstrap`, `plain`). Ignored if `theme_file` is set.
    pub theme: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme`.
    pub theme_file: Option<String>,

    /// Tracing level: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Log file path; logs go to stderr when unset.
    pub log_file: Option<String>,

    /// Request timeout in seconds. Default: 10
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            breakpoint_px: DEFAULT_BREAKPOINT_PX,
            cover_base_url: DEFAULT_COVER_BASE_URL.to_string(),
            theme: None,
            theme_file: None,
            trace_level: None,
            log_file: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// # Parsing Rules
    ///
    /// - `base_url`, `cover_base_url`: taken as is (empty values ignored)
    /// - `breakpoint_px`, `timeout_secs`: parsed as integers, default on error
    /// - `theme`, `theme_file`, `trace_level`, `log_file`: optional strings
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use videotheque::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("base_url".to_string(), "http://videotheque.local".to_string());
    /// map.insert("breakpoint_px".to_string(), "640".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.base_url, "http://videotheque.local");
    /// assert_eq!(config.breakpoint_px, 640);
    /// assert_eq!(config.timeout_secs, 10);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let breakpoint_px = config
            .get("breakpoint_px")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(defaults.breakpoint_px);

        let timeout_secs = config
            .get("timeout_secs")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(defaults.timeout_secs);

        Self {
            base_url: non_empty("base_url").unwrap_or(defaults.base_url),
            breakpoint_px,
            cover_base_url: non_empty("cover_base_url").unwrap_or(defaults.cover_base_url),
            theme: non_empty("theme"),
            theme_file: non_empty("theme_file"),
            trace_level: non_empty("trace_level"),
            log_file: non_empty("log_file"),
            timeout_secs,
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`VideothequeError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            VideothequeError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        toml::from_str(&contents)
            .map_err(|e| VideothequeError::Config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Overlays the keys present in `overrides` on top of `self`.
    #[must_use]
    pub fn merged_with(self, overrides: &BTreeMap<String, String>) -> Self {
        let parsed = Self::from_map(overrides);
        let has = |key: &str| overrides.get(key).is_some_and(|v| !v.trim().is_empty());
        Self {
            base_url: if has("base_url") { parsed.base_url } else { self.base_url },
            breakpoint_px: if has("breakpoint_px") { parsed.breakpoint_px } else { self.breakpoint_px },
            cover_base_url: if has("cover_base_url") { parsed.cover_base_url } else { self.cover_base_url },
            theme: parsed.theme.or(self.theme),
            theme_file: parsed.theme_file.or(self.theme_file),
            trace_level: parsed.trace_level.or(self.trace_level),
            log_file: parsed.log_file.or(self.log_file),
            timeout_secs: if has("timeout_secs") { parsed.timeout_secs } else { self.timeout_secs },
        }
    }
}

/// Builds the initial application state.
///
/// The theme comes from `theme_file` if set, else the `theme` name, else the
/// built-in default; a theme that fails to load is logged and replaced by the
/// default. The viewport starts wide until the first resize event.
///
/// # Example
///
/// ```rust
/// use videotheque::{initialize, Config};
///
/// let config = Config {
///     breakpoint_px: 600,
///     ..Default::default()
/// };
/// let state = initialize(&config);
/// assert_eq!(state.breakpoint_px, 600);
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(base_url = %config.base_url, "initializing videotheque");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(theme, u32::MAX)
        .with_breakpoint(config.breakpoint_px)
        .with_cover_base_url(config.cover_base_url.clone())
}
