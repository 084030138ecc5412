//! zatlas: a Zellij plugin for exploring countries.
//!
//! zatlas reads the REST Countries API and provides:
//! - A country list with search, region/language/currency filters and sorting
//! - Per-country detail pages with clickable border countries
//! - Favorites, optionally gated behind a mock local login
//! - A persisted session and a "show favorites only" hand-off between views

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Key mapping, event handling                      │
//! │  - Action dispatching (web requests, close)         │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │               │               │              │
//! ┌─────────────┐ ┌──────────────┐ ┌─────────────┐ ┌─────────────┐
//! │ UI (ui/)    │ │ Pipeline     │ │ Stores      │ │ Source      │
//! │ - Rendering │ │ (pipeline/)  │ │ (store/)    │ │ (source/)   │
//! │ - Theming   │ │ - Filter     │ │ - Favorites │ │ - Endpoints │
//! │ - Components│ │ - Sort       │ │ - Session   │ │ - Decoding  │
//! └─────────────┘ └──────────────┘ └─────────────┘ └─────────────┘
//!                                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage (storage/), Domain (domain/),              │
//! │  Infrastructure (infrastructure/)                   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Core domain types (Country, criteria, session, errors)
//! - [`pipeline`]: Filter/sort derivation of the visible list
//! - [`store`]: Favorites and session stores
//! - [`source`]: REST Countries requests and response decoding
//! - [`storage`]: Durable key-value storage (JSON file, in-memory)
//! - [`infrastructure`]: Sandbox paths
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zatlas.wasm" {
//!         require_login "true"
//!         scoped_favorites "true"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load** (`main.rs`): parse configuration, initialize tracing,
//!    build `AppState`, request web access, subscribe to events
//! 2. **Permission Granted**: issue the catalog read
//! 3. **Web Response**: decode, store the catalog, derive the visible list
//! 4. **UI Rendering**: compute the view model, render components
//!
//! # Example
//!
//! ```rust
//! use zatlas::{handle_event, Action, Config, Event};
//!
//! let mut state = zatlas::initialize_with_storage(
//!     &Config::default(),
//!     Box::new(zatlas::storage::MemoryStorage::new()),
//! );
//!
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! assert!(matches!(actions[0], Action::Fetch(_)));
//! # Ok::<(), zatlas::ZatlasError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod pipeline;
pub mod source;
pub mod storage;
pub mod store;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus, View};
pub use domain::{Country, FilterCriteria, Result, SortDirective, ZatlasError};
pub use ui::Theme;

use std::collections::BTreeMap;

use source::{CountrySource, DEFAULT_BASE_URL};
use storage::{JsonStorage, MemoryStorage, Storage};
use store::{FavoritesPolicy, FavoritesStore, SessionStore};

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/zatlas.wasm" {
///     api_base_url "https://restcountries.com/v3.1"
///     require_login "true"
///     scoped_favorites "false"
///     theme "catppuccin-latte"
///     theme_file "~/themes/nord.toml"
///     trace_level "zatlas=debug"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// REST Countries API root. Default: `https://restcountries.com/v3.1`
    pub api_base_url: String,

    /// Refuse favorite toggles until someone is logged in. Default: `false`
    pub require_login: bool,

    /// Clear favorites when the logged-in identity changes. Default: `false`
    pub scoped_favorites: bool,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` maps to the sandbox `/host`.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            require_login: false,
            scoped_favorites: false,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unknown keys are ignored; malformed values fall back to their default.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zatlas::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("require_login".to_string(), "true".to_string());
    /// map.insert("theme".to_string(), "catppuccin-frappe".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert!(config.require_login);
    /// assert!(!config.scoped_favorites);
    /// assert_eq!(config.theme_name.as_deref(), Some("catppuccin-frappe"));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let api_base_url = config
            .get("api_base_url")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map_or(defaults.api_base_url, String::from);

        let flag = |key: &str, default: bool| {
            parse_flag(config, key).unwrap_or_else(|e| {
                tracing::debug!(error = %e, "using default");
                default
            })
        };

        Self {
            api_base_url,
            require_login: flag("require_login", defaults.require_login),
            scoped_favorites: flag("scoped_favorites", defaults.scoped_favorites),
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// The favorites policy these options select.
    #[must_use]
    pub const fn favorites_policy(&self) -> FavoritesPolicy {
        if self.require_login {
            FavoritesPolicy::RequireLogin
        } else {
            FavoritesPolicy::Open
        }
    }
}

/// Reads a boolean option. Absent keys are `false`.
fn parse_flag(config: &BTreeMap<String, String>, key: &str) -> Result<bool> {
    let Some(raw) = config.get(key) else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(ZatlasError::Config(format!("{key}: expected a boolean, got '{other}'"))),
    }
}

/// Loads the configured theme: file first, then name, then the default.
#[must_use]
pub fn load_theme(config: &Config) -> Theme {
    config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    )
}

/// Initializes the plugin with configuration.
///
/// Session storage is the JSON file in the plugin data directory. If that
/// cannot be set up the plugin still runs, with a session that lasts until
/// the pane closes.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing zatlas plugin");

    let storage: Box<dyn Storage> = match JsonStorage::new(infrastructure::storage_file()) {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            tracing::warn!(error = %e, "durable storage unavailable, session will not persist");
            Box::new(MemoryStorage::new())
        }
    };

    initialize_with_storage(config, storage)
}

/// Initializes the plugin on an explicit storage backend.
pub fn initialize_with_storage(config: &Config, storage: Box<dyn Storage>) -> AppState {
    AppState::new(
        CountrySource::new(&config.api_base_url),
        FavoritesStore::new(config.favorites_policy(), config.scoped_favorites),
        SessionStore::new(storage),
        load_theme(config),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
        assert!(!config.require_login);
        assert!(!config.scoped_favorites);
        assert_eq!(config.favorites_policy(), FavoritesPolicy::Open);
    }

    #[test]
    fn test_malformed_flag_falls_back() {
        let config = Config::from_zellij(&map(&[("require_login", "sometimes"), ("scoped_favorites", "YES")]));
        assert!(!config.require_login);
        assert!(config.scoped_favorites);
        assert!(matches!(
            parse_flag(&map(&[("x", "maybe")]), "x"),
            Err(ZatlasError::Config(_))
        ));
    }

    #[test]
    fn test_blank_base_url_uses_default() {
        let config = Config::from_zellij(&map(&[("api_base_url", "  ")]));
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_theme_fallbacks() {
        let config = Config {
            theme_name: Some("no-such-theme".to_string()),
            ..Config::default()
        };
        assert_eq!(load_theme(&config).name, "catppuccin-mocha");

        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(load_theme(&config).name, "catppuccin-mocha");
    }

    #[test]
    fn test_initialize_with_storage_applies_policy() {
        let config = Config {
            require_login: true,
            api_base_url: "http://mirror.test/v3.1/".to_string(),
            ..Config::default()
        };
        let state = initialize_with_storage(&config, Box::new(MemoryStorage::new()));
        assert_eq!(state.favorites.policy(), FavoritesPolicy::RequireLogin);
        assert_eq!(state.source.base_url(), "http://mirror.test/v3.1");
    }
}
