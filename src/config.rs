//! User configuration for the map menu.
//!
//! On the web build the configuration is read from `localStorage` as JSON.
//! Missing keys fall back to their defaults; an unreadable value falls back
//! to the whole default configuration.

use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// localStorage key holding the configuration JSON.
#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "nexus_map_config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MenuConfig {
    /// Prefix teleport names with their `[key]` shortcut.
    pub display_shortcuts: bool,
    /// Maximum log level, e.g. `"info"` or `"debug"`.
    pub log_level: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            display_shortcuts: false,
            log_level: "info".to_string(),
        }
    }
}

impl MenuConfig {
    /// Parse configuration JSON, falling back to defaults when unreadable.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring unreadable menu config: {e}");
                Self::default()
            }
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

#[cfg(target_arch = "wasm32")]
fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Load the configuration from localStorage.
#[cfg(target_arch = "wasm32")]
pub fn load_config() -> MenuConfig {
    let stored = get_storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
    match stored {
        Some(json) => MenuConfig::from_json(&json),
        None => MenuConfig::default(),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_config() -> MenuConfig {
    MenuConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_hide_shortcuts() {
        let config = MenuConfig::default();
        assert!(!config.display_shortcuts);
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = MenuConfig::from_json(r#"{ "displayShortcuts": true }"#);
        assert!(config.display_shortcuts);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn unreadable_json_falls_back_to_default() {
        assert_eq!(MenuConfig::from_json("not json"), MenuConfig::default());
        assert_eq!(
            MenuConfig::from_json(r#"{ "displayShortcuts": "yes" }"#),
            MenuConfig::default()
        );
    }

    #[test]
    fn level_filter_parses_and_falls_back() {
        let debug = MenuConfig {
            log_level: "debug".into(),
            ..MenuConfig::default()
        };
        assert_eq!(debug.level_filter(), LevelFilter::Debug);

        let bogus = MenuConfig {
            log_level: "loud".into(),
            ..MenuConfig::default()
        };
        assert_eq!(bogus.level_filter(), LevelFilter::Info);
    }
}
