// SPDX-License-Identifier: GPL-3.0-only

use crate::layout::LayoutId;
use cosmic::cosmic_config;
use cosmic::cosmic_config::{cosmic_config_derive::CosmicConfigEntry, CosmicConfigEntry};

/// User configuration that persists between application runs.
#[derive(Debug, Clone, CosmicConfigEntry, Eq, PartialEq)]
#[version = 1]
pub struct Config {
    /// Stable id of the layout selected at startup.
    pub default_layout: String,
    /// Whether the keyboard panel starts visible.
    pub start_visible: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_layout: LayoutId::En.as_str().to_string(),
            start_visible: false,
        }
    }
}

impl Config {
    /// The configured startup layout, falling back to English for ids that
    /// no longer exist.
    pub fn startup_layout(&self) -> LayoutId {
        LayoutId::from_str(&self.default_layout).unwrap_or(LayoutId::En)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: defaults select English and start hidden
    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.startup_layout(), LayoutId::En);
        assert!(!config.start_visible);
    }

    /// Test: unknown layout ids fall back to English
    #[test]
    fn test_unknown_layout_falls_back() {
        let config = Config {
            default_layout: "dvorak".to_string(),
            start_visible: true,
        };
        assert_eq!(config.startup_layout(), LayoutId::En);
    }

    /// Test: every built-in id round-trips through configuration
    #[test]
    fn test_builtin_ids_roundtrip() {
        for id in LayoutId::ALL {
            let config = Config {
                default_layout: id.as_str().to_string(),
                start_visible: false,
            };
            assert_eq!(config.startup_layout(), id);
        }
    }
}
