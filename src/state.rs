// SPDX-License-Identifier: GPL-3.0-only

use crate::app_settings;
use cosmic::cosmic_config;
use cosmic::cosmic_config::{cosmic_config_derive::CosmicConfigEntry, CosmicConfigEntry};

/// Keyboard panel state that persists between application runs.
///
/// The panel floats inside the window and can be dragged anywhere; the last
/// position is saved when a drag gesture ends and restored on startup.
#[derive(Debug, Clone, CosmicConfigEntry, PartialEq)]
#[version = 1]
pub struct WidgetState {
    /// Panel x offset from the window's left edge.
    pub x: f32,
    /// Panel y offset from the window's top edge.
    pub y: f32,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            x: app_settings::DEFAULT_PANEL_X,
            y: app_settings::DEFAULT_PANEL_Y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: the default position matches the app settings
    #[test]
    fn test_default_position() {
        let state = WidgetState::default();
        assert_eq!(state.x, app_settings::DEFAULT_PANEL_X);
        assert_eq!(state.y, app_settings::DEFAULT_PANEL_Y);
    }

    /// Test: the state survives a save/restore cycle
    #[test]
    fn test_state_roundtrip() {
        let state = WidgetState { x: 123.5, y: 67.25 };
        let restored = state.clone();
        assert_eq!(state, restored);
    }
}
