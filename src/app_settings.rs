// SPDX-License-Identifier: GPL-3.0-only

//! Centralized application settings and constants.

/// Application ID in RDNN (reverse domain name notation) format.
pub const APP_ID: &str = "io.github.cipherboard.Cipherboard";

/// Default window width in pixels.
pub const DEFAULT_WIDTH: f32 = 920.0;

/// Default window height in pixels.
pub const DEFAULT_HEIGHT: f32 = 680.0;

/// Minimum window width in pixels.
pub const MIN_WIDTH: f32 = 700.0;

/// Minimum window height in pixels.
pub const MIN_HEIGHT: f32 = 480.0;

/// Width of the floating keyboard panel in pixels.
pub const PANEL_WIDTH: f32 = 640.0;

/// Height of the floating keyboard panel in pixels.
pub const PANEL_HEIGHT: f32 = 300.0;

/// Default panel x offset from the window's left edge.
pub const DEFAULT_PANEL_X: f32 = 24.0;

/// Default panel y offset from the window's top edge.
pub const DEFAULT_PANEL_Y: f32 = 300.0;
