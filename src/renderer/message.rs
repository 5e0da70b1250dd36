// SPDX-License-Identifier: GPL-3.0-only

//! Renderer message types for keyboard interactions.
//!
//! These messages are emitted by the rendering functions and the keyboard
//! panel chrome to communicate user interactions back to the application.

use cosmic::iced::Point;

/// Messages emitted by the keyboard renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum RendererMessage {
    /// A key was activated. Contains the key identifier.
    KeyPressed(String),

    /// A layout was chosen in the selector. Contains the index into
    /// `LayoutId::ALL`.
    LayoutSelected(usize),

    /// The visibility toggle was activated.
    ToggleVisibility,

    /// The drag bar was pressed; a drag gesture begins at the last known
    /// cursor position.
    DragStarted,

    /// The pointer moved. Tracked continuously so a drag start knows where
    /// the cursor is.
    PointerMoved(Point),

    /// The pointer was released; any drag gesture ends.
    DragReleased,

    /// No-op message (used for placeholder elements).
    Noop,
}

impl Default for RendererMessage {
    fn default() -> Self {
        Self::Noop
    }
}

// ============================================================================
// Tests
// ============================================================================
