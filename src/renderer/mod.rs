// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard widget renderer.
//!
//! This module projects the keyboard state onto libcosmic/iced widgets. It
//! consumes the `Layout` structures from `src/layout/` and the modifier and
//! binding state from `src/input/`, and renders the floating keyboard panel.
//!
//! # Architecture
//!
//! - **state**: `KeyboardRenderer` (active layout, visibility, rendered key
//!   grid, modifier flags) and `DragTracker` for the reposition gesture. The
//!   grid is rebuilt — and a scrambled layout relabeled with a fresh
//!   permutation — on every `render()`.
//! - **sizing**: proportional sizing from a base unit with HDPI support.
//! - **key**: individual key buttons with icon/text label detection.
//! - **row**: horizontal row layout.
//! - **panel**: the full panel with drag bar, layout selector and key grid.
//! - **message**: interaction messages emitted by the widgets.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cipherboard::layout::{LayoutId, LayoutTable};
//! use cipherboard::renderer::{render_keyboard, KeyboardRenderer};
//!
//! let table = LayoutTable::builtin()?;
//! let mut renderer = KeyboardRenderer::new(table, LayoutId::En, true);
//!
//! // Rebuild the grid (drawing a fresh scramble permutation if any)
//! renderer.render();
//!
//! // Project the state onto widgets
//! let titles: Vec<String> = LayoutId::ALL.iter().map(|id| id.title().into()).collect();
//! let element = render_keyboard(&renderer, &titles, 640.0, 280.0, 1.0);
//! ```

// Core modules
pub mod sizing;
pub mod state;

// Rendering modules
pub mod key;
pub mod message;
pub mod panel;
pub mod row;

// Re-export public API from state
pub use state::{DragTracker, KeyboardRenderer};

// Re-export sizing functions for convenience
pub use sizing::{
    calculate_base_unit, max_row_width_units, parse_pixels, resolve_sizing, row_width_units,
    total_height_units,
};

// Re-export message types
pub use message::RendererMessage;

// Re-export rendering functions
pub use key::{is_icon_name, is_modifier_active, render_key, render_label};
pub use panel::render_keyboard;
pub use row::render_row;
