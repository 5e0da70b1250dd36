// SPDX-License-Identifier: GPL-3.0-only

//! Row rendering for the keyboard widget.
//!
//! Rows arrange key elements horizontally with margin spacing and are
//! centered within the panel by the panel renderer.

use cosmic::widget;
use cosmic::Element;

use crate::layout::KeyElement;
use crate::renderer::key::render_key;
use crate::renderer::message::RendererMessage;
use crate::renderer::state::KeyboardRenderer;

/// Renders a row of key elements as a horizontal layout.
pub fn render_row<'a>(
    state: &KeyboardRenderer,
    row: &[KeyElement],
    base_unit: f32,
    scale: f32,
    margin: f32,
) -> Element<'a, RendererMessage> {
    let mut row_widget = widget::row::row().spacing(margin);

    for key in row {
        row_widget = row_widget.push(render_key(state, key, base_unit, scale));
    }

    row_widget.into()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutId, LayoutTable};

    /// Test: row rendering handles full and empty rows
    #[test]
    fn test_render_rows() {
        let table = LayoutTable::builtin().unwrap();
        let state = KeyboardRenderer::new(table, LayoutId::En, true);

        for row in state.rows() {
            let _element = render_row(&state, row, 48.0, 1.0, 4.0);
        }
        let _empty = render_row(&state, &[], 48.0, 1.0, 4.0);
    }
}
