// SPDX-License-Identifier: GPL-3.0-only

//! Panel rendering for the keyboard widget.
//!
//! The panel is the floating keyboard surface: a header carrying the drag
//! bar and the layout selector, followed by the rendered key rows. The key
//! grid scales proportionally from a base unit derived from the panel
//! dimensions.

use cosmic::iced::{Alignment, Length, Padding};
use cosmic::widget::{self, container, icon, mouse_area};
use cosmic::Element;

use crate::layout::LayoutId;
use crate::renderer::message::RendererMessage;
use crate::renderer::row::render_row;
use crate::renderer::sizing::{calculate_base_unit, max_row_width_units, total_height_units};
use crate::renderer::state::KeyboardRenderer;

/// Default padding around the panel content in pixels.
const DEFAULT_PADDING: f32 = 8.0;

/// Default margin between cells in pixels.
const DEFAULT_MARGIN: f32 = 4.0;

/// Height of the header (drag bar + layout selector) in pixels.
const HEADER_HEIGHT: f32 = 36.0;

/// Renders the keyboard panel: header plus key grid.
///
/// `layout_titles` are the selector entries, indexed like `LayoutId::ALL`.
pub fn render_keyboard<'a>(
    state: &KeyboardRenderer,
    layout_titles: &'a [String],
    surface_width: f32,
    surface_height: f32,
    scale: f32,
) -> Element<'a, RendererMessage> {
    let rows = state.rows();

    // Space left for the key grid once padding, header and row margins are
    // accounted for.
    let available_width = surface_width - DEFAULT_PADDING * 2.0;
    let margin_height = DEFAULT_MARGIN * rows.len() as f32;
    let content_height =
        surface_height - DEFAULT_PADDING * 2.0 - HEADER_HEIGHT - margin_height;

    let base_unit = calculate_base_unit(
        available_width,
        content_height,
        max_row_width_units(rows),
        total_height_units(rows),
    );

    let mut column = widget::column::column().spacing(DEFAULT_MARGIN);
    column = column.push(render_header(state, layout_titles));

    for row in rows {
        let row_element = render_row(state, row, base_unit, scale, DEFAULT_MARGIN);
        column = column.push(container(row_element).center_x(Length::Fill));
    }

    container(column)
        .width(Length::Fixed(surface_width))
        .height(Length::Fixed(surface_height))
        .padding(Padding::from(DEFAULT_PADDING))
        .class(cosmic::style::Container::Background)
        .into()
}

/// Renders the panel header: the drag bar and the layout selector.
///
/// The drag bar only emits `DragStarted`; the gesture itself is tracked
/// through the application's permanently routed pointer messages.
fn render_header<'a>(
    state: &KeyboardRenderer,
    layout_titles: &'a [String],
) -> Element<'a, RendererMessage> {
    let grip = mouse_area(
        container(icon::from_name("open-menu-symbolic").size(16).symbolic(true))
            .width(Length::Fill)
            .height(Length::Fixed(HEADER_HEIGHT))
            .align_x(Alignment::Start)
            .align_y(Alignment::Center),
    )
    .on_press(RendererMessage::DragStarted);

    let selected = LayoutId::ALL
        .iter()
        .position(|id| *id == state.active_layout_id());
    let selector = widget::dropdown(layout_titles, selected, RendererMessage::LayoutSelected);

    widget::row::row()
        .spacing(DEFAULT_MARGIN)
        .align_y(Alignment::Center)
        .push(grip)
        .push(selector)
        .into()
}

// ============================================================================
// Tests
// ============================================================================
