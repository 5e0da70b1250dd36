// SPDX-License-Identifier: GPL-3.0-only

//! Key rendering for the keyboard widget.
//!
//! Keys are rendered as buttons with proportional sizing and a centered
//! label. Control and modifier keys render system icons; literal keys render
//! their resolved glyph as text.

use cosmic::iced::{Alignment, Length};
use cosmic::widget::{self, button, container, icon};
use cosmic::Element;

use crate::layout::{KeyClass, KeyElement};
use crate::renderer::message::RendererMessage;
use crate::renderer::sizing::resolve_sizing;
use crate::renderer::state::KeyboardRenderer;

/// Key labels that should be rendered with system icons.
const ICON_NAMES: &[&str] = &["backspace", "enter", "shift", "tab", "caps", "space"];

/// Renders a single key as a button element.
///
/// The displayed glyph is resolved through the modifier flags so the whole
/// grid re-labels in place when shift or caps lock flips; active modifier
/// keys use the accent style.
pub fn render_key<'a>(
    state: &KeyboardRenderer,
    key: &KeyElement,
    base_unit: f32,
    scale: f32,
) -> Element<'a, RendererMessage> {
    let width = resolve_sizing(&key.width, base_unit, scale);
    let height = resolve_sizing(&key.height, base_unit, scale);

    let display = state.display_glyph(key);
    let label: Element<'a, RendererMessage> = render_label(&display);

    let button_class = if is_modifier_active(state, key) {
        cosmic::style::Button::Suggested
    } else {
        cosmic::style::Button::Standard
    };

    button::custom(
        container(label)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Alignment::Center)
            .align_y(Alignment::Center),
    )
    .on_press(RendererMessage::KeyPressed(key.identifier.clone()))
    .class(button_class)
    .width(Length::Fixed(width))
    .height(Length::Fixed(height))
    .into()
}

/// Whether a key should display the active modifier styling.
///
/// Only modifier keys whose flag is currently set are highlighted; the
/// native pressed state covers everything else.
#[must_use]
pub fn is_modifier_active(state: &KeyboardRenderer, key: &KeyElement) -> bool {
    matches!(key.class, Some(KeyClass::Modifier(m)) if state.is_modifier_active(m))
}

/// Renders a key label as either text or a system icon.
pub fn render_label<'a>(label: &str) -> Element<'a, RendererMessage> {
    let label_lower = label.to_lowercase();

    if is_icon_name(&label_lower) {
        let icon_name = match label_lower.as_str() {
            "backspace" => "edit-delete-symbolic",
            "enter" => "keyboard-enter-symbolic",
            "shift" => "keyboard-shift-symbolic",
            "tab" => "format-indent-more-symbolic",
            "caps" => "keyboard-caps-symbolic",
            "space" => "keyboard-spacebar-symbolic",
            other => other,
        };

        icon::from_name(icon_name).size(16).symbolic(true).into()
    } else {
        widget::text::body(label.to_string()).into()
    }
}

/// Checks if a label should be rendered as an icon.
pub fn is_icon_name(label: &str) -> bool {
    ICON_NAMES.contains(&label)
}

// ============================================================================
// Tests
// ============================================================================
