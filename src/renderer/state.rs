// SPDX-License-Identifier: GPL-3.0-only

//! Renderer state for the keyboard widget.
//!
//! `KeyboardRenderer` owns the widget state: the active layout, visibility,
//! the rendered key-element grid and the modifier flags. The grid is rebuilt
//! from scratch by every `render()` call — triggered by the visibility
//! toggle, a layout change or startup — and the scramble pass of a scrambled
//! layout draws a fresh permutation on each rebuild. The iced view is a pure
//! projection of this state, so a rebuild always completes before anything
//! can observe it.

use cosmic::iced::{Point, Vector};
use rand::Rng;

use crate::input::ModifierState;
use crate::layout::{
    scramble, KeyClass, KeyElement, Layout, LayoutId, LayoutTable, Modifier, ScrambleKind,
};

/// State for the keyboard widget: layout, visibility, rendered keys and
/// modifier flags.
#[derive(Debug)]
pub struct KeyboardRenderer {
    /// The layout registry, loaded once at startup
    table: LayoutTable,

    /// Id of the active layout
    active_layout: LayoutId,

    /// Whether the keyboard panel is shown
    visible: bool,

    /// Rendered key-element grid; rebuilt by every `render()`
    keys: Vec<Vec<KeyElement>>,

    /// Shift and caps-lock flags
    modifiers: ModifierState,
}

impl KeyboardRenderer {
    /// Creates a renderer over the given layout table and performs the
    /// initial render.
    pub fn new(table: LayoutTable, active_layout: LayoutId, visible: bool) -> Self {
        let mut renderer = Self {
            table,
            active_layout,
            visible,
            keys: Vec::new(),
            modifiers: ModifierState::new(),
        };
        renderer.render();
        renderer
    }

    /// Rebuilds the key-element grid from the active layout.
    ///
    /// A scrambled layout is relabeled with a fresh permutation on every
    /// rebuild; the permutation is never persisted.
    pub fn render(&mut self) {
        self.render_with_rng(&mut rand::thread_rng());
    }

    /// Rebuilds the grid using the provided random source.
    ///
    /// Tests drive this with a seeded generator to make scrambles
    /// reproducible.
    pub fn render_with_rng<R: Rng>(&mut self, rng: &mut R) {
        let Some(layout) = self.table.get(self.active_layout) else {
            tracing::warn!(layout = %self.active_layout, "active layout is not registered");
            self.keys = Vec::new();
            return;
        };

        self.keys = layout
            .rows
            .iter()
            .map(|row| row.cells.iter().map(KeyElement::from_key).collect())
            .collect();

        match layout.scramble {
            Some(ScrambleKind::Digits) => scramble::scramble_digits(rng, &mut self.keys),
            Some(ScrambleKind::Latin) => scramble::scramble_latin(rng, &mut self.keys),
            Some(ScrambleKind::Thai) => scramble::scramble_thai(rng, &mut self.keys),
            None => {}
        }
    }

    /// The active layout definition, if registered.
    pub fn active_layout(&self) -> Option<&Layout> {
        self.table.get(self.active_layout)
    }

    /// The active layout id.
    pub fn active_layout_id(&self) -> LayoutId {
        self.active_layout
    }

    /// Switches the active layout and re-renders.
    pub fn set_layout(&mut self, id: LayoutId) {
        self.active_layout = id;
        self.render();
    }

    /// Whether the keyboard panel is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Flips visibility and re-renders the grid.
    pub fn toggle_visibility(&mut self) -> bool {
        self.visible = !self.visible;
        self.render();
        self.visible
    }

    /// The rendered key rows.
    pub fn rows(&self) -> &[Vec<KeyElement>] {
        &self.keys
    }

    /// Looks up a rendered key element by identifier.
    pub fn key(&self, identifier: &str) -> Option<&KeyElement> {
        self.keys
            .iter()
            .flatten()
            .find(|key| key.identifier == identifier)
    }

    /// The modifier flags.
    pub fn modifiers(&self) -> &ModifierState {
        &self.modifiers
    }

    /// Toggles a modifier flag, returning its new state.
    ///
    /// Every rendered key's displayed glyph follows immediately because
    /// display glyphs are derived from modifier state at view time.
    pub fn toggle_modifier(&mut self, modifier: Modifier) -> bool {
        self.modifiers.toggle(modifier)
    }

    /// Whether a modifier is active (drives the key's visual active state).
    pub fn is_modifier_active(&self, modifier: Modifier) -> bool {
        self.modifiers.is_active(modifier)
    }

    /// Releases a pending one-shot shift after a completed insertion.
    pub fn clear_oneshot(&mut self) -> bool {
        self.modifiers.clear_oneshot()
    }

    /// The glyph a key currently displays, under the active modifier flags.
    pub fn display_glyph(&self, key: &KeyElement) -> String {
        match key.literal() {
            Some(c) => self
                .modifiers
                .resolve_glyph(c, self.active_layout.is_thai())
                .to_string(),
            None => key.glyph.clone(),
        }
    }

    /// Resolves a key's activation semantics under the current modifier
    /// flags.
    ///
    /// Literal keys carry the glyph that would be displayed and inserted;
    /// control and modifier keys pass through. Returns `None` for keys
    /// without a resolvable value.
    pub fn resolve(&self, key: &KeyElement) -> Option<KeyClass> {
        match key.class? {
            KeyClass::Literal(c) => Some(KeyClass::Literal(
                self.modifiers
                    .resolve_glyph(c, self.active_layout.is_thai()),
            )),
            other => Some(other),
        }
    }
}

// ============================================================================
// Drag Tracking
// ============================================================================

/// Tracks a drag-to-reposition gesture on the keyboard panel.
///
/// On press the tracker records the cursor offset relative to the panel
/// position; while dragging, the panel follows the cursor minus that
/// offset. Pointer move and release messages are permanently routed and
/// gated by the `dragging` flag, so there is no listener to leak or to
/// detach with the wrong handler.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    dragging: bool,
    grab_offset: Vector,
}

impl DragTracker {
    /// Creates an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Begins a gesture: records the cursor offset relative to the panel.
    pub fn begin(&mut self, cursor: Point, panel_position: Point) {
        self.dragging = true;
        self.grab_offset = cursor - panel_position;
    }

    /// Tracks a pointer move; returns the new panel position while a
    /// gesture is active.
    pub fn update(&self, cursor: Point) -> Option<Point> {
        self.dragging.then(|| cursor - self.grab_offset)
    }

    /// Ends the gesture.
    pub fn end(&mut self) {
        self.dragging = false;
    }
}

// ============================================================================
// Tests
// ============================================================================
