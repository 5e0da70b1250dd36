// SPDX-License-Identifier: GPL-3.0-only

//! Bound text fields and the active-binding registry.
//!
//! A `BoundField` is the keyboard's contract with a text target: a value, a
//! char-indexed selection range and a revision counter that serves as the
//! synthesized edit notification. Selections are tracked in characters, not
//! bytes, so caret arithmetic stays correct for Thai text.
//!
//! The `FieldRegistry` owns the application's fields and the binding: the
//! binding only moves on explicit field activation, never as a side effect
//! of keyboard interaction, so pressing keys cannot steal or clear it.

use std::ops::Range;

/// A text field the keyboard can write into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundField {
    id: String,
    multiline: bool,
    masked: bool,
    value: String,
    /// Selection in char indices; collapsed when `start == end`.
    selection: Range<usize>,
    revision: u64,
}

impl BoundField {
    /// Creates a single-line field with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            multiline: false,
            masked: false,
            value: String::new(),
            selection: 0..0,
            revision: 0,
        }
    }

    /// Marks the field as multi-line; enter inserts a newline.
    #[must_use]
    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    /// Marks the field as masked; the view renders bullets instead of text.
    #[must_use]
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    /// The field id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether enter may insert a newline here.
    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Whether the view should mask the value.
    pub fn is_masked(&self) -> bool {
        self.masked
    }

    /// The current text value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The value length in characters.
    pub fn len_chars(&self) -> usize {
        self.value.chars().count()
    }

    /// The current selection range in char indices.
    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    /// The caret position in char indices (the selection end).
    pub fn caret(&self) -> usize {
        self.selection.end
    }

    /// Edit notification counter; bumped on every completed mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Collapses the selection to a caret at `position`, clamped to the
    /// value length.
    pub fn set_caret(&mut self, position: usize) {
        let position = position.min(self.len_chars());
        self.selection = position..position;
    }

    /// Selects the char range `start..end`, clamped and ordered.
    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.len_chars();
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        self.selection = start.min(len)..end.min(len);
    }

    /// Splices `text` into the value at the selection, replacing any
    /// selected range, and leaves the caret immediately after the inserted
    /// text. Bumps the revision counter.
    pub fn insert(&mut self, text: &str) {
        let start = self.byte_offset(self.selection.start);
        let end = self.byte_offset(self.selection.end);
        self.value.replace_range(start..end, text);

        let caret = self.selection.start + text.chars().count();
        self.selection = caret..caret;
        self.revision += 1;
    }

    /// Removes the selection, or the character before the caret when the
    /// selection is collapsed.
    ///
    /// # Returns
    ///
    /// `true` if the value changed. Backspace at position zero is a no-op
    /// and does not notify.
    pub fn backspace(&mut self) -> bool {
        if self.selection.start < self.selection.end {
            let start = self.byte_offset(self.selection.start);
            let end = self.byte_offset(self.selection.end);
            self.value.replace_range(start..end, "");
            let caret = self.selection.start;
            self.selection = caret..caret;
            self.revision += 1;
            return true;
        }

        if self.selection.start == 0 {
            return false;
        }

        let remove_at = self.selection.start - 1;
        let start = self.byte_offset(remove_at);
        let end = self.byte_offset(self.selection.start);
        self.value.replace_range(start..end, "");
        self.selection = remove_at..remove_at;
        self.revision += 1;
        true
    }

    /// Converts a char index into a byte offset into the value.
    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.value.len())
    }
}

/// Owns the application's text fields and tracks which one is bound.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: Vec<BoundField>,
    active: Option<usize>,
}

impl FieldRegistry {
    /// Creates a registry over the given fields; nothing is bound yet.
    pub fn new(fields: Vec<BoundField>) -> Self {
        Self {
            fields,
            active: None,
        }
    }

    /// Binds the field with the given id, moving the active marker.
    ///
    /// # Returns
    ///
    /// `true` if the binding changed. Unknown ids leave the binding alone.
    pub fn bind(&mut self, id: &str) -> bool {
        let Some(index) = self.fields.iter().position(|field| field.id() == id) else {
            return false;
        };
        if self.active == Some(index) {
            return false;
        }
        self.active = Some(index);
        true
    }

    /// The id of the bound field, if any.
    pub fn active_id(&self) -> Option<&str> {
        self.active.map(|index| self.fields[index].id())
    }

    /// The bound field, if any.
    pub fn active(&self) -> Option<&BoundField> {
        self.active.map(|index| &self.fields[index])
    }

    /// Mutable access to the bound field, if any.
    pub fn active_mut(&mut self) -> Option<&mut BoundField> {
        self.active.map(|index| &mut self.fields[index])
    }

    /// Whether the field with the given id is the bound one.
    pub fn is_active(&self, id: &str) -> bool {
        self.active_id() == Some(id)
    }

    /// Looks up a field by id.
    pub fn get(&self, id: &str) -> Option<&BoundField> {
        self.fields.iter().find(|field| field.id() == id)
    }

    /// Mutable lookup by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut BoundField> {
        self.fields.iter_mut().find(|field| field.id() == id)
    }

    /// Iterates the fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &BoundField> {
        self.fields.iter()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: insertion at the caret advances it by the inserted length
    #[test]
    fn test_insert_at_caret() {
        let mut field = BoundField::new("username");
        field.insert("hello");
        assert_eq!(field.value(), "hello");
        assert_eq!(field.caret(), 5);

        field.set_caret(2);
        field.insert("xy");
        assert_eq!(field.value(), "hexyllo");
        assert_eq!(field.caret(), 4);
        assert_eq!(field.len_chars(), 7);
    }

    /// Test: caret math is char-based for Thai text
    #[test]
    fn test_insert_thai_char_boundaries() {
        let mut field = BoundField::new("username");
        field.insert("กข");
        assert_eq!(field.caret(), 2);

        field.set_caret(1);
        field.insert("ฏ");
        assert_eq!(field.value(), "กฏข");
        assert_eq!(field.caret(), 2);
    }

    /// Test: insertion replaces the selection
    #[test]
    fn test_insert_replaces_selection() {
        let mut field = BoundField::new("note").multiline();
        field.insert("abcdef");
        field.select(1, 4);
        field.insert("X");
        assert_eq!(field.value(), "aXef");
        assert_eq!(field.caret(), 2);
    }

    /// Test: backspace with a selection removes exactly the selected range
    #[test]
    fn test_backspace_selection() {
        let mut field = BoundField::new("note");
        field.insert("abcdef");
        field.select(2, 5);
        assert!(field.backspace());
        assert_eq!(field.value(), "abf");
        assert_eq!(field.caret(), 2, "caret lands at the selection start");
    }

    /// Test: collapsed backspace removes one character before the caret
    #[test]
    fn test_backspace_collapsed() {
        let mut field = BoundField::new("note");
        field.insert("กขค");
        field.set_caret(2);
        assert!(field.backspace());
        assert_eq!(field.value(), "กค");
        assert_eq!(field.caret(), 1);

        field.set_caret(0);
        assert!(!field.backspace(), "backspace at zero is a no-op");
        assert_eq!(field.value(), "กค");
    }

    /// Test: the revision counter notifies on every completed edit only
    #[test]
    fn test_revision_notification() {
        let mut field = BoundField::new("note");
        assert_eq!(field.revision(), 0);

        field.insert("a");
        assert_eq!(field.revision(), 1);

        field.backspace();
        assert_eq!(field.revision(), 2);

        // No-op backspace does not notify
        field.backspace();
        assert_eq!(field.revision(), 2);

        // Caret moves are not edits
        field.set_caret(0);
        assert_eq!(field.revision(), 2);
    }

    /// Test: selection clamps to the value and orders its endpoints
    #[test]
    fn test_selection_clamping() {
        let mut field = BoundField::new("note");
        field.insert("abc");

        field.select(5, 2);
        assert_eq!(field.selection(), 2..3);

        field.set_caret(99);
        assert_eq!(field.caret(), 3);
    }

    /// Test: the binding moves only on explicit activation
    #[test]
    fn test_registry_binding() {
        let mut registry = FieldRegistry::new(vec![
            BoundField::new("username"),
            BoundField::new("password").masked(),
        ]);
        assert_eq!(registry.active_id(), None);

        assert!(registry.bind("username"));
        assert!(registry.is_active("username"));

        // Rebinding the same field is not a change
        assert!(!registry.bind("username"));

        assert!(registry.bind("password"));
        assert!(registry.is_active("password"));
        assert!(!registry.is_active("username"));

        // Unknown ids leave the binding alone
        assert!(!registry.bind("missing"));
        assert_eq!(registry.active_id(), Some("password"));
    }

    /// Test: edits route to the bound field only
    #[test]
    fn test_registry_edits_target_bound_field() {
        let mut registry = FieldRegistry::new(vec![
            BoundField::new("username"),
            BoundField::new("password").masked(),
        ]);
        assert!(registry.active_mut().is_none(), "no binding, no target");

        registry.bind("username");
        registry.active_mut().unwrap().insert("u");
        assert_eq!(registry.get("username").unwrap().value(), "u");
        assert_eq!(registry.get("password").unwrap().value(), "");
    }
}
