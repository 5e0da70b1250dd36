// SPDX-License-Identifier: GPL-3.0-only

//! Input handling for the Cipherboard keyboard.
//!
//! This module tracks the modifier flags that drive glyph resolution and the
//! text fields the keyboard writes into.
//!
//! # Modules
//!
//! - **modifier**: shift/caps-lock state with the one-shot shift rule and
//!   glyph resolution (Latin case fold, Thai shift table).
//! - **binding**: bound text fields (value, char-indexed selection, revision
//!   counter) and the registry tracking which field receives edits.
//!
//! # Example
//!
//! ```rust,ignore
//! use cipherboard::input::{BoundField, FieldRegistry, ModifierState};
//! use cipherboard::layout::Modifier;
//!
//! let mut modifiers = ModifierState::new();
//! let mut fields = FieldRegistry::new(vec![BoundField::new("username")]);
//!
//! fields.bind("username");
//! modifiers.toggle(Modifier::Shift);
//!
//! let glyph = modifiers.resolve_glyph('a', false);
//! fields.active_mut().unwrap().insert(&glyph.to_string());
//! modifiers.clear_oneshot();
//! ```

// Sub-modules
pub mod binding;
pub mod modifier;

// Re-export public API
pub use binding::{BoundField, FieldRegistry};
pub use modifier::ModifierState;

// ============================================================================
// Module Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Modifier;

    /// Test: the shifted-glyph pipeline from modifier state into a field
    #[test]
    fn test_shifted_insert_pipeline() {
        let mut modifiers = ModifierState::new();
        let mut fields = FieldRegistry::new(vec![BoundField::new("username")]);
        fields.bind("username");

        modifiers.toggle(Modifier::Shift);
        let glyph = modifiers.resolve_glyph('a', false);
        fields.active_mut().unwrap().insert(&glyph.to_string());
        modifiers.clear_oneshot();

        assert_eq!(fields.get("username").unwrap().value(), "A");
        assert!(!modifiers.is_active(Modifier::Shift));

        // The next key is lowercase again
        let glyph = modifiers.resolve_glyph('b', false);
        fields.active_mut().unwrap().insert(&glyph.to_string());
        assert_eq!(fields.get("username").unwrap().value(), "Ab");
    }

    /// Test: with no binding, nothing receives edits
    #[test]
    fn test_no_binding_no_edits() {
        let mut fields = FieldRegistry::new(vec![BoundField::new("username")]);
        assert!(fields.active_mut().is_none());
        assert_eq!(fields.get("username").unwrap().revision(), 0);
    }
}
