// SPDX-License-Identifier: GPL-3.0-only

//! Shift and caps-lock state for the keyboard.
//!
//! The two flags are independent: the displayed glyph is derived from their
//! logical OR, and only shift is one-shot. The auto-clear condition after a
//! literal key is exactly `shift && !caps` — with caps lock held, a pending
//! shift stays armed.
//!
//! # Example
//!
//! ```rust,ignore
//! use cipherboard::input::ModifierState;
//! use cipherboard::layout::Modifier;
//!
//! let mut state = ModifierState::new();
//! state.toggle(Modifier::Shift);
//! assert_eq!(state.resolve_glyph('a', false), 'A');
//!
//! // ... literal key inserted ...
//! state.clear_oneshot();
//! assert!(!state.is_active(Modifier::Shift));
//! ```

use crate::layout::thai;
use crate::layout::Modifier;
use std::collections::HashSet;

/// Tracks the shift and caps-lock flags and resolves displayed glyphs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierState {
    /// Set of currently active modifiers
    active: HashSet<Modifier>,
}

impl ModifierState {
    /// Creates a new `ModifierState` with no active modifiers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            active: HashSet::new(),
        }
    }

    /// Toggles a modifier's state.
    ///
    /// # Returns
    ///
    /// `true` if the modifier is now active, `false` if it is now inactive.
    pub fn toggle(&mut self, modifier: Modifier) -> bool {
        if self.active.remove(&modifier) {
            false
        } else {
            self.active.insert(modifier);
            true
        }
    }

    /// Deactivates a modifier.
    pub fn deactivate(&mut self, modifier: Modifier) {
        self.active.remove(&modifier);
    }

    /// Checks if a modifier is currently active.
    #[must_use]
    pub fn is_active(&self, modifier: Modifier) -> bool {
        self.active.contains(&modifier)
    }

    /// Whether either shift or caps lock is active.
    ///
    /// The displayed glyph plane is the logical OR of the two flags.
    #[must_use]
    pub fn any_active(&self) -> bool {
        !self.active.is_empty()
    }

    /// Releases a pending one-shot shift after a completed literal key.
    ///
    /// Shift is cleared only when it is active and caps lock is not; caps
    /// lock itself never auto-clears.
    ///
    /// # Returns
    ///
    /// `true` if shift was released.
    pub fn clear_oneshot(&mut self) -> bool {
        if self.is_active(Modifier::Shift) && !self.is_active(Modifier::CapsLock) {
            self.active.remove(&Modifier::Shift);
            true
        } else {
            false
        }
    }

    /// Clears all modifiers.
    pub fn clear_all(&mut self) {
        self.active.clear();
    }

    /// Resolves the glyph a literal key displays and inserts under the
    /// current modifier flags.
    ///
    /// With neither flag active the base glyph passes through. Otherwise
    /// Latin layouts case-fold, and Thai layouts substitute through the
    /// Kedmanee shift table, falling back to the base glyph for entries the
    /// table does not cover.
    #[must_use]
    pub fn resolve_glyph(&self, base: char, thai_layout: bool) -> char {
        if !self.any_active() {
            return base;
        }

        if thai_layout {
            thai::to_shifted(base).unwrap_or(base)
        } else {
            base.to_uppercase().next().unwrap_or(base)
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test basic toggling of both flags
    #[test]
    fn test_toggle() {
        let mut state = ModifierState::new();

        assert!(state.toggle(Modifier::Shift));
        assert!(state.is_active(Modifier::Shift));

        assert!(!state.toggle(Modifier::Shift));
        assert!(!state.is_active(Modifier::Shift));

        assert!(state.toggle(Modifier::CapsLock));
        assert!(state.is_active(Modifier::CapsLock));
        assert!(!state.is_active(Modifier::Shift), "flags are independent");
    }

    /// Test: toggling twice restores every derived glyph
    #[test]
    fn test_toggle_pair_idempotent() {
        let mut state = ModifierState::new();
        let before: Vec<char> = "abcก".chars().map(|c| state.resolve_glyph(c, false)).collect();

        state.toggle(Modifier::Shift);
        state.toggle(Modifier::Shift);

        let after: Vec<char> = "abcก".chars().map(|c| state.resolve_glyph(c, false)).collect();
        assert_eq!(before, after);
    }

    /// Test: the exact one-shot condition is `shift && !caps`
    #[test]
    fn test_oneshot_clear_condition() {
        // Neither active: nothing to clear
        let mut state = ModifierState::new();
        assert!(!state.clear_oneshot());

        // Shift only: clears
        state.toggle(Modifier::Shift);
        assert!(state.clear_oneshot());
        assert!(!state.is_active(Modifier::Shift));

        // Shift and caps: shift stays armed
        state.toggle(Modifier::Shift);
        state.toggle(Modifier::CapsLock);
        assert!(!state.clear_oneshot());
        assert!(state.is_active(Modifier::Shift));
        assert!(state.is_active(Modifier::CapsLock));

        // Caps only: never auto-clears
        state.deactivate(Modifier::Shift);
        assert!(!state.clear_oneshot());
        assert!(state.is_active(Modifier::CapsLock));
    }

    /// Test: Latin resolution is the OR of the two flags
    #[test]
    fn test_latin_resolution() {
        let mut state = ModifierState::new();
        assert_eq!(state.resolve_glyph('a', false), 'a');

        state.toggle(Modifier::Shift);
        assert_eq!(state.resolve_glyph('a', false), 'A');
        assert_eq!(state.resolve_glyph('1', false), '1', "digits have no case");

        state.toggle(Modifier::Shift);
        state.toggle(Modifier::CapsLock);
        assert_eq!(state.resolve_glyph('q', false), 'Q');

        // Both active still resolves uppercase
        state.toggle(Modifier::Shift);
        assert_eq!(state.resolve_glyph('z', false), 'Z');
    }

    /// Test: Thai resolution goes through the shift table with fallback
    #[test]
    fn test_thai_resolution() {
        let mut state = ModifierState::new();
        assert_eq!(state.resolve_glyph('ก', true), 'ก');

        state.toggle(Modifier::Shift);
        assert_eq!(state.resolve_glyph('ก', true), 'ฏ');
        assert_eq!(state.resolve_glyph('ฟ', true), 'ฤ');
        // Glyphs outside the table fall back to the base form
        assert_eq!(state.resolve_glyph('ฮ', true), 'ฮ');

        // Caps lock alone also selects the shift plane
        state.toggle(Modifier::Shift);
        state.toggle(Modifier::CapsLock);
        assert_eq!(state.resolve_glyph('ก', true), 'ฏ');
    }

    /// Test clear_all resets both flags
    #[test]
    fn test_clear_all() {
        let mut state = ModifierState::new();
        state.toggle(Modifier::Shift);
        state.toggle(Modifier::CapsLock);

        state.clear_all();
        assert!(!state.any_active());
    }
}
