// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard layout definitions for Cipherboard.
//!
//! Layouts are defined as JSON under `resources/layouts/` and embedded into
//! the binary at compile time. The `LayoutTable` registry parses all six
//! built-in layouts once at startup and resolves the one-level `inherits`
//! relationship used by the scrambled variants, which borrow their key grid
//! from their base layout and only add a scramble kind.
//!
//! # Built-in layouts
//!
//! | id       | grid         | scramble |
//! |----------|--------------|----------|
//! | `en`     | QWERTY       | -        |
//! | `enSc`   | QWERTY       | latin    |
//! | `th`     | Kedmanee     | -        |
//! | `thSc`   | Kedmanee     | thai     |
//! | `numpad` | calculator   | -        |
//! | `scNum`  | calculator   | digits   |

// Sub-modules
pub mod parser;
pub mod scramble;
pub mod thai;
pub mod types;

// Re-export public API - Error handling types
pub use types::{ParseError, ParseResult, Severity, ValidationIssue};

// Re-export public API - Parser functions
pub use parser::{parse_layout_file, parse_layout_from_string};

// Re-export public API - Data structures
pub use types::{
    ControlKey, Key, KeyClass, KeyCode, KeyElement, Layout, LayoutId, Modifier, Row,
    ScrambleKind, Sizing,
};

use std::collections::HashMap;

// Embedded layout definitions.
const EN_LAYOUT: &str = include_str!("../../resources/layouts/en.json");
const EN_SCRAMBLED_LAYOUT: &str = include_str!("../../resources/layouts/en_scrambled.json");
const TH_LAYOUT: &str = include_str!("../../resources/layouts/th.json");
const TH_SCRAMBLED_LAYOUT: &str = include_str!("../../resources/layouts/th_scrambled.json");
const NUMPAD_LAYOUT: &str = include_str!("../../resources/layouts/numpad.json");
const NUMPAD_SCRAMBLED_LAYOUT: &str =
    include_str!("../../resources/layouts/numpad_scrambled.json");

/// Read-only registry mapping layout ids to their resolved definitions.
///
/// Loaded once at startup; immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct LayoutTable {
    layouts: HashMap<LayoutId, Layout>,
}

impl LayoutTable {
    /// Parses and resolves the six built-in layouts.
    ///
    /// Validation warnings are logged; a parse failure in any of the
    /// embedded definitions is an error since the data ships with the
    /// binary.
    pub fn builtin() -> Result<Self, ParseError> {
        let sources = [
            EN_LAYOUT,
            EN_SCRAMBLED_LAYOUT,
            TH_LAYOUT,
            TH_SCRAMBLED_LAYOUT,
            NUMPAD_LAYOUT,
            NUMPAD_SCRAMBLED_LAYOUT,
        ];

        let mut layouts = HashMap::new();
        for source in sources {
            let result = parse_layout_from_string(source)?;
            for warning in &result.warnings {
                tracing::warn!(layout = %result.layout.id, "layout warning: {warning}");
            }
            layouts.insert(result.layout.id, result.layout);
        }

        Self::resolve_inheritance(&mut layouts)?;
        Ok(Self { layouts })
    }

    /// An empty table; every lookup misses. Used as a last-resort fallback
    /// when the embedded definitions fail to load.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Copies the base layout's grid into every layout that declares
    /// `inherits` and no rows of its own. One level only.
    fn resolve_inheritance(layouts: &mut HashMap<LayoutId, Layout>) -> Result<(), ParseError> {
        let pending: Vec<(LayoutId, LayoutId)> = layouts
            .values()
            .filter(|layout| layout.rows.is_empty())
            .filter_map(|layout| layout.inherits.map(|base| (layout.id, base)))
            .collect();

        for (id, base) in pending {
            let base_rows = layouts
                .get(&base)
                .ok_or_else(|| ParseError::UnknownBase {
                    layout: id.as_str().to_string(),
                    base: base.as_str().to_string(),
                })?
                .rows
                .clone();
            if let Some(layout) = layouts.get_mut(&id) {
                layout.rows = base_rows;
            }
        }
        Ok(())
    }

    /// Looks up a layout by id.
    pub fn get(&self, id: LayoutId) -> Option<&Layout> {
        self.layouts.get(&id)
    }

    /// Number of registered layouts.
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    /// Whether the table holds no layouts.
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

// ============================================================================
// Registry Tests
// ============================================================================
