// SPDX-License-Identifier: GPL-3.0-only

//! Core data types for keyboard layouts.
//!
//! This module defines the types for parsing keyboard layout definitions from
//! embedded JSON, the tagged key classification used for activation dispatch,
//! and the error types for layout parsing and validation.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Error Handling Types
// ============================================================================

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal error that prevents the layout from being used
    Error,
    /// Non-fatal issue that should be addressed
    Warning,
}

/// A validation issue discovered during layout parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Severity level (Error or Warning)
    pub severity: Severity,
    /// Human-readable description of the issue
    pub message: String,
    /// Path to the field that caused the issue (e.g., "rows[1].cells[2]")
    pub field_path: String,
}

impl ValidationIssue {
    /// Creates a new validation issue.
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        field_path: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            message: message.into(),
            field_path: field_path.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity_str = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
        };
        write!(f, "[{}] {}: {}", severity_str, self.field_path, self.message)
    }
}

/// Error type for layout parsing operations.
#[derive(Debug)]
pub enum ParseError {
    /// I/O error occurred while reading a layout file
    IoError {
        /// The underlying I/O error
        source: std::io::Error,
        /// Optional file path that caused the error
        file_path: Option<String>,
    },

    /// JSON parsing error
    JsonError {
        /// The underlying JSON parsing error
        source: serde_json::Error,
        /// Optional file path being parsed
        file_path: Option<String>,
        /// Line number where the error occurred (from serde_json)
        line_number: Option<usize>,
    },

    /// Validation errors found during parsing
    ValidationError {
        /// List of validation issues found
        issues: Vec<ValidationIssue>,
        /// Optional file path being validated
        file_path: Option<String>,
    },

    /// A layout inherits its grid from a base layout that is not registered
    UnknownBase {
        /// The layout declaring the `inherits` field
        layout: String,
        /// The missing base layout id
        base: String,
    },
}

impl ParseError {
    /// Creates an I/O error with context.
    pub fn io_error(source: std::io::Error) -> Self {
        Self::IoError {
            source,
            file_path: None,
        }
    }

    /// Creates an I/O error with file path.
    pub fn io_error_with_path(source: std::io::Error, file_path: impl Into<String>) -> Self {
        Self::IoError {
            source,
            file_path: Some(file_path.into()),
        }
    }

    /// Creates a JSON parsing error with context.
    pub fn json_error(source: serde_json::Error) -> Self {
        let line_number = source.line().into();
        Self::JsonError {
            source,
            file_path: None,
            line_number,
        }
    }

    /// Creates a JSON parsing error with file path.
    pub fn json_error_with_path(source: serde_json::Error, file_path: impl Into<String>) -> Self {
        let line_number = source.line().into();
        Self::JsonError {
            source,
            file_path: Some(file_path.into()),
            line_number,
        }
    }

    /// Creates a validation error from a list of issues.
    pub fn validation_error(issues: Vec<ValidationIssue>) -> Self {
        Self::ValidationError {
            issues,
            file_path: None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::IoError { source, file_path } => {
                write!(f, "I/O error")?;
                if let Some(path) = file_path {
                    write!(f, " reading file '{}'", path)?;
                }
                write!(f, ": {}", source)
            }
            ParseError::JsonError {
                source,
                file_path,
                line_number,
            } => {
                write!(f, "JSON parsing error")?;
                if let Some(path) = file_path {
                    write!(f, " in file '{}'", path)?;
                }
                if let Some(line) = line_number {
                    write!(f, " at line {}", line)?;
                }
                write!(f, ": {}", source)
            }
            ParseError::ValidationError { issues, file_path } => {
                write!(f, "Validation failed")?;
                if let Some(path) = file_path {
                    write!(f, " for file '{}'", path)?;
                }
                writeln!(f, " with {} issue(s):", issues.len())?;
                for (i, issue) in issues.iter().enumerate() {
                    write!(f, "  {}. {}", i + 1, issue)?;
                    if i < issues.len() - 1 {
                        writeln!(f)?;
                    }
                }
                Ok(())
            }
            ParseError::UnknownBase { layout, base } => {
                write!(
                    f,
                    "Layout '{}' inherits from unknown base layout '{}'",
                    layout, base
                )
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::IoError { source, .. } => Some(source),
            ParseError::JsonError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        Self::io_error(err)
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::json_error(err)
    }
}

// ============================================================================
// ParseResult Type
// ============================================================================

/// Result of successfully parsing a layout with optional warnings.
///
/// This struct allows the parser to operate in permissive mode, returning
/// a valid layout even when non-fatal validation issues are found.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult<T> {
    /// The successfully parsed layout
    pub layout: T,
    /// Non-fatal validation warnings
    pub warnings: Vec<ValidationIssue>,
}

impl<T> ParseResult<T> {
    /// Creates a new parse result with no warnings.
    pub fn new(layout: T) -> Self {
        Self {
            layout,
            warnings: Vec::new(),
        }
    }

    /// Creates a new parse result with warnings.
    pub fn with_warnings(layout: T, warnings: Vec<ValidationIssue>) -> Self {
        Self { layout, warnings }
    }

    /// Returns true if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Consumes the result and returns the layout, discarding warnings.
    pub fn into_layout(self) -> T {
        self.layout
    }
}

// ============================================================================
// Layout Identifiers
// ============================================================================

/// Identifier for a built-in keyboard layout.
///
/// The string forms are the stable ids used in layout JSON and user
/// configuration: `en`, `enSc`, `th`, `thSc`, `numpad`, `scNum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutId {
    /// English QWERTY
    #[serde(rename = "en")]
    En,
    /// English QWERTY with scrambled letter keys
    #[serde(rename = "enSc")]
    EnScrambled,
    /// Thai Kedmanee
    #[serde(rename = "th")]
    Th,
    /// Thai Kedmanee with scrambled consonant keys
    #[serde(rename = "thSc")]
    ThScrambled,
    /// Numeric pad
    #[serde(rename = "numpad")]
    Numpad,
    /// Numeric pad with scrambled digit keys
    #[serde(rename = "scNum")]
    NumpadScrambled,
}

impl LayoutId {
    /// All built-in layout ids in selector order.
    pub const ALL: [LayoutId; 6] = [
        LayoutId::En,
        LayoutId::EnScrambled,
        LayoutId::Th,
        LayoutId::ThScrambled,
        LayoutId::Numpad,
        LayoutId::NumpadScrambled,
    ];

    /// The stable string id used in layout JSON and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutId::En => "en",
            LayoutId::EnScrambled => "enSc",
            LayoutId::Th => "th",
            LayoutId::ThScrambled => "thSc",
            LayoutId::Numpad => "numpad",
            LayoutId::NumpadScrambled => "scNum",
        }
    }

    /// Parses a stable string id back into a layout id.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.as_str() == s)
    }

    /// Untranslated human-readable name (the UI localizes separately).
    pub fn title(&self) -> &'static str {
        match self {
            LayoutId::En => "English",
            LayoutId::EnScrambled => "English (scrambled)",
            LayoutId::Th => "Thai",
            LayoutId::ThScrambled => "Thai (scrambled)",
            LayoutId::Numpad => "Number pad",
            LayoutId::NumpadScrambled => "Number pad (scrambled)",
        }
    }

    /// Whether the Thai shift table applies to this layout.
    pub fn is_thai(&self) -> bool {
        matches!(self, LayoutId::Th | LayoutId::ThScrambled)
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Layout Data Structures
// ============================================================================

/// Key code representation for keyboard keys.
///
/// Keys can emit either Unicode characters or named keysyms (like modifiers).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyCode {
    /// Regular character key (e.g., 'a', '1', 'ก')
    Unicode(char),
    /// Named keysym for modifiers and control keys (e.g., "Shift_L", "BackSpace")
    Keysym(String),
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Unicode(c) => write!(f, "'{}'", c),
            KeyCode::Keysym(s) => write!(f, "Keysym({})", s),
        }
    }
}

impl Default for KeyCode {
    fn default() -> Self {
        KeyCode::Unicode(' ')
    }
}

/// Sizing specification for keys.
///
/// Supports both relative sizing (multiples of the base unit) and
/// DPI-aware pixel overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sizing {
    /// Relative size multiplier (1.0 = standard size)
    Relative(f32),
    /// Pixel override with DPI-aware scaling (format: "20px")
    Pixels(String),
}

impl Default for Sizing {
    fn default() -> Self {
        Sizing::Relative(1.0)
    }
}

impl Sizing {
    /// Returns the relative value for layout calculations.
    ///
    /// For Pixels sizing, returns 1.0 as a default unit contribution.
    pub fn as_relative(&self) -> f32 {
        match self {
            Sizing::Relative(r) => *r,
            Sizing::Pixels(_) => 1.0,
        }
    }
}

/// Keyboard modifier keys.
///
/// Shift is one-shot: it releases after the next literal key unless caps
/// lock is also active. Caps lock is a toggle and never auto-releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Modifier {
    /// Shift modifier (one-shot)
    Shift,
    /// Caps lock modifier (toggle)
    CapsLock,
}

/// Control keys that edit structure without going through the cipher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlKey {
    /// Remove the selection, or one character before the caret
    Backspace,
    /// Insert a space character
    Space,
    /// Insert a tab character
    Tab,
    /// Insert a newline (multi-line fields only)
    Enter,
}

/// Semantic classification of a key, used for activation dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyClass {
    /// Inserts a character into the bound field via the cipher round trip
    Literal(char),
    /// Edits structure directly (backspace, space, tab, enter)
    Control(ControlKey),
    /// Affects glyph resolution, inserts nothing
    Modifier(Modifier),
}

impl KeyClass {
    /// Classifies a key code into its activation semantics.
    ///
    /// Returns `None` for keysym names this keyboard does not understand;
    /// such keys render but their activation is ignored.
    pub fn classify(code: &KeyCode) -> Option<KeyClass> {
        match code {
            KeyCode::Unicode(c) => Some(KeyClass::Literal(*c)),
            KeyCode::Keysym(name) => match name.as_str() {
                "BackSpace" => Some(KeyClass::Control(ControlKey::Backspace)),
                "space" => Some(KeyClass::Control(ControlKey::Space)),
                "Tab" => Some(KeyClass::Control(ControlKey::Tab)),
                "Return" => Some(KeyClass::Control(ControlKey::Enter)),
                "Shift_L" | "Shift_R" => Some(KeyClass::Modifier(Modifier::Shift)),
                "Caps_Lock" => Some(KeyClass::Modifier(Modifier::CapsLock)),
                _ => None,
            },
        }
    }
}

/// A keyboard key definition as parsed from layout JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    /// Display label shown on the key
    pub label: String,

    /// Key code emitted when pressed
    #[serde(default)]
    pub code: KeyCode,

    /// Optional identifier for state lookups and scramble denylists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    /// Width sizing
    #[serde(default)]
    pub width: Sizing,

    /// Height sizing
    #[serde(default)]
    pub height: Sizing,
}

impl Default for Key {
    fn default() -> Self {
        Self {
            label: String::new(),
            code: KeyCode::default(),
            identifier: None,
            width: Sizing::default(),
            height: Sizing::default(),
        }
    }
}

impl Key {
    /// The effective identifier for state lookups: the explicit identifier
    /// if set, otherwise the label.
    pub fn effective_identifier(&self) -> String {
        self.identifier.clone().unwrap_or_else(|| self.label.clone())
    }
}

/// A horizontal row of keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Keys in left-to-right order
    pub cells: Vec<Key>,
}

/// Which scramble pass applies to a layout after rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrambleKind {
    /// Relabel the digit keys with a permutation of 0-9
    #[serde(rename = "digits")]
    Digits,
    /// Relabel the letter keys with a permutation of a-z
    #[serde(rename = "latin")]
    Latin,
    /// Relabel the consonant keys with a permutation of the Thai consonants
    #[serde(rename = "thai")]
    Thai,
}

/// A keyboard layout definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Stable layout id
    pub id: LayoutId,

    /// Human-readable layout name
    pub name: String,

    /// Layout format version
    #[serde(default)]
    pub version: String,

    /// Base layout this layout borrows its grid from (one level only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherits: Option<LayoutId>,

    /// Scramble pass applied on every render of this layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scramble: Option<ScrambleKind>,

    /// Key grid, top row first
    #[serde(default)]
    pub rows: Vec<Row>,
}

// ============================================================================
// Rendered Key Elements
// ============================================================================

/// A rendered key element: displayed glyph, semantic value and sizing.
///
/// Key elements are rebuilt from the active layout on every render and are
/// never persisted; scramble passes relabel them in place.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyElement {
    /// Identifier for activation routing and scramble denylists
    pub identifier: String,
    /// Displayed base glyph (before modifier resolution)
    pub glyph: String,
    /// Semantic classification; `None` if the key code is not resolvable
    pub class: Option<KeyClass>,
    /// Width sizing
    pub width: Sizing,
    /// Height sizing
    pub height: Sizing,
}

impl KeyElement {
    /// Builds a rendered key element from a layout key definition.
    pub fn from_key(key: &Key) -> Self {
        Self {
            identifier: key.effective_identifier(),
            glyph: key.label.clone(),
            class: KeyClass::classify(&key.code),
            width: key.width.clone(),
            height: key.height.clone(),
        }
    }

    /// The literal character value of this key, if it is a literal key.
    pub fn literal(&self) -> Option<char> {
        match self.class {
            Some(KeyClass::Literal(c)) => Some(c),
            _ => None,
        }
    }

    /// Relabels this key element with a scrambled symbol, replacing both
    /// the displayed glyph and the semantic value.
    pub fn relabel(&mut self, symbol: char) {
        self.glyph = symbol.to_string();
        self.class = Some(KeyClass::Literal(symbol));
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: layout ids round-trip through their string form
    #[test]
    fn test_layout_id_string_roundtrip() {
        for id in LayoutId::ALL {
            let parsed = LayoutId::from_str(id.as_str());
            assert_eq!(parsed, Some(id), "id '{}' should round-trip", id);
        }
        assert_eq!(LayoutId::from_str("qwerty"), None);
    }

    /// Test: the Thai table only applies to the Thai layouts
    #[test]
    fn test_layout_id_thai_scope() {
        assert!(LayoutId::Th.is_thai());
        assert!(LayoutId::ThScrambled.is_thai());
        assert!(!LayoutId::En.is_thai());
        assert!(!LayoutId::EnScrambled.is_thai());
        assert!(!LayoutId::Numpad.is_thai());
        assert!(!LayoutId::NumpadScrambled.is_thai());
    }

    /// Test: classification dispatch for all key kinds
    #[test]
    fn test_key_classification() {
        assert_eq!(
            KeyClass::classify(&KeyCode::Unicode('a')),
            Some(KeyClass::Literal('a'))
        );
        assert_eq!(
            KeyClass::classify(&KeyCode::Unicode('ก')),
            Some(KeyClass::Literal('ก'))
        );
        assert_eq!(
            KeyClass::classify(&KeyCode::Keysym("BackSpace".to_string())),
            Some(KeyClass::Control(ControlKey::Backspace))
        );
        assert_eq!(
            KeyClass::classify(&KeyCode::Keysym("space".to_string())),
            Some(KeyClass::Control(ControlKey::Space))
        );
        assert_eq!(
            KeyClass::classify(&KeyCode::Keysym("Tab".to_string())),
            Some(KeyClass::Control(ControlKey::Tab))
        );
        assert_eq!(
            KeyClass::classify(&KeyCode::Keysym("Return".to_string())),
            Some(KeyClass::Control(ControlKey::Enter))
        );
        assert_eq!(
            KeyClass::classify(&KeyCode::Keysym("Shift_L".to_string())),
            Some(KeyClass::Modifier(Modifier::Shift))
        );
        assert_eq!(
            KeyClass::classify(&KeyCode::Keysym("Caps_Lock".to_string())),
            Some(KeyClass::Modifier(Modifier::CapsLock))
        );
        assert_eq!(KeyClass::classify(&KeyCode::Keysym("Hyper_L".to_string())), None);
    }

    /// Test: key element construction and scramble relabeling
    #[test]
    fn test_key_element_relabel() {
        let key = Key {
            label: "a".to_string(),
            code: KeyCode::Unicode('a'),
            ..Key::default()
        };
        let mut element = KeyElement::from_key(&key);
        assert_eq!(element.identifier, "a");
        assert_eq!(element.literal(), Some('a'));

        element.relabel('q');
        assert_eq!(element.glyph, "q");
        assert_eq!(element.literal(), Some('q'));
        // Identifier is positional and survives relabeling
        assert_eq!(element.identifier, "a");
    }

    /// Test: effective identifier falls back to the label
    #[test]
    fn test_effective_identifier() {
        let with_id = Key {
            label: "⌫".to_string(),
            identifier: Some("backspace".to_string()),
            ..Key::default()
        };
        assert_eq!(with_id.effective_identifier(), "backspace");

        let without_id = Key {
            label: "b".to_string(),
            ..Key::default()
        };
        assert_eq!(without_id.effective_identifier(), "b");
    }

    /// Test: validation issue and parse error Display formatting
    #[test]
    fn test_error_display() {
        let issue = ValidationIssue::new(Severity::Error, "duplicate identifier", "rows[0]");
        assert_eq!(format!("{}", issue), "[ERROR] rows[0]: duplicate identifier");

        let err = ParseError::validation_error(vec![issue]);
        let rendered = format!("{}", err);
        assert!(rendered.contains("Validation failed"));
        assert!(rendered.contains("duplicate identifier"));

        let err = ParseError::UnknownBase {
            layout: "enSc".to_string(),
            base: "en".to_string(),
        };
        assert!(format!("{}", err).contains("unknown base layout 'en'"));
    }
}
