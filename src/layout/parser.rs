// SPDX-License-Identifier: GPL-3.0-only

//! Layout parsing for the embedded JSON layout definitions.
//!
//! The parser is permissive: non-fatal issues (unknown key codes, empty
//! labels) are collected as warnings in the `ParseResult`, while fatal
//! problems (malformed JSON, duplicate key identifiers) return a
//! `ParseError`. Inheritance between layouts is resolved by the registry in
//! `layout::LayoutTable`, not here, since a single definition has no access
//! to its siblings.

use crate::layout::types::{KeyClass, Layout, ParseError, ParseResult, Severity, ValidationIssue};
use std::fs;

/// Parses a keyboard layout from a JSON file.
///
/// Distinguishes I/O errors (file not found, permission denied) from JSON
/// parsing errors, and validates the parsed grid.
pub fn parse_layout_file(path: &str) -> Result<ParseResult<Layout>, ParseError> {
    let json_str =
        fs::read_to_string(path).map_err(|e| ParseError::io_error_with_path(e, path))?;

    let layout: Layout = serde_json::from_str(&json_str)
        .map_err(|e| ParseError::json_error_with_path(e, path))?;

    validate_layout(layout).map_err(|e| match e {
        ParseError::ValidationError {
            issues,
            file_path: None,
        } => ParseError::ValidationError {
            issues,
            file_path: Some(path.to_string()),
        },
        other => other,
    })
}

/// Parses a keyboard layout from a JSON string.
pub fn parse_layout_from_string(json: &str) -> Result<ParseResult<Layout>, ParseError> {
    let layout: Layout = serde_json::from_str(json).map_err(ParseError::json_error)?;
    validate_layout(layout)
}

/// Validates a parsed layout, collecting warnings for non-fatal issues.
///
/// Fatal issues (duplicate identifiers) produce a `ParseError`; everything
/// else is returned as warnings alongside the layout.
fn validate_layout(layout: Layout) -> Result<ParseResult<Layout>, ParseError> {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if layout.rows.is_empty() && layout.inherits.is_none() {
        warnings.push(ValidationIssue::new(
            Severity::Warning,
            "layout has no rows and no base layout to inherit them from",
            "rows",
        ));
    }

    let mut seen_identifiers = std::collections::HashSet::new();
    for (row_index, row) in layout.rows.iter().enumerate() {
        if row.cells.is_empty() {
            warnings.push(ValidationIssue::new(
                Severity::Warning,
                "row has no cells",
                format!("rows[{}]", row_index),
            ));
        }

        for (cell_index, key) in row.cells.iter().enumerate() {
            let field_path = format!("rows[{}].cells[{}]", row_index, cell_index);

            if key.label.is_empty() {
                warnings.push(ValidationIssue::new(
                    Severity::Warning,
                    "key has an empty label",
                    field_path.clone(),
                ));
            }

            if KeyClass::classify(&key.code).is_none() {
                warnings.push(ValidationIssue::new(
                    Severity::Warning,
                    format!(
                        "key code {} is not resolvable; the key will render but ignore activation",
                        key.code
                    ),
                    field_path.clone(),
                ));
            }

            let identifier = key.effective_identifier();
            if !seen_identifiers.insert(identifier.clone()) {
                errors.push(ValidationIssue::new(
                    Severity::Error,
                    format!("duplicate key identifier '{}'", identifier),
                    field_path,
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(ParseResult::with_warnings(layout, warnings))
    } else {
        errors.extend(warnings);
        Err(ParseError::validation_error(errors))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::{KeyCode, LayoutId, ScrambleKind, Sizing};
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Test: parse a valid layout string
    #[test]
    fn test_parse_valid_json_string() {
        let json = r#"{
            "id": "numpad",
            "name": "Number pad",
            "version": "1.0",
            "rows": [
                {
                    "cells": [
                        {"label": "7", "code": "7"},
                        {"label": "8", "code": "8"}
                    ]
                }
            ]
        }"#;

        let result = parse_layout_from_string(json).expect("should parse valid JSON");
        assert_eq!(result.layout.id, LayoutId::Numpad);
        assert_eq!(result.layout.name, "Number pad");
        assert!(!result.has_warnings());

        let key = &result.layout.rows[0].cells[0];
        assert_eq!(key.code, KeyCode::Unicode('7'));
        assert_eq!(key.width, Sizing::Relative(1.0));
    }

    /// Test: keysym codes and sizing variants parse
    #[test]
    fn test_parse_keysyms_and_sizing() {
        let json = r#"{
            "id": "en",
            "name": "English",
            "rows": [
                {
                    "cells": [
                        {"label": "shift", "code": "Shift_L", "identifier": "shift", "width": 1.5},
                        {"label": "space", "code": "space", "identifier": "space", "width": "120px"}
                    ]
                }
            ]
        }"#;

        let result = parse_layout_from_string(json).expect("should parse");
        let cells = &result.layout.rows[0].cells;
        assert_eq!(cells[0].code, KeyCode::Keysym("Shift_L".to_string()));
        assert_eq!(cells[0].width, Sizing::Relative(1.5));
        assert_eq!(cells[1].width, Sizing::Pixels("120px".to_string()));
    }

    /// Test: scrambled variants declare their base and scramble kind
    #[test]
    fn test_parse_inherits_and_scramble() {
        let json = r#"{
            "id": "scNum",
            "name": "Number pad (scrambled)",
            "inherits": "numpad",
            "scramble": "digits",
            "rows": []
        }"#;

        let result = parse_layout_from_string(json).expect("should parse");
        assert_eq!(result.layout.inherits, Some(LayoutId::Numpad));
        assert_eq!(result.layout.scramble, Some(ScrambleKind::Digits));
        assert!(
            !result.has_warnings(),
            "empty rows are fine when a base layout is declared"
        );
    }

    /// Test: duplicate identifiers are fatal
    #[test]
    fn test_duplicate_identifiers_rejected() {
        let json = r#"{
            "id": "en",
            "name": "English",
            "rows": [
                {"cells": [{"label": "a", "code": "a"}, {"label": "a", "code": "a"}]}
            ]
        }"#;

        let err = parse_layout_from_string(json).expect_err("duplicates must fail");
        match err {
            ParseError::ValidationError { issues, .. } => {
                assert!(issues
                    .iter()
                    .any(|i| i.message.contains("duplicate key identifier 'a'")));
            }
            other => panic!("expected ValidationError, got {:?}", other),
        }
    }

    /// Test: unknown keysyms warn but do not fail
    #[test]
    fn test_unknown_keysym_warns() {
        let json = r#"{
            "id": "en",
            "name": "English",
            "rows": [
                {"cells": [{"label": "fn", "code": "Hyper_L"}]}
            ]
        }"#;

        let result = parse_layout_from_string(json).expect("unknown keysym is non-fatal");
        assert!(result.has_warnings());
        assert!(result.warnings[0].message.contains("not resolvable"));
    }

    /// Test: malformed JSON reports a line number
    #[test]
    fn test_malformed_json_with_line_number() {
        let json = r#"{
            "id": "en",
            "name":
        }"#;

        let err = parse_layout_from_string(json).expect_err("should fail");
        match err {
            ParseError::JsonError { line_number, .. } => {
                assert!(line_number.is_some(), "should include line number");
            }
            other => panic!("expected JsonError, got {:?}", other),
        }
    }

    /// Test: missing file reports an I/O error with path
    #[test]
    fn test_parse_missing_file() {
        let err = parse_layout_file("/nonexistent/path/to/layout.json")
            .expect_err("should fail for missing file");
        match err {
            ParseError::IoError { file_path, .. } => {
                assert_eq!(
                    file_path.as_deref(),
                    Some("/nonexistent/path/to/layout.json")
                );
            }
            other => panic!("expected IoError, got {:?}", other),
        }
    }

    /// Test: parse from a file on disk
    #[test]
    fn test_parse_layout_file_valid() {
        let json = r#"{
            "id": "th",
            "name": "Thai",
            "rows": [
                {"cells": [{"label": "ก", "code": "ก"}]}
            ]
        }"#;

        let mut temp_file = NamedTempFile::new().expect("failed to create temp file");
        temp_file
            .write_all(json.as_bytes())
            .expect("failed to write temp file");
        let path = temp_file.path().to_str().unwrap();

        let result = parse_layout_file(path).expect("should parse valid file");
        assert_eq!(result.layout.id, LayoutId::Th);
        assert_eq!(result.layout.rows[0].cells[0].code, KeyCode::Unicode('ก'));
    }
}
