// SPDX-License-Identifier: GPL-3.0-only

//! Sizing calculations for the keyboard renderer.
//!
//! Keys are sized from a base unit derived from the panel dimensions and the
//! widest row, so the grid scales proportionally with the panel. Pixel
//! overrides ("20px") are multiplied by the HDPI scale factor.

use crate::layout::{KeyElement, Sizing};

/// Calculates the base unit size from the panel dimensions.
///
/// The base unit is the minimum of the width-based unit (panel width over
/// the widest row's unit count) and the height-based unit (panel height over
/// the total height units), so every row fits in both directions.
///
/// Returns a minimum of 1.0 to avoid degenerate sizes.
pub fn calculate_base_unit(
    surface_width: f32,
    surface_height: f32,
    max_row_width: f32,
    total_height_units: f32,
) -> f32 {
    if max_row_width <= 0.0
        || surface_width <= 0.0
        || total_height_units <= 0.0
        || surface_height <= 0.0
    {
        return 1.0;
    }

    let width_based_unit = surface_width / max_row_width;
    let height_based_unit = surface_height / total_height_units;
    width_based_unit.min(height_based_unit).max(1.0)
}

/// Sums the relative widths of a rendered row.
pub fn row_width_units(row: &[KeyElement]) -> f32 {
    row.iter().map(|key| key.width.as_relative()).sum()
}

/// The widest row of a rendered grid, in relative units.
///
/// Falls back to 1.0 for an empty grid to avoid division by zero.
pub fn max_row_width_units(rows: &[Vec<KeyElement>]) -> f32 {
    rows.iter()
        .map(|row| row_width_units(row))
        .fold(0.0_f32, f32::max)
        .max(1.0)
}

/// Sums the per-row maximum heights of a rendered grid.
pub fn total_height_units(rows: &[Vec<KeyElement>]) -> f32 {
    if rows.is_empty() {
        return 1.0;
    }

    rows.iter()
        .map(|row| {
            row.iter()
                .map(|key| key.height.as_relative())
                .fold(1.0_f32, f32::max)
        })
        .sum()
}

/// Resolves a sizing specification to a pixel value.
///
/// Relative sizes are multiples of the base unit; pixel sizes are scaled by
/// the HDPI factor. The result is always at least 1.0.
pub fn resolve_sizing(sizing: &Sizing, base_unit: f32, scale_factor: f32) -> f32 {
    let result = match sizing {
        Sizing::Relative(multiplier) => base_unit * multiplier,
        Sizing::Pixels(value) => parse_pixels(value) * scale_factor,
    };
    result.max(1.0)
}

/// Parses a pixel specification like "20px" into its numeric value.
///
/// Malformed values fall back to 0.0 (the caller's 1.0 floor applies).
pub fn parse_pixels(value: &str) -> f32 {
    value
        .trim()
        .strip_suffix("px")
        .unwrap_or(value.trim())
        .trim()
        .parse::<f32>()
        .unwrap_or(0.0)
}

// ============================================================================
// Tests
// ============================================================================
