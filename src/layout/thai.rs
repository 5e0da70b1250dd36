// SPDX-License-Identifier: GPL-3.0-only

//! Static shift table for the Thai Kedmanee layout.
//!
//! The Kedmanee layout places a second alphabet on the shift plane: digits,
//! rarely used consonants and combining signs. Unlike Latin layouts there is
//! no case relationship between the two planes, so the mapping is plain
//! table data consulted in both directions.
//!
//! The table covers the printable keys of the Thai layout only and is
//! injective in both directions, which keeps the reverse lookup unambiguous
//! when a shifted grid has to be folded back to its base form.

/// Unshifted/shifted glyph pairs for the Thai Kedmanee layout.
///
/// Ordered by key position: number row, top row, home row, bottom row.
const THAI_SHIFT_PAIRS: [(char, char); 45] = [
    // Number row
    ('ๅ', '+'),
    ('/', '๑'),
    ('_', '๒'),
    ('ภ', '๓'),
    ('ถ', '๔'),
    ('\u{0E38}', '\u{0E39}'), // sara u -> sara uu
    ('\u{0E36}', '฿'),        // sara ue -> baht sign
    ('ค', '๕'),
    ('ต', '๖'),
    ('จ', '๗'),
    ('ข', '๘'),
    ('ช', '๙'),
    // Top row
    ('ๆ', '๐'),
    ('ไ', '"'),
    ('ำ', 'ฎ'),
    ('พ', 'ฑ'),
    ('ะ', 'ธ'),
    ('\u{0E31}', '\u{0E4D}'), // mai han-akat -> nikhahit
    ('\u{0E35}', '\u{0E4A}'), // sara ii -> mai tri
    ('ร', 'ณ'),
    ('น', 'ฯ'),
    ('ย', 'ญ'),
    ('บ', 'ฐ'),
    ('ล', ','),
    // Home row
    ('ฟ', 'ฤ'),
    ('ห', 'ฆ'),
    ('ก', 'ฏ'),
    ('ด', 'โ'),
    ('เ', 'ฌ'),
    ('\u{0E49}', '\u{0E47}'), // mai tho -> mai taikhu
    ('\u{0E48}', '\u{0E4B}'), // mai ek -> mai chattawa
    ('า', 'ษ'),
    ('ส', 'ศ'),
    ('ว', 'ซ'),
    ('ง', '.'),
    // Bottom row
    ('ผ', '('),
    ('ป', ')'),
    ('แ', 'ฉ'),
    ('อ', 'ฮ'),
    ('\u{0E34}', '\u{0E3A}'), // sara i -> phinthu
    ('\u{0E37}', '\u{0E4C}'), // sara uee -> thanthakhat
    ('ท', '?'),
    ('ม', 'ฒ'),
    ('ใ', 'ฬ'),
    ('ฝ', 'ฦ'),
];

/// Looks up the shifted counterpart of an unshifted Thai-layout glyph.
///
/// Returns `None` when the glyph has no shifted form; callers fall back to
/// the base glyph.
pub fn to_shifted(glyph: char) -> Option<char> {
    THAI_SHIFT_PAIRS
        .iter()
        .find(|(base, _)| *base == glyph)
        .map(|(_, shifted)| *shifted)
}

/// Looks up the unshifted counterpart of a shifted Thai-layout glyph.
pub fn to_base(glyph: char) -> Option<char> {
    THAI_SHIFT_PAIRS
        .iter()
        .find(|(_, shifted)| *shifted == glyph)
        .map(|(base, _)| *base)
}

/// Number of entries in the shift table.
pub fn table_len() -> usize {
    THAI_SHIFT_PAIRS.len()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Test: the table is injective in both directions
    #[test]
    fn test_table_is_injective() {
        let bases: HashSet<char> = THAI_SHIFT_PAIRS.iter().map(|(b, _)| *b).collect();
        let shifted: HashSet<char> = THAI_SHIFT_PAIRS.iter().map(|(_, s)| *s).collect();

        assert_eq!(
            bases.len(),
            THAI_SHIFT_PAIRS.len(),
            "base glyphs must be unique"
        );
        assert_eq!(
            shifted.len(),
            THAI_SHIFT_PAIRS.len(),
            "shifted glyphs must be unique"
        );
    }

    /// Test: every entry round-trips through both lookup directions
    #[test]
    fn test_bidirectional_roundtrip() {
        for (base, shifted) in THAI_SHIFT_PAIRS {
            assert_eq!(to_shifted(base), Some(shifted));
            assert_eq!(to_base(shifted), Some(base));
        }
    }

    /// Test: known Kedmanee pairs resolve correctly
    #[test]
    fn test_known_pairs() {
        assert_eq!(to_shifted('ก'), Some('ฏ'));
        assert_eq!(to_shifted('ฟ'), Some('ฤ'));
        assert_eq!(to_shifted('ส'), Some('ศ'));
        assert_eq!(to_base('ฏ'), Some('ก'));
        assert_eq!(to_base('๑'), Some('/'));
    }

    /// Test: glyphs outside the table fall through
    #[test]
    fn test_unmapped_glyphs() {
        assert_eq!(to_shifted('a'), None);
        assert_eq!(to_shifted('ฮ'), None, "ฮ only exists on the shift plane");
        assert_eq!(to_base('ก'), None, "ก only exists on the base plane");
    }

    /// Test: table size covers the printable Thai keys
    #[test]
    fn test_table_len() {
        assert_eq!(table_len(), 45);
    }
}
