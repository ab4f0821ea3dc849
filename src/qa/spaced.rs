//! Spaced-out glyph detection
//!
//! Punctuation and symbols drawn narrower than the cell leave blank columns
//! at their sides. These are the candidates for proportional variants.

use crate::geometry::decoder::{extract_glyph, GlyphSource, Padding};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Widest ink that still counts as spaced out; the cell is 5 pixels
pub const DEFAULT_MAX_WIDTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacedGlyph {
    pub name: String,
    pub width: usize,
    /// Code point as `U+XXXX`
    pub unicode: String,
}

/// Punctuation (P*) or symbol (S*) general category
fn is_punctuation_or_symbol(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::ConnectorPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::OtherPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::MathSymbol
            | GeneralCategory::CurrencySymbol
            | GeneralCategory::ModifierSymbol
            | GeneralCategory::OtherSymbol
    )
}

/// Mapped punctuation and symbol glyphs whose ink is at most `max_width`
/// pixels wide, in code point order
pub fn find_spaced_glyphs(source: &dyn GlyphSource, pixel_size: i32, max_width: usize) -> Vec<SpacedGlyph> {
    let mut candidates: Vec<(char, String)> = source
        .character_map()
        .into_iter()
        .filter(|(c, _)| is_punctuation_or_symbol(*c))
        .collect();
    candidates.sort();

    let mut spaced = Vec::new();
    for (c, name) in candidates {
        let decoded = match extract_glyph(source, &name, pixel_size, Padding::FromOrigin) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!("Could not process glyph '{}': {}", name, e);
                continue;
            }
        };

        let width = decoded.bitmap.ink_width();
        if width > 0 && width <= max_width {
            spaced.push(SpacedGlyph {
                name,
                width,
                unicode: format!("U+{:04X}", c as u32),
            });
        }
    }

    tracing::info!("Found {} spaced-out glyphs in {}", spaced.len(), source.source_name());
    spaced
}

/// Write the findings as pretty-printed JSON
pub fn write_spaced_glyphs(glyphs: &[SpacedGlyph], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(glyphs)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Results written to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::definitions::{GlyphDefinition, GlyphDocument};
    use crate::font_source::{build_font, BuildOptions, FontMetadata};
    use pretty_assertions::assert_eq;

    fn document() -> GlyphDocument {
        GlyphDocument {
            metadata: FontMetadata::default(),
            glyphs: vec![
                GlyphDefinition::new("period")
                    .with_rows(&["     ", "     ", "     ", "     ", "     ", "  #  "]),
                GlyphDefinition::new("colon")
                    .with_rows(&["     ", "  #  ", "     ", "     ", "     ", "  #  "]),
                GlyphDefinition::new("hyphen")
                    .with_rows(&["     ", "     ", "#####", "     ", "     ", "     "]),
                GlyphDefinition::new("i")
                    .with_rows(&["  #  ", "     ", "  #  ", "  #  ", "  #  ", "  #  "]),
                GlyphDefinition::new("parenleft")
                    .with_rows(&["   # ", "  #  ", "  #  ", "  #  ", "  #  ", "   # "]),
            ],
        }
    }

    #[test]
    fn test_finds_narrow_punctuation_in_codepoint_order() {
        let font = build_font(&document(), &BuildOptions::default()).unwrap();
        let spaced = find_spaced_glyphs(&font, 50, DEFAULT_MAX_WIDTH);

        let found: Vec<(&str, usize, &str)> = spaced
            .iter()
            .map(|g| (g.name.as_str(), g.width, g.unicode.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                ("parenleft", 2, "U+0028"),
                ("period", 1, "U+002E"),
                ("colon", 1, "U+003A"),
            ]
        );
    }

    #[test]
    fn test_max_width_threshold() {
        let font = build_font(&document(), &BuildOptions::default()).unwrap();
        let spaced = find_spaced_glyphs(&font, 50, 1);
        assert!(spaced.iter().all(|g| g.width == 1));
        assert_eq!(spaced.len(), 2);
    }

    #[test]
    fn test_private_use_and_marks_are_not_punctuation() {
        let mut document = document();
        document.glyphs.extend([
            GlyphDefinition::new("uniE000")
                .with_rows(&["     ", "  #  ", "  #  ", "  #  ", "  #  ", "     "]),
            GlyphDefinition::new("uni0301")
                .with_rows(&["   # ", "  #  ", "     ", "     ", "     ", "     "]),
            GlyphDefinition::new("uni00B0")
                .with_rows(&[" ##  ", " ##  ", "     ", "     ", "     ", "     "]),
        ]);
        let font = build_font(&document, &BuildOptions::default()).unwrap();
        let spaced = find_spaced_glyphs(&font, 50, DEFAULT_MAX_WIDTH);

        let names: Vec<&str> = spaced.iter().map(|g| g.name.as_str()).collect();
        assert!(!names.contains(&"uniE000"));
        assert!(!names.contains(&"uni0301"));
        // Degree sign is an other symbol (So)
        assert!(names.contains(&"uni00B0"));
    }

    #[test]
    fn test_category_filter() {
        for c in ['.', '-', '(', '«', '_', '+', '$', '^', '©'] {
            assert!(is_punctuation_or_symbol(c), "{c:?}");
        }
        for c in ['a', '7', ' ', '\u{E000}', '\u{0301}', '\u{200B}', '\u{0378}'] {
            assert!(!is_punctuation_or_symbol(c), "{c:?}");
        }
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spaced.json");
        let glyphs = vec![SpacedGlyph {
            name: "period".to_string(),
            width: 1,
            unicode: "U+002E".to_string(),
        }];
        write_spaced_glyphs(&glyphs, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let read: Vec<SpacedGlyph> = serde_json::from_str(&text).unwrap();
        assert_eq!(read, glyphs);
        assert!(text.contains("\"unicode\": \"U+002E\""));
    }
}
