//! Glyph definition documents
//!
//! A definition document is JSON with font metadata and a map of glyph
//! name to bitmap. Glyph order in the document is kept: codepoint
//! collisions resolve last-write-wins in that order.

use crate::font_source::metrics::FontMetadata;
use crate::geometry::bitmap::{BitmapRow, PixelGrid};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One authored glyph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphDefinition {
    #[serde(skip)]
    pub name: String,
    /// Rows top to bottom; absent for blank glyphs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitmap: Option<Vec<BitmapRow>>,
    /// Advance override in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advance_width: Option<i32>,
    /// Pixel rows from the baseline to the bottom row; negative for descenders
    #[serde(default, rename = "y_offset")]
    pub vertical_offset: i32,
}

impl GlyphDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_rows<S: AsRef<str>>(mut self, rows: &[S]) -> Self {
        self.bitmap = Some(rows.iter().map(|r| BitmapRow::from(r.as_ref())).collect());
        self
    }

    pub fn with_vertical_offset(mut self, vertical_offset: i32) -> Self {
        self.vertical_offset = vertical_offset;
        self
    }

    pub fn with_advance_width(mut self, advance_width: i32) -> Self {
        self.advance_width = Some(advance_width);
        self
    }

    /// Parsed bitmap, empty when none was authored
    pub fn grid(&self) -> PixelGrid {
        self.bitmap
            .as_deref()
            .map(PixelGrid::parse)
            .unwrap_or_default()
    }
}

/// Naming convention for alternate glyphs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingScheme {
    /// Suffix that marks a glyph as a variant of its base, e.g. `comma.prop`
    pub variant_suffix: String,
}

impl Default for NamingScheme {
    fn default() -> Self {
        Self {
            variant_suffix: ".prop".to_string(),
        }
    }
}

impl NamingScheme {
    pub fn is_variant(&self, name: &str) -> bool {
        self.base_name(name).is_some()
    }

    /// Base name of a variant, `None` for non-variants
    pub fn base_name<'a>(&self, name: &'a str) -> Option<&'a str> {
        name.strip_suffix(self.variant_suffix.as_str())
            .filter(|base| !base.is_empty())
    }
}

/// A whole definition document: metadata plus glyphs in document order
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphDocument {
    pub metadata: FontMetadata,
    pub glyphs: Vec<GlyphDefinition>,
}

#[derive(Deserialize)]
struct RawDocument {
    metadata: FontMetadata,
    glyphs: serde_json::Map<String, serde_json::Value>,
}

impl GlyphDocument {
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let raw: RawDocument = serde_json::from_str(contents).context("Invalid glyph document")?;

        let glyphs = raw
            .glyphs
            .into_iter()
            .map(|(name, value)| {
                let mut definition: GlyphDefinition = serde_json::from_value(value)
                    .with_context(|| format!("Invalid definition for glyph '{name}'"))?;
                definition.name = name;
                Ok(definition)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            metadata: raw.metadata,
            glyphs,
        })
    }

    /// Load a definition document from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let document = Self::from_json_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!(
            "Loaded {} glyph definitions from {}",
            document.glyphs.len(),
            path.display()
        );
        Ok(document)
    }

    pub fn get(&self, name: &str) -> Option<&GlyphDefinition> {
        self.glyphs.iter().rev().find(|glyph| glyph.name == name)
    }
}
