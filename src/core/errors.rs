//! Error types for glyph validation, font building and glyph extraction
//!
//! Library code returns these typed errors. The command line wraps them in
//! `anyhow` with extra context at the edges.

use thiserror::Error;

/// A bitmap that breaks a row-width or row-count rule.
///
/// Shape errors are fatal to the enclosing font build: the authoring
/// collaborator needs a complete, consistent glyph set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("Glyph '{glyph}' has inconsistent row widths: {widths:?}")]
    InconsistentWidths { glyph: String, widths: Vec<usize> },

    #[error("Glyph '{glyph}' row {row} has width {width}, expected {expected}")]
    RowWidth {
        glyph: String,
        row: usize,
        width: usize,
        expected: usize,
    },

    #[error("Glyph '{glyph}' has {actual} rows, expected {expected}")]
    RowCount {
        glyph: String,
        actual: usize,
        expected: String,
    },
}

impl ShapeError {
    /// Name of the glyph that failed validation
    pub fn glyph(&self) -> &str {
        match self {
            ShapeError::InconsistentWidths { glyph, .. }
            | ShapeError::RowWidth { glyph, .. }
            | ShapeError::RowCount { glyph, .. } => glyph,
        }
    }
}

/// A glyph name that is not present in a font's glyph set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Glyph '{glyph}' not found in {source_name}")]
pub struct LookupError {
    pub glyph: String,
    pub source_name: String,
}

impl LookupError {
    pub fn new(glyph: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self {
            glyph: glyph.into(),
            source_name: source_name.into(),
        }
    }
}

/// Failure of a whole catalog build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("Pixel size must be positive, got {0}")]
    InvalidPixelSize(i32),
}

/// Failure to extract or compare a single glyph.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Glyph '{glyph}' has an unreadable outline: {reason}")]
    MalformedOutline { glyph: String, reason: String },

    #[error("Pixel size must be positive, got {0}")]
    InvalidPixelSize(i32),
}
