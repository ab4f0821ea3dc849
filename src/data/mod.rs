//! Glyph definition documents and UFO input/output

pub mod conversions;
pub mod definitions;
pub mod ufo;

pub use definitions::{GlyphDefinition, GlyphDocument, NamingScheme};
pub use ufo::{load_ufo_from_path, UfoGlyphSource, UfoSink};
