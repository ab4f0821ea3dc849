//! Font source building
//!
//! This module turns an ordered glyph definition list into a complete
//! encoded glyph set: catalog, validation, per-glyph encoding and the
//! substitution features handed to the feature compiler.

pub mod builder;
pub mod catalog;
pub mod features;
pub mod metrics;
pub mod validation;

// Explicit re-exports for public API
pub use builder::{build_font, BuildOptions, EncodedFont, EncodedGlyph, FontSink};
pub use catalog::{codepoint_for_name, GlyphCatalog, NOTDEF, SPACE};
pub use metrics::FontMetadata;
pub use validation::{validate_bitmap, FontVariant, RowCountPolicy, RowCountRule, ValidationPolicy};
