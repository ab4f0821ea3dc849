//! Quality checks on built fonts
//!
//! Both checks read glyphs back through a `GlyphSource` and sample them onto
//! the pixel grid, so they work the same on a fresh build and on a UFO.

pub mod compare;
pub mod spaced;

pub use compare::{compare_glyph, ComparisonReport, MetricComparison};
pub use spaced::{find_spaced_glyphs, write_spaced_glyphs, SpacedGlyph};
