//! Pixel Geometry: bitmaps, drawing, encoding and decoding

pub mod bitmap;
pub mod decoder;
pub mod encoder;
pub mod pen;

// Re-export commonly used items
pub use bitmap::{BitmapRow, PixelGrid};
pub use decoder::{decode_program, extract_glyph, DecodedGlyph, GlyphBounds, GlyphSource, HorizontalMetrics, Padding};
pub use encoder::{encode_bitmap, encode_into, EncodeParams, EncodedOutline, GlyphPlacement, LayoutMode, Rectangle};
pub use pen::{draw_bezpath, DrawingPen, OutlineProgram, PathOp};
