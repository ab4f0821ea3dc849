//! Outline-to-pixel decoding
//!
//! Samples a drawn glyph back onto a pixel grid: one sample at the center of
//! every pixel, even-odd membership across all contours. Sampling at centers
//! makes the result independent of how the outline was decomposed.

use super::bitmap::PixelGrid;
use super::pen::{DrawingPen, OutlineProgram, PathOp};
use crate::core::errors::DecodeError;
use serde::Serialize;

/// Closed polygon as a list of points
pub type Contour = Vec<(f64, f64)>;

/// Outline bounds in font units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GlyphBounds {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

/// Advance width and left side bearing as stored by a font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HorizontalMetrics {
    pub advance_width: i32,
    pub left_side_bearing: i32,
}

/// Anything that can draw named glyphs and report their metrics
pub trait GlyphSource {
    /// Human-readable name used in reports and errors
    fn source_name(&self) -> String;

    fn has_glyph(&self, name: &str) -> bool;

    /// Draw the named glyph into `pen`
    fn draw_glyph(&self, name: &str, pen: &mut dyn DrawingPen) -> Result<(), DecodeError>;

    fn horizontal_metrics(&self, name: &str) -> Result<HorizontalMetrics, DecodeError>;

    /// Mapped characters and their glyph names, in codepoint order
    fn character_map(&self) -> Vec<(char, String)>;
}

/// How far the sampled grid reaches to the left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Padding {
    /// Start at x = 0, so the left side bearing shows up as blank columns
    #[default]
    FromOrigin,
    /// Start at the outline's left edge
    Tight,
}

/// Sampled bitmap of one glyph
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedGlyph {
    pub bitmap: PixelGrid,
    /// Pixel rows between the baseline and the bottom of the bitmap
    pub vertical_offset: i32,
    pub bounds: Option<GlyphBounds>,
}

/// Split a recording into point lists at move and close boundaries
pub fn extract_contours(program: &OutlineProgram) -> Vec<Contour> {
    let mut contours = Vec::new();
    let mut current: Contour = Vec::new();

    for op in program.ops() {
        match *op {
            PathOp::MoveTo(x, y) => {
                if !current.is_empty() {
                    contours.push(std::mem::take(&mut current));
                }
                current.push((x, y));
            }
            PathOp::LineTo(x, y) => current.push((x, y)),
            PathOp::Close => {
                if !current.is_empty() {
                    contours.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        contours.push(current);
    }

    contours
}

/// Ray-casting membership test (even-odd)
pub fn point_in_polygon(x: f64, y: f64, polygon: &[(f64, f64)]) -> bool {
    let n = polygon.len();
    if n == 0 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = polygon[i];
        let (xj, yj) = polygon[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Bounding box over every contour point
pub fn contour_bounds(contours: &[Contour]) -> Option<GlyphBounds> {
    let mut points = contours.iter().flatten();
    let &(x, y) = points.next()?;
    let mut bounds = GlyphBounds {
        x_min: x,
        y_min: y,
        x_max: x,
        y_max: y,
    };
    for &(x, y) in points {
        bounds.x_min = bounds.x_min.min(x);
        bounds.y_min = bounds.y_min.min(y);
        bounds.x_max = bounds.x_max.max(x);
        bounds.y_max = bounds.y_max.max(y);
    }
    Some(bounds)
}

/// Sample a recorded outline onto a pixel grid
pub fn decode_program(
    program: &OutlineProgram,
    pixel_size: i32,
    padding: Padding,
) -> Result<DecodedGlyph, DecodeError> {
    if pixel_size <= 0 {
        return Err(DecodeError::InvalidPixelSize(pixel_size));
    }

    let contours = extract_contours(program);
    let Some(bounds) = contour_bounds(&contours) else {
        return Ok(DecodedGlyph::default());
    };

    let size = pixel_size as f64;
    let half = size / 2.0;

    let (start_col, columns) = match padding {
        Padding::FromOrigin => (0.0, (bounds.x_max / size).floor()),
        Padding::Tight => (
            (bounds.x_min / size).floor(),
            ((bounds.x_max - bounds.x_min) / size).floor(),
        ),
    };
    let rows = ((bounds.y_max - bounds.y_min) / size).floor();
    let columns = columns.max(0.0) as usize;
    let rows = rows.max(0.0) as usize;

    let cells = (0..rows)
        .map(|row| {
            let y = bounds.y_max - row as f64 * size - half;
            (0..columns)
                .map(|col| {
                    let x = (start_col + col as f64) * size + half;
                    let hits = contours
                        .iter()
                        .filter(|contour| point_in_polygon(x, y, contour))
                        .count();
                    hits % 2 == 1
                })
                .collect()
        })
        .collect();

    Ok(DecodedGlyph {
        bitmap: PixelGrid::from_cells(cells),
        vertical_offset: (bounds.y_min / size).floor() as i32,
        bounds: Some(bounds),
    })
}

/// Draw a glyph from `source` and sample it
pub fn extract_glyph(
    source: &dyn GlyphSource,
    glyph_name: &str,
    pixel_size: i32,
    padding: Padding,
) -> Result<DecodedGlyph, DecodeError> {
    let mut program = OutlineProgram::new();
    source.draw_glyph(glyph_name, &mut program)?;
    let decoded = decode_program(&program, pixel_size, padding)?;
    tracing::debug!(
        "Decoded '{}' from {}: {}x{} at offset {}",
        glyph_name,
        source.source_name(),
        decoded.bitmap.width(),
        decoded.bitmap.height(),
        decoded.vertical_offset
    );
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::encoder::{encode_bitmap, EncodeParams, LayoutMode};

    fn decode_rows(rows: &[&str], pixel_size: i32, vertical_offset: i32) -> DecodedGlyph {
        let grid = PixelGrid::from_text_rows(rows);
        let params = EncodeParams::new(pixel_size, LayoutMode::Legacy).with_vertical_offset(vertical_offset);
        let encoded = encode_bitmap(&grid, &params);
        decode_program(&encoded.program, pixel_size, Padding::FromOrigin).unwrap()
    }

    #[test]
    fn test_round_trip_hollow_box() {
        let rows = ["#####", "#   #", "#   #", "#   #", "#####"];
        let decoded = decode_rows(&rows, 50, 0);
        assert_eq!(decoded.bitmap.to_text_rows(), rows);
        assert_eq!(decoded.vertical_offset, 0);
    }

    #[test]
    fn test_round_trip_descender() {
        let rows = [" ### ", "#   #", "#   #", " ####", "    #", "    #", " ### "];
        let decoded = decode_rows(&rows, 50, -2);
        assert_eq!(decoded.bitmap.to_text_rows(), rows);
        assert_eq!(decoded.vertical_offset, -2);
    }

    #[test]
    fn test_round_trip_other_pixel_sizes() {
        let rows = ["# #", " # ", "# #"];
        for pixel_size in [1, 2, 7, 64, 100] {
            let decoded = decode_rows(&rows, pixel_size, 3);
            assert_eq!(decoded.bitmap.to_text_rows(), rows, "pixel size {pixel_size}");
            assert_eq!(decoded.vertical_offset, 3);
        }
    }

    #[test]
    fn test_padding_keeps_leading_blank_columns() {
        let rows = ["  #", "  #"];
        let grid = PixelGrid::from_text_rows(&rows);
        let encoded = encode_bitmap(&grid, &EncodeParams::new(50, LayoutMode::Legacy));

        let padded = decode_program(&encoded.program, 50, Padding::FromOrigin).unwrap();
        assert_eq!(padded.bitmap.to_text_rows(), rows);

        let tight = decode_program(&encoded.program, 50, Padding::Tight).unwrap();
        assert_eq!(tight.bitmap.to_text_rows(), vec!["#", "#"]);
    }

    #[test]
    fn test_empty_program_is_blank_glyph() {
        let decoded = decode_program(&OutlineProgram::new(), 50, Padding::FromOrigin).unwrap();
        assert!(decoded.bitmap.is_empty());
        assert_eq!(decoded.vertical_offset, 0);
        assert!(decoded.bounds.is_none());
    }

    #[test]
    fn test_overlapping_contours_cancel() {
        let mut program = OutlineProgram::new();
        for _ in 0..2 {
            program.move_to(0.0, 0.0);
            program.line_to(0.0, 10.0);
            program.line_to(10.0, 10.0);
            program.line_to(10.0, 0.0);
            program.close();
        }
        let decoded = decode_program(&program, 10, Padding::FromOrigin).unwrap();
        assert_eq!(decoded.bitmap.to_text_rows(), vec![" "]);
    }

    #[test]
    fn test_rejects_non_positive_pixel_size() {
        let result = decode_program(&OutlineProgram::new(), 0, Padding::Tight);
        assert!(matches!(result, Err(DecodeError::InvalidPixelSize(0))));
    }

    #[test]
    fn test_point_in_polygon() {
        let square = vec![(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)];
        assert!(point_in_polygon(5.0, 5.0, &square));
        assert!(!point_in_polygon(15.0, 5.0, &square));
        assert!(!point_in_polygon(5.0, -1.0, &square));
        assert!(!point_in_polygon(5.0, 5.0, &[]));
    }
}
