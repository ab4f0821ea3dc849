//! Pixel-to-outline encoding
//!
//! Every on pixel becomes one square contour. Adjacent pixels are not
//! merged; overlapping edges are left to the renderer's fill rule.
//! All arithmetic is integer, so identical input always yields an
//! identical program.

use super::bitmap::PixelGrid;
use super::pen::{DrawingPen, OutlineProgram};
use serde::{Deserialize, Serialize};

/// Horizontal placement strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Bitmap at the origin, one pixel of trailing space
    Legacy,
    /// Bitmap centered in an advance two pixels wider than it
    Centered,
}

impl LayoutMode {
    /// Pixels added to the bitmap width for the default advance
    pub fn spacing(self) -> i32 {
        match self {
            LayoutMode::Legacy => 1,
            LayoutMode::Centered => 2,
        }
    }

    /// Default advance of a glyph with no bitmap, in pixels
    pub fn blank_advance(self, cell_width: usize) -> i32 {
        match self {
            LayoutMode::Legacy => 4,
            LayoutMode::Centered => cell_width as i32 + self.spacing(),
        }
    }
}

/// Horizontal and vertical metrics of an encoded glyph, in font units
/// except `vertical_offset` which is in pixel rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GlyphPlacement {
    pub advance_width: i32,
    pub vertical_offset: i32,
    pub left_side_bearing: i32,
}

/// One pixel square in font units, y up from the baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    /// Trace the rectangle as a closed counter-clockwise contour
    pub fn draw<P: DrawingPen + ?Sized>(&self, pen: &mut P) {
        let (x, y) = (self.x as f64, self.y as f64);
        let (w, h) = (self.width as f64, self.height as f64);
        pen.move_to(x, y);
        pen.line_to(x, y + h);
        pen.line_to(x + w, y + h);
        pen.line_to(x + w, y);
        pen.close();
    }
}

/// Inputs to the encoder besides the grid itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeParams {
    /// Font units per bitmap pixel
    pub pixel_size: i32,
    /// Pixel rows between the baseline and the bottom row of the bitmap
    pub vertical_offset: i32,
    /// Explicit advance in pixels, overriding the layout default
    pub advance_width: Option<i32>,
    pub layout: LayoutMode,
    /// Canonical fixed-pitch bitmap width in pixels
    pub cell_width: usize,
}

impl EncodeParams {
    pub fn new(pixel_size: i32, layout: LayoutMode) -> Self {
        Self {
            pixel_size,
            vertical_offset: 0,
            advance_width: None,
            layout,
            cell_width: 5,
        }
    }

    pub fn with_vertical_offset(mut self, vertical_offset: i32) -> Self {
        self.vertical_offset = vertical_offset;
        self
    }

    pub fn with_advance_width(mut self, advance_width: Option<i32>) -> Self {
        self.advance_width = advance_width;
        self
    }

    pub fn with_cell_width(mut self, cell_width: usize) -> Self {
        self.cell_width = cell_width;
        self
    }
}

/// Result of encoding one bitmap
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedOutline {
    pub rectangles: Vec<Rectangle>,
    pub program: OutlineProgram,
    pub placement: GlyphPlacement,
}

/// Decompose a grid into one rectangle per on pixel, before any
/// horizontal shift
pub fn bitmap_to_rectangles(grid: &PixelGrid, pixel_size: i32, vertical_offset: i32) -> Vec<Rectangle> {
    let height = grid.height() as i32;
    grid.on_cells()
        .map(|(row, col)| Rectangle {
            // Row 0 is the top of the bitmap; font y grows upward
            x: col as i32 * pixel_size,
            y: (vertical_offset + height - 1 - row as i32) * pixel_size,
            width: pixel_size,
            height: pixel_size,
        })
        .collect()
}

/// Encode a grid, drawing contours into `pen` and returning the rectangles
/// and placement
pub fn encode_into<P: DrawingPen + ?Sized>(
    grid: &PixelGrid,
    params: &EncodeParams,
    pen: &mut P,
) -> (Vec<Rectangle>, GlyphPlacement) {
    let pixel_size = params.pixel_size;

    if grid.is_empty() {
        let advance = params
            .advance_width
            .unwrap_or_else(|| params.layout.blank_advance(params.cell_width));
        let placement = GlyphPlacement {
            advance_width: advance * pixel_size,
            vertical_offset: params.vertical_offset,
            left_side_bearing: 0,
        };
        return (Vec::new(), placement);
    }

    let mut rectangles = bitmap_to_rectangles(grid, pixel_size, params.vertical_offset);

    let bitmap_width = grid.width() as i32;
    let advance_width = params
        .advance_width
        .unwrap_or(bitmap_width + params.layout.spacing())
        * pixel_size;

    let x_offset = match params.layout {
        LayoutMode::Legacy => 0,
        LayoutMode::Centered => (advance_width - bitmap_width * pixel_size).div_euclid(2),
    };
    for rect in &mut rectangles {
        rect.x += x_offset;
    }

    let left_side_bearing = rectangles
        .iter()
        .map(|r| r.x)
        .min()
        .unwrap_or(x_offset);

    for rect in &rectangles {
        rect.draw(pen);
    }

    let placement = GlyphPlacement {
        advance_width,
        vertical_offset: params.vertical_offset,
        left_side_bearing,
    };
    (rectangles, placement)
}

/// Encode a grid into a recorded [`OutlineProgram`]
pub fn encode_bitmap(grid: &PixelGrid, params: &EncodeParams) -> EncodedOutline {
    let mut program = OutlineProgram::new();
    let (rectangles, placement) = encode_into(grid, params, &mut program);
    EncodedOutline {
        rectangles,
        program,
        placement,
    }
}
