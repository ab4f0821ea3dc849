//! Pixel bitmap parsing
//!
//! Glyph sources describe bitmaps either as text rows (`"#   #"`) or as
//! numeric rows (`[1, 0, 0, 0, 1]`). Both forms normalize to a [`PixelGrid`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of a bitmap as written in a glyph definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BitmapRow {
    /// `#` or `1` is on, any other character is off
    Text(String),
    /// Non-zero is on
    Cells(Vec<i64>),
}

impl BitmapRow {
    /// Width of the row in pixels, as authored
    pub fn width(&self) -> usize {
        match self {
            BitmapRow::Text(text) => text.chars().count(),
            BitmapRow::Cells(cells) => cells.len(),
        }
    }

    fn to_cells(&self) -> Vec<bool> {
        match self {
            BitmapRow::Text(text) => text.chars().map(|c| c == '#' || c == '1').collect(),
            BitmapRow::Cells(cells) => cells.iter().map(|&v| v != 0).collect(),
        }
    }
}

impl From<&str> for BitmapRow {
    fn from(text: &str) -> Self {
        BitmapRow::Text(text.to_string())
    }
}

/// Rectangular on/off grid, rows top to bottom
///
/// Rows shorter than the widest row are padded with off cells. The authored
/// width of every row is kept so the validator can report it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelGrid {
    cells: Vec<Vec<bool>>,
    row_widths: Vec<usize>,
    width: usize,
}

impl PixelGrid {
    /// Parse authored rows. Never fails: unknown characters are off.
    pub fn parse(rows: &[BitmapRow]) -> Self {
        let row_widths: Vec<usize> = rows.iter().map(BitmapRow::width).collect();
        let width = row_widths.iter().copied().max().unwrap_or(0);
        let cells = rows
            .iter()
            .map(|row| {
                let mut cells = row.to_cells();
                cells.resize(width, false);
                cells
            })
            .collect();

        Self {
            cells,
            row_widths,
            width,
        }
    }

    /// Convenience for text rows
    pub fn from_text_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let rows: Vec<BitmapRow> = rows.iter().map(|r| BitmapRow::from(r.as_ref())).collect();
        Self::parse(&rows)
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Width of the widest row
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Authored width of each row
    pub fn row_widths(&self) -> &[usize] {
        &self.row_widths
    }

    pub fn is_on(&self, row: usize, col: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// Iterate the (row, col) of every on cell, row-major
    pub fn on_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, &on)| on)
                .map(move |(col, _)| (row, col))
        })
    }

    pub fn count_on(&self) -> usize {
        self.on_cells().count()
    }

    /// Width of the inked area: rightmost on column minus leftmost plus one
    pub fn ink_width(&self) -> usize {
        let mut min_col = usize::MAX;
        let mut max_col = None;
        for (_, col) in self.on_cells() {
            min_col = min_col.min(col);
            max_col = Some(max_col.map_or(col, |m: usize| m.max(col)));
        }
        max_col.map_or(0, |max| max - min_col + 1)
    }

    /// Render rows as `#`/space text, the form used in glyph definitions
    pub fn to_text_rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|cells| cells.iter().map(|&on| if on { '#' } else { ' ' }).collect())
            .collect()
    }

    pub(crate) fn from_cells(cells: Vec<Vec<bool>>) -> Self {
        let width = cells.iter().map(Vec::len).max().unwrap_or(0);
        let row_widths = cells.iter().map(Vec::len).collect();
        Self {
            cells,
            row_widths,
            width,
        }
    }
}

impl fmt::Display for PixelGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_text_rows() {
            writeln!(f, "  \"{row}\"")?;
        }
        Ok(())
    }
}
