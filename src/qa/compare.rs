//! Glyph comparison between two sources

use crate::core::errors::{DecodeError, LookupError};
use crate::geometry::decoder::{extract_glyph, GlyphSource, Padding};
use crate::geometry::PixelGrid;
use std::fmt;

/// One compared value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricComparison {
    pub metric: &'static str,
    pub first: i32,
    pub second: i32,
}

impl MetricComparison {
    pub fn matches(&self) -> bool {
        self.first == self.second
    }
}

/// Side-by-side comparison of one glyph in two sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonReport {
    pub glyph: String,
    pub first_source: String,
    pub second_source: String,
    pub metrics: Vec<MetricComparison>,
    pub first_bitmap: PixelGrid,
    pub second_bitmap: PixelGrid,
    pub first_vertical_offset: i32,
    pub second_vertical_offset: i32,
}

impl ComparisonReport {
    pub fn bitmaps_match(&self) -> bool {
        self.first_bitmap == self.second_bitmap
    }

    pub fn vertical_offsets_match(&self) -> bool {
        self.first_vertical_offset == self.second_vertical_offset
    }

    pub fn all_match(&self) -> bool {
        self.metrics.iter().all(MetricComparison::matches)
            && self.bitmaps_match()
            && self.vertical_offsets_match()
    }

    /// Metrics that differ
    pub fn mismatches(&self) -> impl Iterator<Item = &MetricComparison> {
        self.metrics.iter().filter(|m| !m.matches())
    }
}

fn short_label(label: &str) -> String {
    label.chars().take(20).collect()
}

fn mark(matches: bool) -> char {
    if matches {
        '\u{2713}'
    } else {
        '\u{2717}'
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Comparing '{}' between fonts:", self.glyph)?;
        writeln!(f)?;
        writeln!(
            f,
            "{:25} {:20} {:20}",
            "",
            short_label(&self.first_source),
            short_label(&self.second_source)
        )?;
        for metric in &self.metrics {
            writeln!(
                f,
                "{:25} {:<20} {:<20} {}",
                metric.metric,
                metric.first,
                metric.second,
                mark(metric.matches())
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Bitmap (visual check):")?;
        for row in self.first_bitmap.to_text_rows() {
            writeln!(f, "  \"{row}\"")?;
        }
        if !self.bitmaps_match() {
            writeln!(f)?;
            writeln!(f, "Bitmap from second font differs:")?;
            for row in self.second_bitmap.to_text_rows() {
                writeln!(f, "  \"{row}\"")?;
            }
        }
        if !self.vertical_offsets_match() {
            writeln!(f)?;
            writeln!(
                f,
                "y_offset differs: {} vs {}",
                self.first_vertical_offset, self.second_vertical_offset
            )?;
        }

        writeln!(f)?;
        if self.all_match() {
            write!(f, "Result: {} ALL METRICS MATCH", mark(true))
        } else {
            write!(f, "Result: {} METRICS DO NOT MATCH", mark(false))
        }
    }
}

struct GlyphMeasurement {
    values: [(&'static str, i32); 6],
    bitmap: PixelGrid,
    vertical_offset: i32,
}

fn measure(source: &dyn GlyphSource, glyph: &str, pixel_size: i32) -> Result<GlyphMeasurement, DecodeError> {
    if !source.has_glyph(glyph) {
        return Err(LookupError::new(glyph, source.source_name()).into());
    }

    let metrics = source.horizontal_metrics(glyph)?;
    let decoded = extract_glyph(source, glyph, pixel_size, Padding::FromOrigin)?;
    // Empty glyphs report zero bounds, as a compiled `glyf` table does
    let bounds = decoded.bounds.unwrap_or_default();

    Ok(GlyphMeasurement {
        values: [
            ("advance_width", metrics.advance_width),
            ("xMin", bounds.x_min.round() as i32),
            ("yMin", bounds.y_min.round() as i32),
            ("xMax", bounds.x_max.round() as i32),
            ("yMax", bounds.y_max.round() as i32),
            ("left_side_bearing", metrics.left_side_bearing),
        ],
        bitmap: decoded.bitmap,
        vertical_offset: decoded.vertical_offset,
    })
}

/// Decode `glyph` from both sources and line up their metrics
pub fn compare_glyph(
    glyph: &str,
    first: &dyn GlyphSource,
    second: &dyn GlyphSource,
    pixel_size: i32,
) -> Result<ComparisonReport, DecodeError> {
    let a = measure(first, glyph, pixel_size)?;
    let b = measure(second, glyph, pixel_size)?;

    let metrics = a
        .values
        .iter()
        .zip(b.values.iter())
        .map(|(&(metric, first), &(_, second))| MetricComparison {
            metric,
            first,
            second,
        })
        .collect();

    let report = ComparisonReport {
        glyph: glyph.to_string(),
        first_source: first.source_name(),
        second_source: second.source_name(),
        metrics,
        first_bitmap: a.bitmap,
        second_bitmap: b.bitmap,
        first_vertical_offset: a.vertical_offset,
        second_vertical_offset: b.vertical_offset,
    };

    if report.all_match() {
        tracing::debug!("'{}' matches in both sources", glyph);
    } else {
        tracing::info!(
            "'{}' differs: {} metrics, bitmap {}",
            glyph,
            report.mismatches().count(),
            if report.bitmaps_match() { "same" } else { "different" }
        );
    }

    Ok(report)
}
