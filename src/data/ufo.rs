//! UFO file I/O operations

use super::conversions::contour_to_bezpath;
use crate::core::errors::{DecodeError, LookupError};
use crate::font_source::{EncodedFont, FontSink};
use crate::geometry::decoder::{GlyphSource, HorizontalMetrics};
use crate::geometry::pen::{draw_bezpath, DrawingPen};
use anyhow::{Context, Result};
use kurbo::Shape;
use norad::Font;
use std::path::{Path, PathBuf};

/// Load a UFO font file from disk
pub fn load_ufo_from_path(path: impl AsRef<Path>) -> Result<Font> {
    let path = path.as_ref();
    let font = Font::load(path).with_context(|| format!("Failed to load UFO {}", path.display()))?;
    Ok(font)
}

/// Writes encoded fonts as UFO sources
pub struct UfoSink {
    path: PathBuf,
}

impl UfoSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FontSink for UfoSink {
    fn write_font(&mut self, font: &EncodedFont) -> Result<()> {
        let ufo = font.to_norad_font();
        ufo.save(&self.path)
            .with_context(|| format!("Failed to save UFO {}", self.path.display()))?;

        tracing::info!("Font saved to: {}", self.path.display());
        tracing::info!("  Glyphs: {}", font.glyphs.len());
        tracing::info!("  Units per em: {}", font.metadata.units_per_em);
        tracing::info!("  Pixel size: {} units", font.metadata.pixel_size);
        Ok(())
    }
}

/// A loaded UFO, readable glyph by glyph
pub struct UfoGlyphSource {
    font: Font,
    label: String,
}

impl UfoGlyphSource {
    pub fn new(font: Font, label: impl Into<String>) -> Self {
        Self {
            font,
            label: label.into(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let font = load_ufo_from_path(path)?;
        let label = font
            .font_info
            .family_name
            .clone()
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(font, label))
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    fn glyph(&self, name: &str) -> Result<&norad::Glyph, LookupError> {
        self.font
            .default_layer()
            .get_glyph(name)
            .ok_or_else(|| LookupError::new(name, self.label.clone()))
    }
}

impl GlyphSource for UfoGlyphSource {
    fn source_name(&self) -> String {
        self.label.clone()
    }

    fn has_glyph(&self, name: &str) -> bool {
        self.font.default_layer().get_glyph(name).is_some()
    }

    fn draw_glyph(&self, name: &str, pen: &mut dyn DrawingPen) -> Result<(), DecodeError> {
        let glyph = self.glyph(name)?;
        if !glyph.components.is_empty() {
            tracing::warn!(
                "Glyph '{}' in {} has components; only its contours are sampled",
                name,
                self.label
            );
        }
        // Open contours enclose nothing
        if let Some(index) = glyph.contours.iter().position(|contour| {
            contour
                .points
                .first()
                .is_some_and(|point| point.typ == norad::PointType::Move)
        }) {
            return Err(DecodeError::MalformedOutline {
                glyph: name.to_string(),
                reason: format!("contour {index} is open"),
            });
        }

        for contour in &glyph.contours {
            draw_bezpath(&contour_to_bezpath(contour), pen);
        }
        Ok(())
    }

    /// UFOs store no bearing; like a compiled `hmtx`, it is the outline's
    /// minimum x
    fn horizontal_metrics(&self, name: &str) -> Result<HorizontalMetrics, DecodeError> {
        let glyph = self.glyph(name)?;
        let left_side_bearing = glyph
            .contours
            .iter()
            .map(|contour| contour_to_bezpath(contour).bounding_box().x0)
            .reduce(f64::min)
            .unwrap_or(0.0);

        Ok(HorizontalMetrics {
            advance_width: glyph.width.round() as i32,
            left_side_bearing: left_side_bearing.round() as i32,
        })
    }

    fn character_map(&self) -> Vec<(char, String)> {
        let mut map: Vec<(char, String)> = self
            .font
            .default_layer()
            .iter()
            .flat_map(|glyph| {
                let name = glyph.name().to_string();
                glyph
                    .codepoints
                    .iter()
                    .map(move |c| (c, name.clone()))
                    .collect::<Vec<_>>()
            })
            .collect();
        map.sort();
        map
    }
}
