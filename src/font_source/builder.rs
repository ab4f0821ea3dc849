//! Font building
//!
//! Runs the catalog and then parse → validate → encode for every glyph the
//! font needs. The first malformed glyph aborts the build: a partial glyph
//! set is never handed to the font-authoring collaborator.

use super::catalog::{GlyphCatalog, NOTDEF, SPACE};
use super::features::substitution_features;
use super::metrics::FontMetadata;
use super::validation::{validate_bitmap, FontVariant, RowCountPolicy, ValidationPolicy};
use crate::core::errors::{BuildError, DecodeError, LookupError, ShapeError};
use crate::data::definitions::{GlyphDefinition, GlyphDocument, NamingScheme};
use crate::geometry::decoder::{GlyphSource, HorizontalMetrics};
use crate::geometry::encoder::{encode_bitmap, EncodeParams, GlyphPlacement, LayoutMode, Rectangle};
use crate::geometry::pen::{DrawingPen, OutlineProgram};

/// Options for one build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub variant: FontVariant,
    pub layout: LayoutMode,
    pub naming: NamingScheme,
    /// Canonical fixed-pitch bitmap width in pixels
    pub cell_width: usize,
    pub row_counts: Vec<RowCountPolicy>,
    /// Feature tag for variant substitutions
    pub feature_tag: String,
}

impl BuildOptions {
    /// Fixed-pitch fonts center their glyphs; proportional fonts use the
    /// legacy left-aligned layout
    pub fn for_variant(variant: FontVariant) -> Self {
        let layout = match variant {
            FontVariant::FixedPitch => LayoutMode::Centered,
            FontVariant::Proportional => LayoutMode::Legacy,
        };
        Self {
            variant,
            layout,
            naming: NamingScheme::default(),
            cell_width: 5,
            row_counts: vec![RowCountPolicy::extended_symbols()],
            feature_tag: "ss01".to_string(),
        }
    }

    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            variant: self.variant,
            cell_width: self.cell_width,
            row_counts: self.row_counts.clone(),
        }
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::for_variant(FontVariant::FixedPitch)
    }
}

/// One glyph ready for the font-authoring collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedGlyph {
    pub name: String,
    pub program: OutlineProgram,
    pub placement: GlyphPlacement,
    pub codepoints: Vec<char>,
}

/// A complete, consistent glyph set plus everything needed to author a font
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFont {
    pub metadata: FontMetadata,
    pub catalog: GlyphCatalog,
    /// One entry per `catalog.glyph_order` name, in that order
    pub glyphs: Vec<EncodedGlyph>,
    /// Unmapped variant glyphs that substitutions point at
    pub auxiliary_glyphs: Vec<EncodedGlyph>,
    /// Substitution rules in feature syntax; empty when there are none
    pub features: String,
}

impl EncodedFont {
    pub fn glyph(&self, name: &str) -> Option<&EncodedGlyph> {
        self.glyphs
            .iter()
            .chain(&self.auxiliary_glyphs)
            .find(|glyph| glyph.name == name)
    }

    /// Every glyph the font file must contain
    pub fn all_glyphs(&self) -> impl Iterator<Item = &EncodedGlyph> {
        self.glyphs.iter().chain(&self.auxiliary_glyphs)
    }
}

/// Receives a finished font. Implementations serialize it.
pub trait FontSink {
    fn write_font(&mut self, font: &EncodedFont) -> anyhow::Result<()>;
}

/// Build every glyph of `document` for one font variant
pub fn build_font(document: &GlyphDocument, options: &BuildOptions) -> Result<EncodedFont, BuildError> {
    let pixel_size = document.metadata.pixel_size;
    if pixel_size <= 0 {
        return Err(BuildError::InvalidPixelSize(pixel_size));
    }

    let catalog = GlyphCatalog::build(&document.glyphs, options.variant, &options.naming);
    let policy = options.validation_policy();
    let encoder = GlyphEncoder {
        options,
        policy: &policy,
        metadata: &document.metadata,
    };

    let mut glyphs = Vec::with_capacity(catalog.glyph_order.len());
    for name in &catalog.glyph_order {
        let definition = catalog
            .definition_name(name)
            .and_then(|source| document.get(source));

        let mut glyph = match (name.as_str(), definition) {
            (SPACE, _) => encoder.space(definition),
            (NOTDEF, Some(definition)) if definition.bitmap.is_some() => {
                encoder.encode(name, definition)?
            }
            (NOTDEF, _) => encoder.notdef(),
            (_, Some(definition)) => encoder.encode(name, definition)?,
            (_, None) => encoder.encode(name, &GlyphDefinition::new(name.as_str()))?,
        };
        glyph.codepoints = catalog.codepoints_for(name);
        glyphs.push(glyph);
    }

    let mut auxiliary_glyphs = Vec::with_capacity(catalog.substitutions.len());
    for variant_name in catalog.substitutions.values() {
        if let Some(definition) = document.get(variant_name) {
            auxiliary_glyphs.push(encoder.encode(variant_name, definition)?);
        }
    }

    let features = substitution_features(&options.feature_tag, &catalog.substitutions);

    tracing::info!(
        "Built {} glyphs ({} substitution targets) for {:?}",
        glyphs.len(),
        auxiliary_glyphs.len(),
        options.variant
    );

    Ok(EncodedFont {
        metadata: document.metadata.clone(),
        catalog,
        glyphs,
        auxiliary_glyphs,
        features,
    })
}

struct GlyphEncoder<'a> {
    options: &'a BuildOptions,
    policy: &'a ValidationPolicy,
    metadata: &'a FontMetadata,
}

impl GlyphEncoder<'_> {
    fn params(&self, definition: &GlyphDefinition) -> EncodeParams {
        EncodeParams::new(self.metadata.pixel_size, self.options.layout)
            .with_vertical_offset(definition.vertical_offset)
            .with_advance_width(definition.advance_width)
            .with_cell_width(self.options.cell_width)
    }

    fn encode(&self, name: &str, definition: &GlyphDefinition) -> Result<EncodedGlyph, ShapeError> {
        let grid = definition.grid();
        let is_variant = self.options.naming.is_variant(&definition.name);
        validate_bitmap(
            &definition.name,
            &grid,
            definition.vertical_offset,
            is_variant,
            self.policy,
        )?;

        let encoded = encode_bitmap(&grid, &self.params(definition));
        tracing::trace!(
            "Encoded '{}': {} rectangles, advance {}",
            name,
            encoded.rectangles.len(),
            encoded.placement.advance_width
        );

        Ok(EncodedGlyph {
            name: name.to_string(),
            program: encoded.program,
            placement: encoded.placement,
            codepoints: Vec::new(),
        })
    }

    /// Space never draws, whatever bitmap it was given
    fn space(&self, definition: Option<&GlyphDefinition>) -> EncodedGlyph {
        let pixel_size = self.metadata.pixel_size;
        let advance = definition
            .and_then(|d| d.advance_width)
            .unwrap_or_else(|| self.options.layout.blank_advance(self.options.cell_width));

        EncodedGlyph {
            name: SPACE.to_string(),
            program: OutlineProgram::new(),
            placement: GlyphPlacement {
                advance_width: advance * pixel_size,
                vertical_offset: 0,
                left_side_bearing: 0,
            },
            codepoints: Vec::new(),
        }
    }

    /// Built-in `.notdef`: a box from the baseline to cap height, inset one
    /// pixel on each side
    fn notdef(&self) -> EncodedGlyph {
        let pixel_size = self.metadata.pixel_size;
        let advance = match self.options.layout {
            LayoutMode::Legacy => 10,
            LayoutMode::Centered => self.options.cell_width as i32 + LayoutMode::Centered.spacing(),
        } * pixel_size;

        let frame = Rectangle {
            x: pixel_size,
            y: 0,
            width: advance - 2 * pixel_size,
            height: self.metadata.cap_height,
        };
        let mut program = OutlineProgram::new();
        frame.draw(&mut program);

        EncodedGlyph {
            name: NOTDEF.to_string(),
            program,
            placement: GlyphPlacement {
                advance_width: advance,
                vertical_offset: 0,
                left_side_bearing: pixel_size,
            },
            codepoints: Vec::new(),
        }
    }
}

impl GlyphSource for EncodedFont {
    fn source_name(&self) -> String {
        self.metadata.family_name.clone()
    }

    fn has_glyph(&self, name: &str) -> bool {
        self.glyph(name).is_some()
    }

    fn draw_glyph(&self, name: &str, pen: &mut dyn DrawingPen) -> Result<(), DecodeError> {
        let glyph = self
            .glyph(name)
            .ok_or_else(|| LookupError::new(name, self.source_name()))?;
        glyph.program.draw(pen);
        Ok(())
    }

    fn horizontal_metrics(&self, name: &str) -> Result<HorizontalMetrics, DecodeError> {
        let glyph = self
            .glyph(name)
            .ok_or_else(|| LookupError::new(name, self.source_name()))?;
        Ok(HorizontalMetrics {
            advance_width: glyph.placement.advance_width,
            left_side_bearing: glyph.placement.left_side_bearing,
        })
    }

    fn character_map(&self) -> Vec<(char, String)> {
        self.catalog
            .codepoint_map
            .iter()
            .filter_map(|(&codepoint, name)| char::from_u32(codepoint).map(|c| (c, name.clone())))
            .collect()
    }
}
