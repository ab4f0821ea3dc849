//! UFO format conversion utilities
//!
//! This module contains conversion logic between encoded glyphs and the
//! norad UFO format, and from norad contours back to kurbo paths for
//! sampling. This is pure data transformation logic.

use crate::font_source::{EncodedFont, EncodedGlyph};
use crate::geometry::decoder::extract_contours;
use kurbo::{BezPath, Point};

/// `lib.plist` key holding the glyph order
pub const GLYPH_ORDER_KEY: &str = "public.glyphOrder";

impl EncodedGlyph {
    /// Convert to a norad glyph: one closed line contour per rectangle
    pub fn to_norad_glyph(&self) -> norad::Glyph {
        let mut glyph = norad::Glyph::new(&self.name);
        glyph.width = self.placement.advance_width as f64;

        for &codepoint in &self.codepoints {
            glyph.codepoints.insert(codepoint);
        }

        glyph.contours = extract_contours(&self.program)
            .into_iter()
            .map(|points| {
                let points = points
                    .into_iter()
                    .map(|(x, y)| {
                        norad::ContourPoint::new(x, y, norad::PointType::Line, false, None, None)
                    })
                    .collect();
                norad::Contour::new(points, None)
            })
            .collect();

        glyph
    }
}

impl EncodedFont {
    /// Convert to a complete norad Font
    pub fn to_norad_font(&self) -> norad::Font {
        let mut font = norad::Font::new();
        font.font_info = self.metadata.to_norad_font_info();
        font.features = self.features.clone();

        let layer = font.default_layer_mut();
        for glyph in self.all_glyphs() {
            layer.insert_glyph(glyph.to_norad_glyph());
        }

        let glyph_order = self
            .all_glyphs()
            .map(|glyph| plist::Value::String(glyph.name.clone()))
            .collect();
        font.lib.insert(GLYPH_ORDER_KEY.to_string(), plist::Value::Array(glyph_order));

        font
    }
}

/// Convert a UFO contour to a kurbo path
///
/// UFO contours: the first point defines the start position, and its type
/// says how the last segment gets back to it. A `Move` first point marks
/// an open contour.
pub fn contour_to_bezpath(contour: &norad::Contour) -> BezPath {
    let mut path = BezPath::new();
    let mut pending_offcurves: Vec<Point> = Vec::new();
    let mut first_point: Option<(Point, norad::PointType)> = None;

    for (idx, point) in contour.points.iter().enumerate() {
        let pt = Point::new(point.x, point.y);

        if idx == 0 {
            path.move_to(pt);
            first_point = Some((pt, point.typ.clone()));
            continue;
        }

        match point.typ {
            norad::PointType::Move => path.move_to(pt),
            norad::PointType::Line => path.line_to(pt),
            norad::PointType::OffCurve => pending_offcurves.push(pt),
            norad::PointType::Curve | norad::PointType::QCurve => {
                finish_segment(&mut path, &mut pending_offcurves, &point.typ, pt)
            }
        }
    }

    if let Some((first_pt, first_type)) = first_point {
        match first_type {
            norad::PointType::Move => return path,
            norad::PointType::Curve | norad::PointType::QCurve => {
                finish_segment(&mut path, &mut pending_offcurves, &first_type, first_pt)
            }
            norad::PointType::Line | norad::PointType::OffCurve => path.line_to(first_pt),
        }
    }

    path.close_path();
    path
}

fn finish_segment(
    path: &mut BezPath,
    pending_offcurves: &mut Vec<Point>,
    typ: &norad::PointType,
    end: Point,
) {
    match (typ, pending_offcurves.len()) {
        (_, 0) => path.line_to(end),
        (_, 1) => path.quad_to(pending_offcurves[0], end),
        (norad::PointType::Curve, n) => {
            path.curve_to(pending_offcurves[n - 2], pending_offcurves[n - 1], end)
        }
        (_, n) => {
            // Implied on-curve points halfway between consecutive off-curves
            for i in 0..n {
                let cp = pending_offcurves[i];
                let seg_end = if i == n - 1 {
                    end
                } else {
                    cp.midpoint(pending_offcurves[i + 1])
                };
                path.quad_to(cp, seg_end);
            }
        }
    }
    pending_offcurves.clear();
}
