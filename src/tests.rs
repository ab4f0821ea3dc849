#![allow(clippy::assertions_on_constants)]

#[cfg(test)]
mod round_trip_tests {
    use crate::geometry::{decode_program, encode_bitmap, EncodeParams, LayoutMode, Padding, PixelGrid};
    use pretty_assertions::assert_eq;

    /// Grids whose ink touches their top, bottom and right edges
    const GRIDS: &[(&[&str], i32)] = &[
        (&["#####", "#   #", "#####", "#   #", "#   #", "#   #"], 0),
        (&["  #", "   ", "  #", "  #", "  #", "  #"], 0),
        (&["   #", "   #", "   #", "#  #", " ## "], -2),
        (&["#"], 3),
        (&["# #", " # ", "# #"], -3),
    ];

    #[test]
    fn test_decode_inverts_encode() {
        for pixel_size in [1, 7, 50, 100] {
            for &(rows, vertical_offset) in GRIDS {
                let grid = PixelGrid::from_text_rows(rows);
                let params = EncodeParams::new(pixel_size, LayoutMode::Legacy)
                    .with_vertical_offset(vertical_offset);
                let encoded = encode_bitmap(&grid, &params);
                let decoded = decode_program(&encoded.program, pixel_size, Padding::FromOrigin).unwrap();

                assert_eq!(decoded.bitmap.to_text_rows(), rows.to_vec(), "P={pixel_size}");
                assert_eq!(decoded.vertical_offset, vertical_offset, "P={pixel_size}");
            }
        }
    }

    #[test]
    fn test_encoding_is_deterministic() {
        for &(rows, vertical_offset) in GRIDS {
            let grid = PixelGrid::from_text_rows(rows);
            for layout in [LayoutMode::Legacy, LayoutMode::Centered] {
                let params = EncodeParams::new(50, layout).with_vertical_offset(vertical_offset);
                assert_eq!(encode_bitmap(&grid, &params), encode_bitmap(&grid, &params));
            }
        }
    }

    #[test]
    fn test_centered_tight_decode_recovers_ink() {
        let rows = ["  #  ", "     ", " ##  ", "  #  ", "  #  ", " ### "];
        let grid = PixelGrid::from_text_rows(&rows);
        let encoded = encode_bitmap(&grid, &EncodeParams::new(50, LayoutMode::Centered));
        let decoded = decode_program(&encoded.program, 50, Padding::Tight).unwrap();
        assert_eq!(decoded.bitmap.to_text_rows(), vec![" # ", "   ", "## ", " # ", " # ", "###"]);
    }
}

#[cfg(test)]
mod build_tests {
    use crate::data::GlyphDocument;
    use crate::font_source::{build_font, BuildOptions, FontVariant, NOTDEF, SPACE};
    use pretty_assertions::assert_eq;

    const DOCUMENT: &str = r######"{
        "metadata": {
            "font_name": "Pixel Test",
            "units_per_em": 550,
            "pixel_size": 50,
            "ascender": 400,
            "descender": -150,
            "cap_height": 350,
            "x_height": 250
        },
        "glyphs": {
            "period": { "bitmap": ["     ", "     ", "     ", "     ", "     ", "  #  "] },
            "period.prop": { "bitmap": [" ", " ", " ", " ", " ", "#"] },
            "A": { "bitmap": [" ### ", "#   #", "#   #", "#####", "#   #", "#   #"] },
            "space": { "advance_width": 3 },
            "j": {
                "bitmap": ["    #", "     ", "    #", "    #", "    #", "    #", "#   #", " ### "],
                "y_offset": -2
            },
            "uni0041": { "bitmap": [[1,1,1,1,1], [1,0,0,0,1], [1,1,1,1,1], [1,0,0,0,1], [1,0,0,0,1], [1,0,0,0,1]] }
        }
    }"######;

    fn document() -> GlyphDocument {
        GlyphDocument::from_json_str(DOCUMENT).unwrap()
    }

    #[test]
    fn test_order_and_character_map() {
        let font = build_font(&document(), &BuildOptions::default()).unwrap();
        let catalog = &font.catalog;

        assert_eq!(
            catalog.glyph_order,
            vec![NOTDEF, SPACE, "A", "j", "period", "uni0041"]
        );
        assert_eq!(catalog.codepoint_map.get(&32).map(String::as_str), Some(SPACE));
        assert_eq!(catalog.codepoint_map.get(&('j' as u32)).map(String::as_str), Some("j"));
        // uni0041 comes after A in the document, so it owns U+0041
        assert_eq!(catalog.codepoint_map.get(&0x41).map(String::as_str), Some("uni0041"));
        assert!(font.glyph("A").unwrap().codepoints.is_empty());
    }

    #[test]
    fn test_variants_are_exclusive() {
        let fixed = build_font(&document(), &BuildOptions::for_variant(FontVariant::FixedPitch)).unwrap();
        assert!(fixed.glyphs.iter().all(|g| !g.name.ends_with(".prop")));
        assert_eq!(
            fixed.catalog.substitutions.get("period").map(String::as_str),
            Some("period.prop")
        );
        assert_eq!(fixed.auxiliary_glyphs.len(), 1);
        assert_eq!(fixed.glyph("period").unwrap().placement.advance_width, 350);

        let proportional =
            build_font(&document(), &BuildOptions::for_variant(FontVariant::Proportional)).unwrap();
        assert!(proportional.all_glyphs().all(|g| !g.name.ends_with(".prop")));
        assert!(proportional.catalog.substitutions.is_empty());
        assert!(proportional.features.is_empty());
        // The variant is drawn under the base name: one pixel plus one of spacing
        assert_eq!(proportional.glyph("period").unwrap().placement.advance_width, 100);
    }

    #[test]
    fn test_builds_are_deterministic() {
        let options = BuildOptions::default();
        assert_eq!(
            build_font(&document(), &options).unwrap(),
            build_font(&document(), &options).unwrap()
        );
    }

    #[test]
    fn test_space_and_descender_placement() {
        let font = build_font(&document(), &BuildOptions::default()).unwrap();
        assert_eq!(font.glyph(SPACE).unwrap().placement.advance_width, 150);

        let j = font.glyph("j").unwrap();
        assert_eq!(j.placement.vertical_offset, -2);
        assert_eq!(j.placement.left_side_bearing, 50);
    }
}

#[cfg(test)]
mod ufo_tests {
    use crate::core::errors::DecodeError;
    use crate::data::conversions::GLYPH_ORDER_KEY;
    use crate::data::{ufo, GlyphDocument, UfoGlyphSource, UfoSink};
    use crate::font_source::{build_font, BuildOptions, FontSink, FontVariant};
    use crate::geometry::GlyphSource;
    use crate::qa::{compare_glyph, find_spaced_glyphs};

    fn document() -> GlyphDocument {
        let text = r######"{
            "metadata": {
                "font_name": "Pixel Round Trip",
                "version": "1.002",
                "units_per_em": 550,
                "pixel_size": 50,
                "ascender": 400,
                "descender": -150,
                "cap_height": 350,
                "x_height": 250,
                "license": "OFL-1.1"
            },
            "glyphs": {
                "comma": { "bitmap": ["     ", "     ", "     ", "     ", "  #  ", " #   "], "y_offset": -1 },
                "comma.prop": { "bitmap": [" #", "# "], "y_offset": -1 },
                "H": { "bitmap": ["#   #", "#   #", "#####", "#   #", "#   #", "#   #"] },
                "exclam": { "bitmap": ["  #  ", "  #  ", "  #  ", "  #  ", "     ", "  #  "] }
            }
        }"######;
        GlyphDocument::from_json_str(text).unwrap()
    }

    #[test]
    fn test_written_ufo_matches_build() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("PixelRoundTrip.ufo");
        let font = build_font(&document(), &BuildOptions::default()).unwrap();
        UfoSink::new(&path).write_font(&font).unwrap();

        let raw = ufo::load_ufo_from_path(&path).unwrap();
        assert_eq!(raw.font_info.family_name.as_deref(), Some("Pixel Round Trip"));
        assert_eq!(raw.font_info.version_minor, Some(2));
        assert!(raw.features.contains("sub comma by comma.prop;"));

        let glyph_order: Vec<&str> = raw
            .lib
            .get(GLYPH_ORDER_KEY)
            .and_then(|value| value.as_array())
            .unwrap()
            .iter()
            .map(|name| name.as_string().unwrap())
            .collect();
        assert_eq!(glyph_order, vec![".notdef", "space", "H", "comma", "exclam", "comma.prop"]);

        let source = UfoGlyphSource::load(&path).unwrap();
        for glyph in font.all_glyphs() {
            let report = compare_glyph(&glyph.name, &font, &source, 50).unwrap();
            assert!(report.all_match(), "{report}");
        }
    }

    #[test]
    fn test_spaced_glyphs_found_in_ufo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("PixelRoundTrip.ufo");
        let font = build_font(&document(), &BuildOptions::default()).unwrap();
        UfoSink::new(&path).write_font(&font).unwrap();

        let source = UfoGlyphSource::load(&path).unwrap();
        let spaced = find_spaced_glyphs(&source, 50, 4);
        let names: Vec<&str> = spaced.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["exclam", "comma"]);
        assert_eq!(spaced[1].width, 2);
        assert_eq!(spaced[1].unicode, "U+002C");
    }

    #[test]
    fn test_compare_fixed_against_proportional() {
        let fixed = build_font(&document(), &BuildOptions::for_variant(FontVariant::FixedPitch)).unwrap();
        let proportional =
            build_font(&document(), &BuildOptions::for_variant(FontVariant::Proportional)).unwrap();

        let report = compare_glyph("comma", &fixed, &proportional, 50).unwrap();
        assert!(!report.all_match());
        assert_eq!(report.metrics[0].first, 350);
        assert_eq!(report.metrics[0].second, 150);

        assert!(matches!(
            compare_glyph("comma.prop", &proportional, &fixed, 50),
            Err(DecodeError::Lookup(_))
        ));
        assert!(fixed.has_glyph("comma.prop"));
    }
}
