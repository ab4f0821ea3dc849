//! Font-wide metadata and vertical metrics
//!
//! This module contains the metadata block of a glyph definition document
//! (names, version, units per em, pixel size and vertical metrics) and its
//! conversion to UFO font info.

use serde::{Deserialize, Deserializer, Serialize};

/// Font metadata from a glyph definition document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontMetadata {
    #[serde(rename = "font_name")]
    pub family_name: String,
    /// `"1.002"` or `1.002`
    #[serde(default = "default_version", deserialize_with = "deserialize_version")]
    pub version: String,
    pub units_per_em: u32,
    /// Font units per bitmap pixel
    pub pixel_size: i32,
    pub ascender: i32,
    pub descender: i32,
    pub cap_height: i32,
    pub x_height: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_text: Option<String>,
}

fn default_version() -> String {
    "1.000".to_string()
}

/// Numeric versions are read as a font revision with three decimals
fn deserialize_version<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Version {
        Text(String),
        Number(f64),
    }

    Ok(match Version::deserialize(deserializer)? {
        Version::Text(text) => text,
        Version::Number(revision) => format!("{revision:.3}"),
    })
}

/// OpenType name ID for the sample text
const SAMPLE_TEXT_NAME_ID: u32 = 19;

impl Default for FontMetadata {
    fn default() -> Self {
        Self {
            family_name: "Untitled".to_string(),
            version: default_version(),
            units_per_em: 550,
            pixel_size: 50,
            ascender: 400,
            descender: -150,
            cap_height: 350,
            x_height: 250,
            copyright: None,
            license: None,
            license_url: None,
            sample_text: None,
        }
    }
}

impl FontMetadata {
    /// PostScript name, e.g. `TestMono-Regular`
    pub fn postscript_name(&self) -> String {
        format!("{}-Regular", self.family_name.replace(' ', ""))
    }

    /// Split `"1.002"` into major 1 and minor 2
    pub fn version_parts(&self) -> (i32, u32) {
        let mut parts = self.version.trim().splitn(2, '.');
        let major = parts.next().and_then(|p| p.parse().ok()).unwrap_or(1);
        let minor = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
        (major, minor)
    }

    /// Convert to norad FontInfo
    pub fn to_norad_font_info(&self) -> norad::FontInfo {
        let mut info = norad::FontInfo::default();

        if !self.family_name.is_empty() {
            info.family_name = Some(self.family_name.clone());
        }
        info.style_name = Some("Regular".to_string());
        info.postscript_font_name = Some(self.postscript_name());

        let (major, minor) = self.version_parts();
        info.version_major = Some(major);
        info.version_minor = Some(minor);

        if let Some(units_per_em) =
            norad::fontinfo::NonNegativeIntegerOrFloat::new(self.units_per_em as f64)
        {
            info.units_per_em = Some(units_per_em);
        }
        info.ascender = Some(self.ascender as f64);
        info.descender = Some(self.descender as f64);
        info.x_height = Some(self.x_height as f64);
        info.cap_height = Some(self.cap_height as f64);

        info.copyright = self.copyright.clone();
        info.open_type_name_license = self.license.clone();
        info.open_type_name_license_url = self.license_url.clone();

        if let Some(sample_text) = &self.sample_text {
            // Windows, Unicode BMP, English (United States)
            info.open_type_name_records = Some(vec![norad::fontinfo::NameRecord {
                name_id: SAMPLE_TEXT_NAME_ID,
                platform_id: 3,
                encoding_id: 1,
                language_id: 0x409,
                string: sample_text.clone(),
            }]);
        }
        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_text_versions() {
        let json = |version: &str| {
            format!(
                r#"{{"font_name": "V", "version": {version}, "units_per_em": 550, "pixel_size": 50,
                    "ascender": 400, "descender": -150, "cap_height": 350, "x_height": 250}}"#
            )
        };

        let metadata: FontMetadata = serde_json::from_str(&json("1.0")).unwrap();
        assert_eq!(metadata.version, "1.000");
        assert_eq!(metadata.version_parts(), (1, 0));

        let metadata: FontMetadata = serde_json::from_str(&json("1.002")).unwrap();
        assert_eq!(metadata.version_parts(), (1, 2));

        let metadata: FontMetadata = serde_json::from_str(&json("2")).unwrap();
        assert_eq!(metadata.version, "2.000");

        let metadata: FontMetadata = serde_json::from_str(&json(r#""1.013""#)).unwrap();
        assert_eq!(metadata.version, "1.013");
    }

    #[test]
    fn test_sample_text_becomes_name_record() {
        let metadata = FontMetadata {
            sample_text: Some("The quick brown fox".to_string()),
            ..Default::default()
        };
        let info = metadata.to_norad_font_info();
        let records = info.open_type_name_records.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name_id, 19);
        assert_eq!(records[0].string, "The quick brown fox");

        assert!(FontMetadata::default()
            .to_norad_font_info()
            .open_type_name_records
            .is_none());
    }

    #[test]
    fn test_version_parts() {
        let mut metadata = FontMetadata::default();
        metadata.version = "2.013".to_string();
        assert_eq!(metadata.version_parts(), (2, 13));

        metadata.version = "3".to_string();
        assert_eq!(metadata.version_parts(), (3, 0));
    }

    #[test]
    fn test_postscript_name() {
        let metadata = FontMetadata {
            family_name: "Abbots Morton Mono".to_string(),
            ..Default::default()
        };
        assert_eq!(metadata.postscript_name(), "AbbotsMortonMono-Regular");
    }

    #[test]
    fn test_norad_font_info() {
        let metadata = FontMetadata {
            license: Some("OFL-1.1".to_string()),
            ..Default::default()
        };
        let info = metadata.to_norad_font_info();
        assert_eq!(info.family_name.as_deref(), Some("Untitled"));
        assert_eq!(info.ascender, Some(400.0));
        assert_eq!(info.descender, Some(-150.0));
        assert_eq!(info.open_type_name_license.as_deref(), Some("OFL-1.1"));
    }
}
