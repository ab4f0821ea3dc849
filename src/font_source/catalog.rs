//! Glyph catalog: order, character map and variant substitutions
//!
//! The catalog is derived once per build from the ordered definition list.
//! It decides which glyphs are visible in the font, the order they appear
//! in, which characters map to them and which bases get a variant
//! substitution.

use super::validation::FontVariant;
use crate::data::definitions::{GlyphDefinition, NamingScheme};
use std::collections::{BTreeMap, BTreeSet};

pub const NOTDEF: &str = ".notdef";
pub const SPACE: &str = "space";

/// Canonical glyph names that do not spell their own character
const CANONICAL_NAMES: &[(&str, char)] = &[
    ("space", ' '),
    ("exclam", '!'),
    ("quotedbl", '"'),
    ("numbersign", '#'),
    ("dollar", '$'),
    ("percent", '%'),
    ("ampersand", '&'),
    ("quotesingle", '\''),
    ("parenleft", '('),
    ("parenright", ')'),
    ("asterisk", '*'),
    ("plus", '+'),
    ("comma", ','),
    ("hyphen", '-'),
    ("period", '.'),
    ("slash", '/'),
    ("zero", '0'),
    ("one", '1'),
    ("two", '2'),
    ("three", '3'),
    ("four", '4'),
    ("five", '5'),
    ("six", '6'),
    ("seven", '7'),
    ("eight", '8'),
    ("nine", '9'),
    ("colon", ':'),
    ("semicolon", ';'),
    ("less", '<'),
    ("equal", '='),
    ("greater", '>'),
    ("question", '?'),
    ("at", '@'),
    ("bracketleft", '['),
    ("backslash", '\\'),
    ("bracketright", ']'),
    ("asciicircum", '^'),
    ("underscore", '_'),
    ("grave", '`'),
    ("braceleft", '{'),
    ("bar", '|'),
    ("braceright", '}'),
    ("asciitilde", '~'),
    ("exclamdown", '¡'),
    ("cent", '¢'),
    ("sterling", '£'),
    ("currency", '¤'),
    ("yen", '¥'),
    ("brokenbar", '¦'),
    ("section", '§'),
    ("dieresis", '¨'),
    ("copyright", '©'),
    ("ordfeminine", 'ª'),
    ("guillemotleft", '«'),
    ("logicalnot", '¬'),
    ("registered", '®'),
    ("macron", '¯'),
    ("degree", '°'),
    ("plusminus", '±'),
    ("acute", '´'),
    ("mu", 'µ'),
    ("paragraph", '¶'),
    ("periodcentered", '·'),
    ("cedilla", '¸'),
    ("ordmasculine", 'º'),
    ("guillemotright", '»'),
    ("questiondown", '¿'),
    ("multiply", '×'),
    ("divide", '÷'),
    ("endash", '–'),
    ("emdash", '—'),
    ("quoteleft", '‘'),
    ("quoteright", '’'),
    ("quotedblleft", '“'),
    ("quotedblright", '”'),
    ("bullet", '•'),
    ("ellipsis", '…'),
    ("Euro", '€'),
];

/// Character for a canonical glyph name such as `comma`
pub fn canonical_name_to_char(name: &str) -> Option<char> {
    CANONICAL_NAMES
        .iter()
        .find(|(glyph, _)| *glyph == name)
        .map(|&(_, c)| c)
}

/// Codepoint a glyph name implies, if any
///
/// Single characters map to themselves, `uniXXXX` to the hex value and
/// canonical names through the name table. Malformed hex and surrogates
/// are skipped.
pub fn codepoint_for_name(name: &str) -> Option<u32> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(c as u32);
    }

    if let Some(hex) = name.strip_prefix("uni") {
        if hex.len() == 4 {
            return match u32::from_str_radix(hex, 16) {
                // Surrogates are not characters
                Ok(codepoint) if char::from_u32(codepoint).is_some() => Some(codepoint),
                Ok(_) => {
                    tracing::debug!("Skipping '{}': surrogate codepoint", name);
                    None
                }
                Err(_) => {
                    tracing::debug!("Skipping '{}': malformed hex codepoint", name);
                    None
                }
            };
        }
    }

    canonical_name_to_char(name).map(|c| c as u32)
}

/// Order, character map and substitutions for one font variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphCatalog {
    pub variant: FontVariant,
    /// `.notdef`, `space`, then every other visible glyph sorted
    pub glyph_order: Vec<String>,
    /// Codepoint to visible glyph name
    pub codepoint_map: BTreeMap<u32, String>,
    /// Base glyph to variant glyph; fixed-pitch builds only
    pub substitutions: BTreeMap<String, String>,
    /// Visible glyph name to the definition that draws it
    bindings: BTreeMap<String, String>,
}

impl GlyphCatalog {
    pub fn build(definitions: &[GlyphDefinition], variant: FontVariant, naming: &NamingScheme) -> Self {
        let defined: BTreeSet<&str> = definitions.iter().map(|d| d.name.as_str()).collect();
        let has_variant =
            |name: &str| defined.contains(format!("{name}{}", naming.variant_suffix).as_str());

        // Visible name for every definition that shows up in this variant
        let visible_name = |definition: &GlyphDefinition| -> Option<String> {
            let name = definition.name.as_str();
            match (variant, naming.base_name(name)) {
                (FontVariant::FixedPitch, Some(_)) => None,
                (FontVariant::FixedPitch, None) => Some(name.to_string()),
                (FontVariant::Proportional, Some(base)) => Some(base.to_string()),
                (FontVariant::Proportional, None) if has_variant(name) => None,
                (FontVariant::Proportional, None) => Some(name.to_string()),
            }
        };

        let mut bindings = BTreeMap::new();
        let mut codepoint_map = BTreeMap::new();
        codepoint_map.insert(32, SPACE.to_string());

        for definition in definitions {
            let Some(visible) = visible_name(definition) else {
                continue;
            };
            if let Some(codepoint) = codepoint_for_name(&visible) {
                if let Some(previous) = codepoint_map.insert(codepoint, visible.clone()) {
                    if previous != visible {
                        tracing::warn!(
                            "Codepoint U+{:04X} mapped by both '{}' and '{}'; keeping '{}'",
                            codepoint,
                            previous,
                            visible,
                            visible
                        );
                    }
                }
            }
            bindings.insert(visible, definition.name.clone());
        }
        // Space always owns U+0020
        codepoint_map.insert(32, SPACE.to_string());

        let mut glyph_order = vec![NOTDEF.to_string(), SPACE.to_string()];
        glyph_order.extend(
            bindings
                .keys()
                .filter(|name| name.as_str() != NOTDEF && name.as_str() != SPACE)
                .cloned(),
        );

        let mut substitutions = BTreeMap::new();
        if variant == FontVariant::FixedPitch {
            for definition in definitions {
                if let Some(base) = naming.base_name(&definition.name) {
                    if defined.contains(base) {
                        substitutions.insert(base.to_string(), definition.name.clone());
                    }
                }
            }
        }

        tracing::debug!(
            "Catalog: {} glyphs, {} codepoints, {} substitutions",
            glyph_order.len(),
            codepoint_map.len(),
            substitutions.len()
        );

        Self {
            variant,
            glyph_order,
            codepoint_map,
            substitutions,
            bindings,
        }
    }

    /// Name of the definition drawn for a visible glyph
    pub fn definition_name(&self, glyph: &str) -> Option<&str> {
        self.bindings.get(glyph).map(String::as_str)
    }

    /// Characters mapped to a glyph, in codepoint order
    pub fn codepoints_for(&self, glyph: &str) -> Vec<char> {
        self.codepoint_map
            .iter()
            .filter(|(_, name)| name.as_str() == glyph)
            .filter_map(|(&codepoint, _)| char::from_u32(codepoint))
            .collect()
    }

    pub fn contains(&self, glyph: &str) -> bool {
        self.glyph_order.iter().any(|name| name == glyph)
    }
}
