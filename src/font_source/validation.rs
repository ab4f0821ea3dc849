//! Bitmap shape rules
//!
//! Fixed-pitch glyphs must fill the canonical cell width exactly. Variant
//! and proportional glyphs only need consistent rows. Row counts are
//! checked per namespace through a small policy table.

use crate::core::errors::ShapeError;
use crate::geometry::bitmap::PixelGrid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which glyphs a build exposes and which width rules apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontVariant {
    #[default]
    FixedPitch,
    Proportional,
}

/// Allowed row counts for a class of glyphs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowCountRule {
    Exactly(usize),
    OneOf(Vec<usize>),
}

impl RowCountRule {
    pub fn allows(&self, rows: usize) -> bool {
        match self {
            RowCountRule::Exactly(n) => rows == *n,
            RowCountRule::OneOf(options) => options.contains(&rows),
        }
    }
}

impl fmt::Display for RowCountRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowCountRule::Exactly(n) => write!(f, "{n}"),
            RowCountRule::OneOf(options) => {
                let options: Vec<String> = options.iter().map(|n| n.to_string()).collect();
                write!(f, "{}", options.join(" or "))
            }
        }
    }
}

/// Row-count rule for every glyph whose name starts with `namespace`
///
/// Lookup order: named glyphs, then vertical offset, then the default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCountPolicy {
    pub namespace: String,
    #[serde(default)]
    pub by_name: Vec<(String, RowCountRule)>,
    #[serde(default)]
    pub by_vertical_offset: Vec<(i32, RowCountRule)>,
    pub default: RowCountRule,
}

impl RowCountPolicy {
    /// Extended symbols in the private use area: angled parentheses span
    /// 12 rows, descending symbols 9, everything else 6 or 9.
    pub fn extended_symbols() -> Self {
        Self {
            namespace: "uniE".to_string(),
            by_name: vec![
                ("uniE66E".to_string(), RowCountRule::Exactly(12)),
                ("uniE66F".to_string(), RowCountRule::Exactly(12)),
            ],
            by_vertical_offset: vec![(-3, RowCountRule::Exactly(9))],
            default: RowCountRule::OneOf(vec![6, 9]),
        }
    }

    pub fn covers(&self, name: &str) -> bool {
        name.starts_with(&self.namespace)
    }

    pub fn rule_for(&self, name: &str, vertical_offset: i32) -> &RowCountRule {
        if let Some((_, rule)) = self.by_name.iter().find(|(glyph, _)| glyph == name) {
            return rule;
        }
        if let Some((_, rule)) = self
            .by_vertical_offset
            .iter()
            .find(|(offset, _)| *offset == vertical_offset)
        {
            return rule;
        }
        &self.default
    }
}

/// Everything the validator needs besides the glyph itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub variant: FontVariant,
    /// Canonical fixed-pitch width in pixels
    pub cell_width: usize,
    pub row_counts: Vec<RowCountPolicy>,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            variant: FontVariant::FixedPitch,
            cell_width: 5,
            row_counts: vec![RowCountPolicy::extended_symbols()],
        }
    }
}

impl ValidationPolicy {
    pub fn for_variant(variant: FontVariant) -> Self {
        Self {
            variant,
            ..Default::default()
        }
    }
}

/// Check one glyph's bitmap. Empty bitmaps always pass.
pub fn validate_bitmap(
    name: &str,
    grid: &PixelGrid,
    vertical_offset: i32,
    is_variant: bool,
    policy: &ValidationPolicy,
) -> Result<(), ShapeError> {
    if grid.is_empty() {
        return Ok(());
    }

    let widths = grid.row_widths();
    if is_variant || policy.variant == FontVariant::Proportional {
        if widths.iter().any(|&w| w != widths[0]) {
            return Err(ShapeError::InconsistentWidths {
                glyph: name.to_string(),
                widths: widths.to_vec(),
            });
        }
    } else if let Some((row, &width)) = widths
        .iter()
        .enumerate()
        .find(|(_, &w)| w != policy.cell_width)
    {
        return Err(ShapeError::RowWidth {
            glyph: name.to_string(),
            row,
            width,
            expected: policy.cell_width,
        });
    }

    if let Some(row_policy) = policy.row_counts.iter().find(|p| p.covers(name)) {
        let rule = row_policy.rule_for(name, vertical_offset);
        if !rule.allows(grid.height()) {
            return Err(ShapeError::RowCount {
                glyph: name.to_string(),
                actual: grid.height(),
                expected: rule.to_string(),
            });
        }
    }

    Ok(())
}
