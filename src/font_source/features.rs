//! Feature syntax for variant substitutions

use std::collections::BTreeMap;
use std::fmt::Write;

/// Render one feature block with a `sub base by variant;` rule per pair.
/// Returns an empty string when there is nothing to substitute.
pub fn substitution_features(tag: &str, substitutions: &BTreeMap<String, String>) -> String {
    if substitutions.is_empty() {
        return String::new();
    }

    let mut fea = String::new();
    let _ = writeln!(fea, "feature {tag} {{");
    for (base, variant) in substitutions {
        let _ = writeln!(fea, "    sub {base} by {variant};");
    }
    let _ = writeln!(fea, "}} {tag};");
    fea
}
