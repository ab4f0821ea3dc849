//! Command line interface for bitglyph
//!
//! Handles parsing command line arguments and provides
//! validation for user inputs. Many CLI options are documented with
//! examples to help users understand the expected format.

use crate::core::config_file::ConfigFile;
use crate::font_source::{BuildOptions, FontVariant};
use crate::geometry::LayoutMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Pixel size used when sampling a font whose grid is not known
pub const DEFAULT_PIXEL_SIZE: i32 = 50;

/// bitglyph CLI arguments
///
/// Examples:
///   bitglyph build glyphs.json                    # Build glyphs.ufo (fixed pitch)
///   bitglyph build glyphs.json Prop.ufo --proportional
///   bitglyph extract Font.ufo j                   # Print a glyph's bitmap
///   bitglyph compare comma Old.ufo New.ufo        # Compare one glyph
///   bitglyph spaced Font.ufo -o spaced.json       # List narrow punctuation
///   bitglyph --new-config                         # Write default settings
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "bitglyph",
    version,
    about = "Pixel bitmaps to outline font sources, and back",
    long_about = "bitglyph builds UFO font sources from pixel glyph bitmaps, one square contour per pixel, and samples outline glyphs back onto the pixel grid to extract, compare or audit them."
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    /// Log at debug level
    #[clap(long = "verbose", short = 'v', global = true, help = "Enable debug logging")]
    pub verbose: bool,

    /// Also write logs to ~/.config/bitglyph/logs/
    #[clap(
        long = "log-file",
        global = true,
        help = "Also write logs to the config directory",
        long_help = "Also write logs to a dated file under ~/.config/bitglyph/logs/. RUST_LOG overrides the log level."
    )]
    pub log_file: bool,

    /// Initialize user configuration directory with default settings
    #[clap(
        long = "new-config",
        help = "Initialize user config directory with default settings",
        long_help = "Initialize the ~/.config/bitglyph directory with a settings.json file holding the built-in defaults (variant, variant suffix, feature tag, cell width) so they can be changed without command line arguments."
    )]
    pub new_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build a UFO font source from a glyph definition document
    Build {
        /// Glyph definition document (JSON)
        input: PathBuf,

        /// Output UFO; defaults to the input path with a .ufo extension
        output: Option<PathBuf>,

        /// Build the proportional variant
        #[clap(long, conflicts_with = "fixed_pitch")]
        proportional: bool,

        /// Build the fixed-pitch variant
        #[clap(long)]
        fixed_pitch: bool,

        /// Horizontal layout; defaults to centered for fixed pitch, legacy for proportional
        #[clap(long, value_enum)]
        layout: Option<LayoutArg>,
    },

    /// Print a glyph's bitmap as a glyph definition
    Extract {
        /// UFO font source
        font: PathBuf,

        /// Glyph name
        glyph: String,

        /// Start the grid at the outline's left edge instead of x = 0
        #[clap(long)]
        no_padding: bool,

        #[clap(long, default_value_t = DEFAULT_PIXEL_SIZE)]
        pixel_size: i32,
    },

    /// Compare one glyph between two fonts; exits non-zero when they differ
    Compare {
        /// Glyph name
        glyph: String,

        first: PathBuf,

        second: PathBuf,

        #[clap(long, default_value_t = DEFAULT_PIXEL_SIZE)]
        pixel_size: i32,
    },

    /// Find punctuation and symbols narrower than the cell
    Spaced {
        /// UFO font source
        font: PathBuf,

        /// JSON report
        #[clap(short = 'o', long, default_value = "spaced_glyphs.json")]
        output: PathBuf,

        /// Widest ink, in pixels, that counts as spaced out
        #[clap(short = 'w', long, default_value_t = crate::qa::spaced::DEFAULT_MAX_WIDTH)]
        max_width: usize,

        #[clap(long, default_value_t = DEFAULT_PIXEL_SIZE)]
        pixel_size: i32,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutArg {
    Legacy,
    Centered,
}

impl From<LayoutArg> for LayoutMode {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Legacy => LayoutMode::Legacy,
            LayoutArg::Centered => LayoutMode::Centered,
        }
    }
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// This ensures that input paths exist before any work starts,
    /// providing clear error messages for common mistakes.
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Some(Command::Build { input, .. }) => require_file(input, "Glyph definition document"),
            Some(Command::Extract { font, pixel_size, .. })
            | Some(Command::Spaced { font, pixel_size, .. }) => {
                require_ufo(font)?;
                require_pixel_size(*pixel_size)
            }
            Some(Command::Compare {
                first,
                second,
                pixel_size,
                ..
            }) => {
                require_ufo(first)?;
                require_ufo(second)?;
                require_pixel_size(*pixel_size)
            }
            None => Ok(()),
        }
    }
}

/// Resolve build options for the `build` subcommand
///
/// Priority order:
/// 1. CLI arguments (--proportional, --fixed-pitch, --layout)
/// 2. Config file settings (~/.config/bitglyph/settings.json)
/// 3. Built-in defaults (fixed pitch)
pub fn resolve_build_options(
    proportional: bool,
    fixed_pitch: bool,
    layout: Option<LayoutArg>,
    config: Option<&ConfigFile>,
) -> BuildOptions {
    let variant = if proportional {
        FontVariant::Proportional
    } else if fixed_pitch {
        FontVariant::FixedPitch
    } else {
        config.and_then(|c| c.default_variant).unwrap_or_default()
    };
    tracing::debug!("Building {:?} variant", variant);

    let mut options = match config {
        Some(config) => config.build_options(variant),
        None => BuildOptions::for_variant(variant),
    };
    if let Some(layout) = layout {
        options.layout = layout.into();
    }
    options
}

fn require_file(path: &Path, what: &str) -> Result<(), String> {
    if !path.is_file() {
        return Err(format!(
            "{what} does not exist: {}\nMake sure the path is correct and the file exists.",
            path.display()
        ));
    }
    Ok(())
}

fn require_ufo(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!(
            "Font source does not exist: {}\nMake sure the path is correct and the file exists.",
            path.display()
        ));
    }
    if !path.join("metainfo.plist").exists() {
        return Err(format!(
            "Not a valid UFO directory: missing metainfo.plist in {}\nMake sure this is a valid UFO directory.",
            path.display()
        ));
    }
    Ok(())
}

fn require_pixel_size(pixel_size: i32) -> Result<(), String> {
    if pixel_size <= 0 {
        return Err(format!("Pixel size must be positive, got {pixel_size}"));
    }
    Ok(())
}
