//! Application runner logic
//!
//! Handles the different ways to run bitglyph

use crate::core::cli::{resolve_build_options, CliArgs, Command, LayoutArg};
use crate::core::config_file::ConfigFile;
use crate::data::{GlyphDefinition, GlyphDocument, UfoGlyphSource, UfoSink};
use crate::font_source::{build_font, FontSink};
use crate::geometry::{extract_glyph, Padding};
use crate::logging;
use crate::qa::{compare_glyph, find_spaced_glyphs, write_spaced_glyphs};
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Run bitglyph with the given CLI arguments.
/// Handles special CLI flags and delegates to the subcommand runners.
///
/// A `compare` that finds differences is not an error: the report is
/// printed and the exit code is 1.
pub fn run_app(cli_args: CliArgs) -> Result<ExitCode> {
    if cli_args.new_config {
        ConfigFile::initialize_config_directory().context("Failed to initialize config directory")?;
        return Ok(ExitCode::SUCCESS);
    }

    cli_args.validate().map_err(|message| anyhow!(message))?;
    let _guard = logging::init_logging(cli_args.verbose, cli_args.log_file)?;

    match cli_args.command {
        Some(Command::Build {
            input,
            output,
            proportional,
            fixed_pitch,
            layout,
        }) => run_build(&input, output, proportional, fixed_pitch, layout)?,
        Some(Command::Extract {
            font,
            glyph,
            no_padding,
            pixel_size,
        }) => run_extract(&font, &glyph, no_padding, pixel_size)?,
        Some(Command::Compare {
            glyph,
            first,
            second,
            pixel_size,
        }) => {
            if !run_compare(&glyph, &first, &second, pixel_size)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(Command::Spaced {
            font,
            output,
            max_width,
            pixel_size,
        }) => run_spaced(&font, &output, max_width, pixel_size)?,
        None => {
            use clap::CommandFactory;
            CliArgs::command().print_help()?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_build(
    input: &Path,
    output: Option<PathBuf>,
    proportional: bool,
    fixed_pitch: bool,
    layout: Option<LayoutArg>,
) -> Result<()> {
    let config = ConfigFile::load();
    let options = resolve_build_options(proportional, fixed_pitch, layout, config.as_ref());
    let document = GlyphDocument::load(input)?;

    let font = build_font(&document, &options)
        .with_context(|| format!("Failed to build font from {}", input.display()))?;
    if !font.features.is_empty() {
        tracing::info!("  Substitutions: {}", font.catalog.substitutions.len());
    }

    let output = output.unwrap_or_else(|| input.with_extension("ufo"));
    UfoSink::new(output).write_font(&font)
}

fn run_extract(font: &Path, glyph: &str, no_padding: bool, pixel_size: i32) -> Result<()> {
    let source = UfoGlyphSource::load(font)?;
    let padding = if no_padding {
        Padding::Tight
    } else {
        Padding::FromOrigin
    };
    let decoded = extract_glyph(&source, glyph, pixel_size, padding)?;

    if decoded.bitmap.is_empty() {
        println!("Glyph '{glyph}' is empty (no contours)");
        return Ok(());
    }

    let definition = GlyphDefinition::new(glyph)
        .with_rows(&decoded.bitmap.to_text_rows())
        .with_vertical_offset(decoded.vertical_offset);
    let mut entry = serde_json::Map::new();
    entry.insert(glyph.to_string(), serde_json::to_value(&definition)?);
    println!("{}", serde_json::to_string_pretty(&entry)?);
    Ok(())
}

/// Print the comparison report; `false` when the glyph differs
fn run_compare(glyph: &str, first: &Path, second: &Path, pixel_size: i32) -> Result<bool> {
    let first = UfoGlyphSource::load(first)?;
    let second = UfoGlyphSource::load(second)?;
    let report = compare_glyph(glyph, &first, &second, pixel_size)?;

    println!("{report}");
    let matched = report.all_match();
    if !matched {
        tracing::info!("Glyph '{}' differs between the fonts", glyph);
    }
    Ok(matched)
}

fn run_spaced(font: &Path, output: &Path, max_width: usize, pixel_size: i32) -> Result<()> {
    let source = UfoGlyphSource::load(font)?;
    let spaced = find_spaced_glyphs(&source, pixel_size, max_width);

    println!("Found {} spaced-out glyphs:", spaced.len());
    for glyph in &spaced {
        println!("  {:20} width={}  {}", glyph.name, glyph.width, glyph.unicode);
    }
    write_spaced_glyphs(&spaced, output)
}
