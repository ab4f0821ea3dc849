//! User configuration file handling
//!
//! Manages settings from ~/.config/bitglyph/settings.json

use crate::font_source::{BuildOptions, FontVariant};
use crate::geometry::LayoutMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration from ~/.config/bitglyph/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Variant built when no flag picks one ("fixed_pitch" or "proportional")
    pub default_variant: Option<FontVariant>,
    /// Suffix marking proportional variant glyphs (e.g. ".prop")
    pub variant_suffix: Option<String>,
    /// Feature tag for the substitution block (e.g. "ss01")
    pub feature_tag: Option<String>,
    /// Canonical fixed-pitch width in pixels
    pub cell_width: Option<usize>,
    /// Horizontal layout ("legacy" or "centered")
    pub layout: Option<LayoutMode>,
}

impl ConfigFile {
    /// Get the path to the bitglyph config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("bitglyph")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Get the path to the logs directory
    pub fn logs_dir() -> PathBuf {
        Self::config_dir().join("logs")
    }

    /// Get the path to today's log file
    pub fn current_log_file() -> PathBuf {
        let timestamp = chrono::Local::now().format("%Y-%m-%d");
        Self::logs_dir().join(format!("bitglyph-{timestamp}.log"))
    }

    /// Load configuration from the user config file
    pub fn load() -> Option<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path. Missing or unreadable files are `None`.
    pub fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    tracing::debug!("Loaded user settings from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    tracing::warn!("Failed to parse settings.json: {}", e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read settings.json: {}", e);
                None
            }
        }
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        tracing::debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// The settings written by `--new-config`: every built-in default spelled out
    pub fn with_defaults() -> Self {
        let options = BuildOptions::default();
        Self {
            default_variant: Some(options.variant),
            variant_suffix: Some(options.naming.variant_suffix),
            feature_tag: Some(options.feature_tag),
            cell_width: Some(options.cell_width),
            layout: None,
        }
    }

    /// Build options for `variant`, with these settings applied on top of
    /// the built-in defaults
    pub fn build_options(&self, variant: FontVariant) -> BuildOptions {
        let mut options = BuildOptions::for_variant(variant);
        if let Some(suffix) = &self.variant_suffix {
            options.naming.variant_suffix = suffix.clone();
        }
        if let Some(tag) = &self.feature_tag {
            options.feature_tag = tag.clone();
        }
        if let Some(cell_width) = self.cell_width {
            options.cell_width = cell_width;
        }
        if let Some(layout) = self.layout {
            options.layout = layout;
        }
        options
    }

    /// Initialize the user configuration directory
    ///
    /// This creates:
    /// 1. The ~/.config/bitglyph directory structure
    /// 2. A settings.json file with default values
    pub fn initialize_config_directory() -> anyhow::Result<()> {
        let config_dir = Self::config_dir();
        fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {config_dir:?}");

        let logs_dir = Self::logs_dir();
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {logs_dir:?}");

        let settings_path = Self::config_path();
        if !settings_path.exists() {
            Self::with_defaults().save()?;
            println!("Created settings file: {settings_path:?}");
        } else {
            println!("Settings file already exists: {settings_path:?}");
        }

        println!("\nConfiguration initialized successfully!");
        println!("You can now:");
        println!("  - Edit settings at: {settings_path:?}");
        println!("  - View application logs in: {logs_dir:?}");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_keeps_defaults() {
        let options = ConfigFile::default().build_options(FontVariant::Proportional);
        assert_eq!(options, BuildOptions::for_variant(FontVariant::Proportional));
    }

    #[test]
    fn test_config_overrides_defaults() {
        let config = ConfigFile {
            variant_suffix: Some(".narrow".to_string()),
            feature_tag: Some("ss02".to_string()),
            cell_width: Some(6),
            layout: Some(LayoutMode::Legacy),
            ..Default::default()
        };
        let options = config.build_options(FontVariant::FixedPitch);
        assert_eq!(options.naming.variant_suffix, ".narrow");
        assert_eq!(options.feature_tag, "ss02");
        assert_eq!(options.cell_width, 6);
        assert_eq!(options.layout, LayoutMode::Legacy);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let config = ConfigFile::with_defaults();
        config.save_to(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"default_variant\": \"fixed_pitch\""));
        assert_eq!(ConfigFile::load_from(&path), Some(config));
    }

    #[test]
    fn test_missing_or_broken_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(ConfigFile::load_from(&path), None);

        fs::write(&path, "{ not json").unwrap();
        assert_eq!(ConfigFile::load_from(&path), None);
    }
}
