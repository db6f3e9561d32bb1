//! Generator configuration.
//!
//! Handles loading and validating `config.toml`. Every key has a stock
//! default, so a config file only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! ```text
//! source/
//! ├── config.toml              # Optional; stock defaults apply when absent
//! ├── reference.toml
//! └── channels/
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! channels_dir = "channels"         # Playlist tree inside the source directory
//! reference_file = "reference.toml" # Category, country and language lists
//! nsfw_categories = ["xxx"]         # Category ids left out of *.sfw.m3u
//!
//! [output]
//! nojekyll = true                   # Write the .nojekyll marker
//! pretty_json = false               # Pretty-print channels.json
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Generator configuration loaded from `config.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory holding the source playlists, relative to the source root.
    pub channels_dir: String,
    /// Reference list file, relative to the source root.
    pub reference_file: String,
    /// Category ids whose channels are excluded from SFW variants.
    pub nsfw_categories: Vec<String>,
    /// Output artifact settings.
    pub output: OutputConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            channels_dir: "channels".to_string(),
            reference_file: "reference.toml".to_string(),
            nsfw_categories: vec!["xxx".to_string()],
            output: OutputConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channels_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "channels_dir must not be empty".into(),
            ));
        }
        if self.reference_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "reference_file must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Whether a channel in the given category belongs in SFW variants.
    ///
    /// Uncategorized channels are always SFW.
    pub fn is_sfw_category(&self, category_id: Option<&str>) -> bool {
        match category_id {
            Some(id) => !self
                .nsfw_categories
                .iter()
                .any(|nsfw| nsfw.eq_ignore_ascii_case(id)),
            None => true,
        }
    }
}

/// Output artifact settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Write an empty `.nojekyll` so GitHub Pages serves dotfiles untouched.
    pub nojekyll: bool,
    /// Pretty-print `channels.json` instead of emitting a single line.
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            nojekyll: true,
            pretty_json: false,
        }
    }
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Load and validate `config.toml` from the given directory.
///
/// Stock defaults apply when the file is absent. Keys missing from the file
/// fall back to their defaults, nested tables included.
pub fn load_config(root: &Path) -> Result<GeneratorConfig, ConfigError> {
    let config_path = root.join("config.toml");
    let config: GeneratorConfig = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        toml::from_str(&content)?
    } else {
        GeneratorConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Channel Index Configuration
# ==========================
# Every key is optional. Delete what you do not change; stock values apply.

# Directory, relative to the source root, scanned recursively for *.m3u
# playlists. Files are read in path order.
channels_dir = "channels"

# TOML file, relative to the source root, listing the reference entities:
#
#   [[categories]]
#   id = "news"
#   name = "News"
#
#   [[countries]]
#   code = "us"
#   name = "United States"
#
#   [[languages]]
#   code = "eng"
#   name = "English"
reference_file = "reference.toml"

# Category ids whose channels are left out of every *.sfw.m3u playlist.
nsfw_categories = ["xxx"]

[output]
# Write an empty .nojekyll marker at the output root.
nojekyll = true

# Pretty-print channels.json. The default is a single compact line.
pretty_json = false
"##
}
