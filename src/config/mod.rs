//! Configuration management for `icongen.toml`.
//!
//! The config file is optional. Without it every setting has a default and
//! a bare `icongen` run renders `icons/icon.svg` into `icons/`.
//!
//! # Example
//!
//! ```toml
//! [icons]
//! source = "icons/icon.svg"   # SVG to rasterize
//! output = "icons"            # Directory receiving the PNGs
//! converter = "builtin"       # Rasterization backend: builtin | magick
//! magick = "magick"           # ImageMagick executable (converter = "magick")
//! dpi = 96.0                  # ImageMagick rendering density
//! ```
//!
//! Relative paths in the file resolve against the file's directory;
//! paths given on the command line resolve against the working directory.
//! The icon set itself is fixed, see [`crate::icon`].

mod error;

pub use error::{ConfigDiagnostics, ConfigError};

use crate::{cli::Cli, debug, image::Converter};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "icongen.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing icongen.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IconGenConfig {
    /// Directory relative paths resolve against (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Icon generation settings
    #[serde(default)]
    pub icons: IconsConfig,
}

/// `[icons]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconsConfig {
    /// SVG source file.
    pub source: PathBuf,

    /// Output directory for generated icons.
    pub output: PathBuf,

    /// Rasterization backend.
    pub converter: Converter,

    /// ImageMagick executable name or path.
    pub magick: String,

    /// Density passed to ImageMagick before resizing.
    pub dpi: f32,
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("icons/icon.svg"),
            output: PathBuf::from("icons"),
            converter: Converter::Builtin,
            magick: "magick".to_string(),
            dpi: 96.0,
        }
    }
}

impl IconGenConfig {
    /// Load configuration from CLI arguments.
    ///
    /// An explicit `--config` must exist; the default `icongen.toml` is
    /// only read when present.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match &cli.config {
            Some(path) => Self::from_path(&cwd.join(path))?,
            None => {
                let path = cwd.join(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::from_path(&path)?
                } else {
                    debug!("config"; "no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Self {
                        root: cwd.clone(),
                        ..Self::default()
                    }
                }
            }
        };

        config.apply_cli(cli, &cwd);
        config.validate().map_err(ConfigError::Diagnostics)?;
        Ok(config)
    }

    /// Read and parse a config file. Its parent directory becomes the root.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let mut config = Self::parse(&content)?;
        config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        debug!("config"; "loaded {}", path.display());
        Ok(config)
    }

    /// Parse config content without touching the filesystem.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply command-line overrides. CLI paths are relative to `cwd`.
    fn apply_cli(&mut self, cli: &Cli, cwd: &Path) {
        if let Some(input) = &cli.input {
            self.icons.source = cwd.join(input);
        }
        if let Some(output) = &cli.output {
            self.icons.output = cwd.join(output);
        }
        if let Some(converter) = cli.converter {
            self.icons.converter = converter;
        }
    }

    /// Validate settings, collecting every problem before failing.
    pub fn validate(&self) -> Result<(), ConfigDiagnostics> {
        let mut diag = ConfigDiagnostics::new();

        if self.icons.source.as_os_str().is_empty() {
            diag.error("icons.source", "source path must not be empty");
        }

        if self.icons.output.as_os_str().is_empty() {
            diag.error("icons.output", "output path must not be empty");
        } else {
            let output = self.output_dir();
            if output.exists() && !output.is_dir() {
                diag.error_with_hint(
                    "icons.output",
                    format!("`{}` exists and is not a directory", output.display()),
                    "point icons.output at a directory",
                );
            }
        }

        if self.icons.magick.trim().is_empty() {
            diag.error("icons.magick", "ImageMagick executable must not be empty");
        }

        if !self.icons.dpi.is_finite() || self.icons.dpi <= 0.0 {
            diag.error_with_hint(
                "icons.dpi",
                format!("dpi must be a positive number, got {}", self.icons.dpi),
                "the ImageMagick default is 96.0",
            );
        }

        diag.into_result()
    }

    /// Absolute path of the SVG source.
    pub fn source_path(&self) -> PathBuf {
        self.root.join(&self.icons.source)
    }

    /// Absolute path of the output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.icons.output)
    }
}

/// Parse a config string for tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> IconGenConfig {
    IconGenConfig::parse(content).expect("test config must parse")
}
