//! TOML settings for the `fieldmap` tool.
//!
//! The settings file is resolved in this order:
//!
//! 1. `--config <path>` (or the `FABRYK_FIELDMAP_CONFIG` environment variable)
//! 2. `<platform config dir>/fabryk/fieldmap.toml`
//!
//! An explicitly named file must exist. A missing platform default is not an
//! error; built-in defaults are used instead.
//!
//! ```toml
//! mappings = "/etc/fabryk/field_mappings.yml"
//! terminology = "/etc/fabryk/mods.yml"
//!
//! [output]
//! pretty = true
//! ```

use std::path::{Path, PathBuf};

use fabryk_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Settings file name inside the platform config directory.
const CONFIG_FILE: &str = "fieldmap.toml";

/// Settings loaded from the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mapping configuration file; the stock mappings are used when unset.
    pub mappings: Option<PathBuf>,

    /// Terminology used by `build` when none is given on the command line.
    pub terminology: Option<PathBuf>,

    /// Output formatting.
    pub output: OutputSettings,
}

/// Output formatting settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Settings {
    /// Load settings, falling back to defaults when no file is configured.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        match config_path {
            Some(path) => Self::from_path(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_path(&path),
                _ => {
                    tracing::debug!("No settings file found; using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Read and parse a settings file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::config(format!(
                "Settings file does not exist: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        tracing::info!(path = %path.display(), "Loading settings");
        Self::from_toml_str(&content)
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::parse(format!("Invalid settings file: {e}")))
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Apply command-line overrides. Flags win over file values.
    pub fn with_overrides(mut self, mappings: Option<PathBuf>, compact: bool) -> Self {
        if mappings.is_some() {
            self.mappings = mappings;
        }
        if compact {
            self.output.pretty = false;
        }
        self
    }
}

/// Resolve the settings file path without reading it.
pub fn resolve_config_path(config_path: Option<&str>) -> Option<PathBuf> {
    config_path.map(PathBuf::from).or_else(default_config_path)
}

/// `<platform config dir>/fabryk/fieldmap.toml`, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("fabryk").join(CONFIG_FILE))
}

// ============================================================================
// Tests
// ============================================================================
