//! Editor configuration.
//!
//! [`EditorConfig`] collects the tunables of the editing layer and loads from
//! a TOML file. Every field has a default, so a config file only needs the
//! keys it changes:
//!
//! ```toml
//! indent_step = 36
//! undo_limit = 250
//!
//! [zoom]
//! max = 400
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use folio_core::CoreError;
use folio_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::document::DEFAULT_UNDO_LIMIT;
use crate::error::{Error, Result};
use crate::persist;

/// Default indentation step, in layout units.
pub const DEFAULT_INDENT_STEP: u32 = 48;

/// Zoom slider range, in percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min: i32,
    pub max: i32,
    pub step: i32,
    pub default: i32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: 10,
            max: 500,
            step: 10,
            default: 100,
        }
    }
}

/// Tunables of the editing layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Units added or removed by one indent step.
    pub indent_step: u32,
    /// Maximum number of undo steps per surface.
    pub undo_limit: usize,
    /// Family shown in the font box before anything is selected.
    pub default_font_family: String,
    /// Point size shown in the size box before anything is selected.
    pub default_font_size: f32,
    /// Families offered by the font box.
    pub font_families: Vec<String>,
    /// Preset sizes offered by the size box.
    pub font_sizes: Vec<f32>,
    /// How many recently used colors the color pickers remember.
    pub recent_colors_limit: usize,
    /// JSON style store location. `None` keeps styles in memory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_store_path: Option<PathBuf>,
    /// Zoom slider range.
    pub zoom: ZoomConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            indent_step: DEFAULT_INDENT_STEP,
            undo_limit: DEFAULT_UNDO_LIMIT,
            default_font_family: "Sans Serif".to_string(),
            default_font_size: 12.0,
            font_families: ["Sans Serif", "Serif", "Monospace"]
                .into_iter()
                .map(String::from)
                .collect(),
            font_sizes: vec![
                8.0, 9.0, 10.0, 11.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0, 26.0, 28.0, 36.0,
                48.0, 72.0,
            ],
            recent_colors_limit: 10,
            style_store_path: None,
            zoom: ZoomConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::from_toml_str(&persist::read_text(path)?)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load a configuration file, using defaults when it does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(target: targets::CONFIG, path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Write the configuration to a file atomically.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        persist::atomic_write(path.as_ref(), self.to_toml_string()?.as_bytes())
    }

    /// The per-user configuration file location, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "Folio", "Folio").map(|dirs| dirs.config_dir().join("folio.toml"))
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.indent_step == 0 {
            return Err(invalid("indent_step", "must be positive"));
        }
        if self.undo_limit == 0 {
            return Err(invalid("undo_limit", "must be positive"));
        }
        let zoom = &self.zoom;
        if zoom.min <= 0 || zoom.min > zoom.max {
            return Err(invalid("zoom", "requires 0 < min <= max"));
        }
        if zoom.step <= 0 {
            return Err(invalid("zoom.step", "must be positive"));
        }
        if !(zoom.min..=zoom.max).contains(&zoom.default) {
            return Err(invalid("zoom.default", "must lie within min..=max"));
        }
        if !(self.default_font_size.is_finite() && self.default_font_size > 0.0) {
            return Err(invalid("default_font_size", "must be a positive number"));
        }
        if self.font_sizes.iter().any(|size| !(size.is_finite() && *size > 0.0)) {
            return Err(invalid("font_sizes", "sizes must be positive numbers"));
        }
        Ok(())
    }
}

fn invalid(property: &'static str, reason: &str) -> Error {
    CoreError::invalid_value(property, reason).into()
}
