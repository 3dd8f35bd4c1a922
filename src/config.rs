//! Viewer configuration
//!
//! Read once at startup from `tsviewer.json` (or the file named by
//! `TSVIEWER_CONFIG`). Every field has a default, so a partial file is fine
//! and a missing file means "all defaults".

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::data::demo::DEMO_ROWS;
use crate::data::LoadOptions;
use crate::error::Result;
use crate::state::theme::Theme;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "tsviewer.json";

/// Environment variable overriding the configuration file path.
pub const CONFIG_ENV_VAR: &str = "TSVIEWER_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub theme: Theme,
    /// Scale time-like columns from seconds to milliseconds on load.
    pub convert_seconds_to_ms: bool,
    /// Start with the synthetic demo dataset instead of an empty table.
    pub load_demo_on_start: bool,
    pub demo_rows: usize,
    /// Number of non-axis columns the startup plot shows.
    pub initial_value_columns: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            convert_seconds_to_ms: true,
            load_demo_on_start: true,
            demo_rows: DEMO_ROWS,
            initial_value_columns: 2,
        }
    }
}

impl ViewerConfig {
    /// Path of the config file: `$TSVIEWER_CONFIG` if set, else
    /// `./tsviewer.json`.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }

    /// Load from [`ViewerConfig::default_path`].
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            convert_seconds_to_ms: self.convert_seconds_to_ms,
        }
    }
}
