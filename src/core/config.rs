use crate::core::dirs::get_config_directory;
use crate::core::error::{RepoViewError, Result};
use crate::core::local_provider::DEFAULT_COMMIT_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE: &str = "config.json";

/// User preferences read from `<config dir>/repo-view/config.json`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Number of commits shown in the history
    pub commit_limit: usize,
    /// Force colored output on or off; `None` lets the terminal decide
    pub color: Option<bool>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            commit_limit: DEFAULT_COMMIT_LIMIT,
            color: None,
        }
    }
}

impl ViewerConfig {
    /// Load the user config, falling back to defaults when there is none
    pub fn load() -> Result<Self> {
        match get_config_directory() {
            Ok(config_dir) => Self::load_from(&config_dir.join(CONFIG_FILE)),
            Err(RepoViewError::ConfigDirectoryNotFound) => {
                log::debug!("No config directory, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    pub fn load_from(config_file: &Path) -> Result<Self> {
        if !config_file.exists() {
            return Ok(Self::default());
        }

        log::debug!("Loading config from {}", config_file.display());
        let content = std::fs::read_to_string(config_file)
            .map_err(|e| RepoViewError::config_read_failed(config_file, e))?;
        serde_json::from_str(&content)
            .map_err(|e| RepoViewError::config_parse_failed(config_file, e))
    }

    pub fn apply_color(&self) {
        if let Some(enabled) = self.color {
            colored::control::set_override(enabled);
        }
    }
}
