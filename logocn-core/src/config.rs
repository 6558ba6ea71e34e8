//! User configuration (`config.yaml`)
//!
//! Every field is optional in the file; anything missing falls back to the
//! defaults below.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::paths::LogocnPaths;

/// Default directory (relative to the working directory) where logos are saved
pub const DEFAULT_LOGO_DIRECTORY: &str = "components/logos";

/// Upstream catalog document
pub const DEFAULT_CATALOG_URL: &str =
    "https://cdn.jsdelivr.net/npm/simple-icons@v9/_data/simple-icons.json";

/// Upstream per-icon SVG directory
pub const DEFAULT_ICON_BASE_URL: &str = "https://cdn.jsdelivr.net/npm/simple-icons@v9/icons";

/// logocn user configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogocnConfig {
    /// Where `add` writes SVG files
    pub logo_directory: PathBuf,

    /// URL of the full catalog JSON document
    pub catalog_url: String,

    /// Base URL for `<slug>.svg` downloads
    pub icon_base_url: String,
}

impl Default for LogocnConfig {
    fn default() -> Self {
        Self {
            logo_directory: PathBuf::from(DEFAULT_LOGO_DIRECTORY),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            icon_base_url: DEFAULT_ICON_BASE_URL.to_string(),
        }
    }
}

impl LogocnConfig {
    /// Load configuration from the default location
    pub fn load(paths: &LogocnPaths) -> Result<Self> {
        Self::load_from_path(&paths.config_file())
    }

    /// Load configuration from a specific path, defaulting when absent
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", config_path.display()))
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        let content =
            serde_yaml_ng::to_string(self).context("Failed to serialize logocn config")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config: {}", config_path.display()))?;

        Ok(())
    }

    /// Save configuration to the default location
    pub fn save(&self, paths: &LogocnPaths) -> Result<()> {
        self.save_to_path(&paths.config_file())
    }

    /// Absolute logo directory, resolved against `cwd` when relative
    pub fn logo_directory_in(&self, cwd: &Path) -> PathBuf {
        if self.logo_directory.is_absolute() {
            self.logo_directory.clone()
        } else {
            cwd.join(&self.logo_directory)
        }
    }
}
