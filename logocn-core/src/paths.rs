use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Environment variable that relocates every per-user logocn file
pub const HOME_ENV_VAR: &str = "LOGOCN_HOME";

/// File name of the persisted catalog inside the cache directory
pub const CATALOG_CACHE_FILE: &str = "simple-icons.json";

/// File name of the user configuration inside the config directory
pub const CONFIG_FILE: &str = "config.yaml";

/// Path management for logocn per-user files
#[derive(Debug, Clone)]
pub struct LogocnPaths {
    /// Configuration directory
    pub config_dir: PathBuf,
    /// Cache directory (<config>/cache/)
    pub cache_dir: PathBuf,
}

impl LogocnPaths {
    /// Resolve paths from `LOGOCN_HOME`, then platform directories, then `~/.logocn`
    pub fn new() -> Result<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV_VAR).filter(|v| !v.is_empty()) {
            return Ok(Self::for_root(Path::new(&home)));
        }

        let config_dir = ProjectDirs::from("", "", "logocn")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .or_else(|| dirs::home_dir().map(|home| home.join(".logocn")))
            .context("Could not determine config directory")?;

        let cache_dir = config_dir.join("cache");
        Ok(Self {
            config_dir,
            cache_dir,
        })
    }

    /// Create paths rooted at an explicit directory
    pub fn for_root(root: &Path) -> Self {
        let config_dir = root.to_path_buf();
        let cache_dir = config_dir.join("cache");
        Self {
            config_dir,
            cache_dir,
        }
    }

    /// Persisted catalog document
    pub fn catalog_cache_file(&self) -> PathBuf {
        self.cache_dir.join(CATALOG_CACHE_FILE)
    }

    /// User configuration file
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// Ensure all directories exist
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir).with_context(|| {
            format!(
                "Failed to create config directory: {}",
                self.config_dir.display()
            )
        })?;
        std::fs::create_dir_all(&self.cache_dir).with_context(|| {
            format!(
                "Failed to create cache directory: {}",
                self.cache_dir.display()
            )
        })?;
        Ok(())
    }
}
