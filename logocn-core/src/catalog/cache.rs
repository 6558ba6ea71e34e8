//! Persisted catalog cache
//!
//! Keeps one JSON document mirroring the upstream catalog, judged fresh by
//! file modification time against a 7-day TTL. A refresh always replaces
//! the whole file; it is never patched in place.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::Serialize;

use super::{CatalogDocument, CatalogSource, HttpCatalogSource};
use crate::config::LogocnConfig;
use crate::error::{CatalogError, Result};
use crate::paths::LogocnPaths;

/// How long a persisted catalog stays fresh (7 days)
pub const CACHE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Derived facts about the persisted catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheMetadata {
    /// Whether the cache file exists
    pub exists: bool,

    /// Whole hours since the last successful write
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_hours: Option<u64>,

    /// Number of records, when the file parses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

/// Owns the on-disk copy of the upstream catalog
pub struct CacheStore {
    path: PathBuf,
    ttl: Duration,
    source: Box<dyn CatalogSource>,
}

impl CacheStore {
    /// Create a store persisting to `path` and refreshing from `source`
    pub fn new(path: impl Into<PathBuf>, source: Box<dyn CatalogSource>) -> Self {
        Self {
            path: path.into(),
            ttl: CACHE_TTL,
            source,
        }
    }

    /// Create the default store for the given paths and configuration
    pub fn from_config(paths: &LogocnPaths, config: &LogocnConfig) -> Result<Self> {
        let source = HttpCatalogSource::with_url(config.catalog_url.clone())?;
        Ok(Self::new(paths.catalog_cache_file(), Box::new(source)))
    }

    /// Override the TTL
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Location of the persisted document
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Time since the file was last written, `None` if it cannot be stat'ed
    async fn age(&self) -> Option<Duration> {
        let metadata = tokio::fs::metadata(&self.path).await.ok()?;
        let modified = metadata.modified().ok()?;

        // An mtime in the future counts as brand new
        Some(
            SystemTime::now()
                .duration_since(modified)
                .unwrap_or(Duration::ZERO),
        )
    }

    /// Whether the persisted catalog exists and is younger than the TTL
    ///
    /// Any stat failure is treated as "not fresh".
    pub async fn is_fresh(&self) -> bool {
        match self.age().await {
            Some(age) => {
                let fresh = age < self.ttl;
                tracing::debug!(
                    "Catalog cache at {} is {:?} old (fresh: {})",
                    self.path.display(),
                    age,
                    fresh
                );
                fresh
            }
            None => {
                tracing::debug!("No catalog cache at {}", self.path.display());
                false
            }
        }
    }

    /// Fetch the full catalog and atomically replace the persisted file
    ///
    /// Missing slugs are filled in before writing. On any failure the
    /// previous file is left untouched. Returns the number of records written.
    pub async fn refresh(&self) -> Result<usize> {
        tracing::info!("Downloading Simple Icons metadata from {}", self.source.name());

        let mut document = self.source.fetch_catalog().await?;
        document.normalize_slugs();

        let content = document.to_json_pretty()?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&path, &content))
            .await
            .map_err(|e| CatalogError::io(&self.path, std::io::Error::other(e)))??;

        tracing::info!(
            "Cached {} logos at {}",
            document.len(),
            self.path.display()
        );
        Ok(document.len())
    }

    /// Read and parse the persisted document without any refresh
    pub async fn read_document(&self) -> Result<CatalogDocument> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::io(&self.path, e))?;

        CatalogDocument::from_json(&content, &self.path.display().to_string())
    }

    /// Return the persisted catalog, refreshing first when forced or stale
    ///
    /// A failed automatic refresh falls back to a stale but readable file. If
    /// the file cannot be read after refreshing, one more refresh is attempted
    /// before giving up with `CatalogError::CacheRead`.
    pub async fn load(&self, force_refresh: bool) -> Result<CatalogDocument> {
        if force_refresh {
            self.refresh().await?;
        } else if !self.is_fresh().await {
            if let Err(e) = self.refresh().await {
                match self.read_document().await {
                    Ok(stale) => {
                        tracing::warn!("Failed to refresh catalog, using stale cache: {}", e);
                        return Ok(stale);
                    }
                    Err(_) => return Err(e),
                }
            }
        }

        match self.read_document().await {
            Ok(document) => Ok(document),
            Err(first) => {
                tracing::warn!(
                    "Failed to read catalog cache ({}), refreshing once more",
                    first
                );
                self.refresh().await.map_err(|e| self.cache_read_error(e))?;
                self.read_document()
                    .await
                    .map_err(|e| self.cache_read_error(e))
            }
        }
    }

    fn cache_read_error(&self, source: CatalogError) -> CatalogError {
        CatalogError::CacheRead {
            path: self.path.clone(),
            source: Box::new(source),
        }
    }

    /// Existence, age in whole hours, and best-effort record count
    pub async fn stats(&self) -> CacheMetadata {
        let Some(age) = self.age().await else {
            return CacheMetadata::default();
        };

        let count = self.read_document().await.ok().map(|doc| doc.len());

        CacheMetadata {
            exists: true,
            age_hours: Some(age.as_secs() / 3600),
            count,
        }
    }

    /// Delete the persisted file if present
    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::debug!("Removed catalog cache {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CatalogError::io(&self.path, e)),
        }
    }
}

/// Write through a temporary file in the same directory, then rename
///
/// Blocking; `refresh` runs it on tokio's blocking pool.
fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    std::fs::create_dir_all(&dir).map_err(|e| CatalogError::io(&dir, e))?;

    let mut temp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| CatalogError::io(&dir, e))?;
    temp.write_all(content.as_bytes())
        .map_err(|e| CatalogError::io(temp.path(), e))?;
    temp.flush().map_err(|e| CatalogError::io(temp.path(), e))?;

    temp.persist(path)
        .map_err(|e| CatalogError::io(path, e.error))?;

    tracing::debug!("Saved catalog to cache: {}", path.display());
    Ok(())
}
