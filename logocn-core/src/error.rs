//! Catalog error types with clear, actionable messages

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while fetching, persisting, or reading the icon catalog
///
/// Resolution misses and empty search results are not errors; those surface
/// as `None` or an empty list.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Upstream unreachable or answered with a non-success status
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Response body or persisted file is not the expected JSON shape
    #[error("Failed to parse {origin} (invalid JSON or unexpected structure)")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Persisted catalog is unreadable even after a retry through refresh
    #[error("Failed to read cached catalog at {path}\n\nTry running:\n  logocn update")]
    CacheRead {
        path: PathBuf,
        #[source]
        source: Box<CatalogError>,
    },

    /// Filesystem failure while touching the cache or icon directory
    #[error("I/O error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Downloaded icon body does not look like SVG markup
    #[error("Invalid SVG content received for '{slug}'")]
    InvalidAsset { slug: String },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this failure came from the network rather than local disk
    pub fn is_network(&self) -> bool {
        matches!(self, CatalogError::Fetch { .. })
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_read_message_points_at_update() {
        let err = CatalogError::CacheRead {
            path: PathBuf::from("/tmp/simple-icons.json"),
            source: Box::new(CatalogError::Fetch {
                url: "https://example.com".to_string(),
                reason: "HTTP 503".to_string(),
            }),
        };

        let message = err.to_string();
        assert!(message.contains("/tmp/simple-icons.json"));
        assert!(message.contains("logocn update"));
        assert!(!err.is_network());
    }

    #[test]
    fn test_fetch_is_network() {
        let err = CatalogError::Fetch {
            url: "https://example.com/data.json".to_string(),
            reason: "HTTP 404 Not Found".to_string(),
        };
        assert!(err.is_network());
        assert_eq!(
            err.to_string(),
            "Failed to fetch https://example.com/data.json: HTTP 404 Not Found"
        );
    }
}
