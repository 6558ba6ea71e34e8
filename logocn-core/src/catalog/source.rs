//! Catalog source trait - Abstraction over where the catalog comes from
//!
//! Production code fetches the Simple Icons JSON over HTTP; tests swap in
//! an in-memory source.

use async_trait::async_trait;

use super::CatalogDocument;
use crate::config::DEFAULT_CATALOG_URL;
use crate::error::{CatalogError, Result};

/// Trait for upstream catalog providers
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the complete catalog document
    ///
    /// Returns `CatalogError::Fetch` when the source is unreachable or answers
    /// with a failure, and `CatalogError::Parse` when the body is not a
    /// catalog document.
    async fn fetch_catalog(&self) -> Result<CatalogDocument>;

    /// Source identifier for logging
    fn name(&self) -> &str;
}

/// Fetches the catalog document with a single HTTP GET
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalogSource {
    /// Source pointing at the default Simple Icons CDN URL
    pub fn new() -> Result<Self> {
        Self::with_url(DEFAULT_CATALOG_URL)
    }

    /// Source pointing at a custom catalog URL
    pub fn with_url(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let client = reqwest::Client::builder()
            .user_agent(concat!("logocn/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogError::Fetch {
                url: url.clone(),
                reason: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_catalog(&self) -> Result<CatalogDocument> {
        tracing::debug!("Fetching catalog from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CatalogError::Fetch {
                url: self.url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Fetch {
                url: self.url.clone(),
                reason: format!("HTTP {status}"),
            });
        }

        let content = response.text().await.map_err(|e| CatalogError::Fetch {
            url: self.url.clone(),
            reason: format!("failed to read response body: {e}"),
        })?;

        CatalogDocument::from_json(&content, &self.url)
    }

    fn name(&self) -> &str {
        "http"
    }
}
