//! Logo registry - the in-memory index over the cached catalog
//!
//! The index is loaded from the cache store on first use and kept for the
//! rest of the process. Only `refresh` throws it away.

use std::collections::HashSet;

use super::matching::{paginate, rank, resolve, Page, ScoredLogo};
use super::{CacheMetadata, CacheStore, CatalogDocument, Logo};
use crate::config::LogocnConfig;
use crate::error::Result;
use crate::paths::LogocnPaths;

/// Resolves and searches logos from the cached catalog
pub struct LogoRegistry {
    cache: CacheStore,
    records: Option<Vec<Logo>>,
}

impl LogoRegistry {
    /// Create a registry over an existing cache store
    pub fn new(cache: CacheStore) -> Self {
        Self {
            cache,
            records: None,
        }
    }

    /// Create the default registry for the given paths and configuration
    pub fn from_config(paths: &LogocnPaths, config: &LogocnConfig) -> Result<Self> {
        Ok(Self::new(CacheStore::from_config(paths, config)?))
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Whether the index has been loaded in this process
    pub fn is_loaded(&self) -> bool {
        self.records.is_some()
    }

    /// Load the index from the cache store if it has not been loaded yet
    pub async fn ensure_loaded(&mut self) -> Result<&[Logo]> {
        if self.records.is_none() {
            let document = self.cache.load(false).await?;
            let records = build_index(&document);
            tracing::debug!("Loaded {} logos into registry", records.len());
            self.records = Some(records);
        }

        Ok(self.records.as_deref().unwrap_or_default())
    }

    /// Resolve a free-text query to the single best logo
    pub async fn find_by_name(&mut self, query: &str) -> Result<Option<Logo>> {
        let records = self.ensure_loaded().await?;
        Ok(resolve(records, query).cloned())
    }

    /// Every logo related to the query, most relevant first
    pub async fn search(&mut self, query: &str) -> Result<Vec<Logo>> {
        Ok(self
            .search_scored(query)
            .await?
            .into_iter()
            .map(|hit| hit.logo)
            .collect())
    }

    /// Like `search`, keeping each hit's score
    pub async fn search_scored(&mut self, query: &str) -> Result<Vec<ScoredLogo>> {
        let records = self.ensure_loaded().await?;
        Ok(rank(records, query))
    }

    /// All logos in catalog order
    pub async fn get_all(&mut self) -> Result<&[Logo]> {
        self.ensure_loaded().await
    }

    /// One page of the catalog; `page` is clamped into range
    pub async fn get_paginated(&mut self, page: i64, page_size: usize) -> Result<Page> {
        let records = self.ensure_loaded().await?;
        Ok(paginate(records, page, page_size))
    }

    /// Number of loaded logos
    pub async fn count(&mut self) -> Result<usize> {
        Ok(self.ensure_loaded().await?.len())
    }

    /// Force a catalog refresh and drop the in-memory index
    ///
    /// If the refresh fails the current index (and the file it came from)
    /// stays in place.
    pub async fn refresh(&mut self) -> Result<usize> {
        let count = self.cache.refresh().await?;
        self.records = None;
        Ok(count)
    }

    pub async fn cache_stats(&self) -> CacheMetadata {
        self.cache.stats().await
    }

    /// Delete the persisted catalog; the loaded index is kept
    pub async fn clear_cache(&self) -> Result<()> {
        self.cache.clear().await
    }
}

/// Convert a document to logos, keeping the first record for each slug
fn build_index(document: &CatalogDocument) -> Vec<Logo> {
    let mut seen = HashSet::with_capacity(document.len());

    document
        .icons
        .iter()
        .map(Logo::from_record)
        .filter(|logo| {
            let fresh = seen.insert(logo.slug.clone());
            if !fresh {
                tracing::warn!(
                    "Skipping duplicate slug '{}' ({})",
                    logo.slug,
                    logo.name
                );
            }
            fresh
        })
        .collect()
}
