//! Icon asset downloads
//!
//! Fetches `<slug>.svg` from the icon CDN and writes it into the project's
//! logo directory, and removes such files again.

use std::path::{Component, Path, PathBuf};

use super::slugify;
use crate::config::DEFAULT_ICON_BASE_URL;
use crate::error::{CatalogError, Result};

/// Cheap sanity check that a body is SVG markup
pub fn is_svg_markup(content: &str) -> bool {
    content.contains("<svg") && content.contains("</svg>")
}

/// Downloader for per-icon SVG assets
pub struct IconAssetClient {
    client: reqwest::Client,
    base_url: String,
}

impl IconAssetClient {
    /// Client for the default Simple Icons CDN
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_ICON_BASE_URL)
    }

    /// Client for a custom icon base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .user_agent(concat!("logocn/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogError::Fetch {
                url: base_url.clone(),
                reason: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self { client, base_url })
    }

    /// CDN URL for a slug
    pub fn icon_url(&self, slug: &str) -> String {
        format!("{}/{}.svg", self.base_url, slug)
    }

    /// Download the SVG markup for a slug
    pub async fn download_svg(&self, slug: &str) -> Result<String> {
        let url = self.icon_url(slug);
        tracing::debug!("Downloading {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Fetch {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Fetch {
                url,
                reason: format!("HTTP {status}"),
            });
        }

        let content = response.text().await.map_err(|e| CatalogError::Fetch {
            url: url.clone(),
            reason: format!("failed to read response body: {e}"),
        })?;

        if !is_svg_markup(&content) {
            return Err(CatalogError::InvalidAsset {
                slug: slug.to_string(),
            });
        }

        Ok(content)
    }

    /// Write SVG content to `<directory>/<file_stem>.svg`, creating the directory
    ///
    /// A trailing `.svg` on `file_stem` is not doubled. Existing files are
    /// overwritten.
    pub async fn save_svg(content: &str, file_stem: &str, directory: &Path) -> Result<PathBuf> {
        tokio::fs::create_dir_all(directory)
            .await
            .map_err(|e| CatalogError::io(directory, e))?;

        let stem = strip_svg_extension(file_stem);
        let file_path = directory.join(format!("{stem}.svg"));

        if tokio::fs::try_exists(&file_path).await.unwrap_or(false) {
            tracing::warn!("Overwriting existing file: {}", file_path.display());
        }

        tokio::fs::write(&file_path, content)
            .await
            .map_err(|e| CatalogError::io(&file_path, e))?;

        Ok(file_path)
    }
}

/// Delete the SVG file a logo name refers to
///
/// Tries `<name>.svg` and then `<slugify(name)>.svg` inside `directory`.
/// Returns every file removed; an empty list means nothing matched.
pub async fn remove_svg(name: &str, directory: &Path) -> Result<Vec<PathBuf>> {
    let stem = strip_svg_extension(name.trim());

    let mut candidates = Vec::with_capacity(2);
    if is_plain_file_name(stem) {
        candidates.push(format!("{stem}.svg"));
    }
    let slug = slugify(stem);
    if !slug.is_empty() && !candidates.contains(&format!("{slug}.svg")) {
        candidates.push(format!("{slug}.svg"));
    }

    let mut removed = Vec::new();
    for candidate in candidates {
        let file_path = directory.join(candidate);
        if !tokio::fs::try_exists(&file_path).await.unwrap_or(false) {
            continue;
        }
        tokio::fs::remove_file(&file_path)
            .await
            .map_err(|e| CatalogError::io(&file_path, e))?;
        tracing::debug!("Removed {}", file_path.display());
        removed.push(file_path);
    }

    Ok(removed)
}

/// A single normal path component, so a name cannot escape the directory
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn strip_svg_extension(name: &str) -> &str {
    let len = name.len();
    if len >= 4 && name.is_char_boundary(len - 4) && name[len - 4..].eq_ignore_ascii_case(".svg") {
        &name[..len - 4]
    } else {
        name
    }
}
