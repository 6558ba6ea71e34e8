//! logocn Catalog - Simple Icons mirror and logo resolution
//!
//! This module keeps a local, time-bounded copy of the upstream icon
//! catalog and resolves free-text queries against it.
//!
//! # Architecture
//!
//! ```text
//! Simple Icons CDN
//!     │
//!     ├── _data/simple-icons.json ← Full catalog (one GET per refresh)
//!     └── icons/<slug>.svg        ← Per-icon assets
//!            │
//!            ▼
//!     CacheStore                  ← <config>/cache/simple-icons.json, 7 day TTL
//!            │
//!            ▼
//!     LogoRegistry                ← In-memory index, loaded once per process
//!            │
//!            ▼
//!     add / search / list / update commands
//! ```

mod assets;
mod cache;
mod matching;
mod record;
mod registry;
mod slug;
mod source;

pub use assets::{is_svg_markup, remove_svg, IconAssetClient};
pub use cache::{CacheMetadata, CacheStore, CACHE_TTL};
pub use matching::{
    paginate, rank, resolve, score, Page, ScoredLogo, SCORE_ALIAS_CONTAINS, SCORE_EXACT_ALIAS,
    SCORE_EXACT_NAME, SCORE_EXACT_SLUG, SCORE_NAME_CONTAINS, SCORE_NAME_PREFIX,
    SCORE_SLUG_CONTAINS, SCORE_SLUG_PREFIX,
};
pub use record::{CatalogAliases, CatalogDocument, CatalogRecord, Logo};
pub use registry::LogoRegistry;
pub use slug::slugify;
pub use source::{CatalogSource, HttpCatalogSource};
