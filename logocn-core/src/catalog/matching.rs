//! Name resolution, ranked search, and pagination over loaded logos
//!
//! Resolution and search are deliberately separate: resolution walks a
//! fixed cascade and stops at the first hit, search scores every record and
//! keeps all of them. They can disagree on which record comes first.

use serde::Serialize;

use super::Logo;

/// Query equals the name (case-insensitive)
pub const SCORE_EXACT_NAME: u32 = 100;
/// Query equals the slug
pub const SCORE_EXACT_SLUG: u32 = 95;
/// Query equals an alias (case-insensitive)
pub const SCORE_EXACT_ALIAS: u32 = 90;
/// Name starts with the query
pub const SCORE_NAME_PREFIX: u32 = 80;
/// Slug starts with the query
pub const SCORE_SLUG_PREFIX: u32 = 75;
/// Name contains the query
pub const SCORE_NAME_CONTAINS: u32 = 60;
/// Slug contains the query
pub const SCORE_SLUG_CONTAINS: u32 = 55;
/// An alias contains the query
pub const SCORE_ALIAS_CONTAINS: u32 = 40;

/// A search hit with its relevance score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredLogo {
    pub logo: Logo,
    pub score: u32,
}

/// One page of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub records: Vec<Logo>,
    pub total_pages: usize,
    pub current_page: usize,
    pub total_count: usize,
}

/// Lowercased, trimmed query; `None` when nothing is left to match
fn normalize_query(query: &str) -> Option<String> {
    let normalized = query.trim().to_lowercase();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Resolve a query to at most one logo
///
/// Strategies, tried in order until one matches (first record in load
/// order wins within a strategy):
/// exact name, exact slug, exact alias, name prefix, slug prefix,
/// name substring, slug substring.
pub fn resolve<'a>(logos: &'a [Logo], query: &str) -> Option<&'a Logo> {
    let q = normalize_query(query)?;
    let q = q.as_str();

    let strategies: [&dyn Fn(&Logo) -> bool; 7] = [
        &|logo: &Logo| logo.name.to_lowercase() == q,
        &|logo: &Logo| logo.slug == q,
        &|logo: &Logo| logo.alias_list().iter().any(|a| a.to_lowercase() == q),
        &|logo: &Logo| logo.name.to_lowercase().starts_with(q),
        &|logo: &Logo| logo.slug.starts_with(q),
        &|logo: &Logo| logo.name.to_lowercase().contains(q),
        &|logo: &Logo| logo.slug.contains(q),
    ];

    strategies
        .iter()
        .find_map(|matches| logos.iter().find(|logo| matches(logo)))
}

/// Score one logo against a query, 0 when nothing matches
pub fn score(logo: &Logo, query: &str) -> u32 {
    normalize_query(query).map_or(0, |q| score_normalized(logo, &q))
}

fn score_normalized(logo: &Logo, q: &str) -> u32 {
    let name = logo.name.to_lowercase();
    let aliases: Vec<String> = logo.alias_list().iter().map(|a| a.to_lowercase()).collect();

    if name == q {
        SCORE_EXACT_NAME
    } else if logo.slug == q {
        SCORE_EXACT_SLUG
    } else if aliases.iter().any(|a| a == q) {
        SCORE_EXACT_ALIAS
    } else if name.starts_with(q) {
        SCORE_NAME_PREFIX
    } else if logo.slug.starts_with(q) {
        SCORE_SLUG_PREFIX
    } else if name.contains(q) {
        SCORE_NAME_CONTAINS
    } else if logo.slug.contains(q) {
        SCORE_SLUG_CONTAINS
    } else if aliases.iter().any(|a| a.contains(q)) {
        SCORE_ALIAS_CONTAINS
    } else {
        0
    }
}

/// Every logo related to the query, best first
///
/// Equal scores keep their load order (`sort_by` is stable).
pub fn rank(logos: &[Logo], query: &str) -> Vec<ScoredLogo> {
    let Some(q) = normalize_query(query) else {
        return Vec::new();
    };

    let mut hits: Vec<ScoredLogo> = logos
        .iter()
        .filter_map(|logo| {
            let score = score_normalized(logo, &q);
            (score > 0).then(|| ScoredLogo {
                logo: logo.clone(),
                score,
            })
        })
        .collect();

    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits
}

/// Slice out one page, clamping the requested page into range
///
/// A `page_size` of 0 is treated as 1.
pub fn paginate(logos: &[Logo], page: i64, page_size: usize) -> Page {
    let page_size = page_size.max(1);
    let total_count = logos.len();
    let total_pages = total_count.div_ceil(page_size);

    let current_page = if total_pages == 0 {
        1
    } else {
        page.clamp(1, total_pages as i64) as usize
    };

    let start = ((current_page - 1) * page_size).min(total_count);
    let end = (start + page_size).min(total_count);

    Page {
        records: logos[start..end].to_vec(),
        total_pages,
        current_page,
        total_count,
    }
}
