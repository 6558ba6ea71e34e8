//! Logo commands: add, remove, search, list, update

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use logocn_core::catalog::{remove_svg, IconAssetClient, Logo, ScoredLogo};

use crate::CliContext;

/// Result of adding a single logo
#[derive(Debug)]
enum AddOutcome {
    Added { name: String, path: PathBuf },
    AlreadyPresent { name: String, path: PathBuf },
    Failed { query: String, reason: String },
}

pub async fn execute_add(
    ctx: &CliContext,
    names: &[String],
    dir: Option<PathBuf>,
    force: bool,
) -> Result<()> {
    let mut registry = ctx.registry()?;
    let assets = ctx.asset_client()?;

    let logo_dir = resolve_logo_dir(ctx, dir)?;

    let mut outcomes = Vec::with_capacity(names.len());

    for (i, query) in names.iter().enumerate() {
        tracing::info!("Processing {} ({}/{})", query, i + 1, names.len());

        let logo = registry
            .find_by_name(query)
            .await
            .context("Failed to load logo registry")?;

        let outcome = match logo {
            Some(logo) => add_one(&assets, &logo, &logo_dir, force).await,
            None => AddOutcome::Failed {
                query: query.clone(),
                reason: format!(
                    "Logo \"{query}\" not found. Try \"logocn search {query}\" to find similar logos."
                ),
            },
        };
        outcomes.push(outcome);
    }

    print_add_summary(&outcomes);

    let failed = outcomes
        .iter()
        .filter(|o| matches!(o, AddOutcome::Failed { .. }))
        .count();
    if failed > 0 {
        anyhow::bail!("{} of {} logo(s) could not be added", failed, outcomes.len());
    }

    Ok(())
}

/// `--dir` when given, otherwise the configured directory under the working directory
pub fn resolve_logo_dir(ctx: &CliContext, dir: Option<PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(dir) => Ok(dir),
        None => {
            let cwd = std::env::current_dir().context("Failed to read working directory")?;
            Ok(ctx.config.logo_directory_in(&cwd))
        }
    }
}

async fn add_one(assets: &IconAssetClient, logo: &Logo, logo_dir: &Path, force: bool) -> AddOutcome {
    let expected_path = logo_dir.join(format!("{}.svg", logo.slug));
    if !force && expected_path.exists() {
        return AddOutcome::AlreadyPresent {
            name: logo.name.clone(),
            path: expected_path,
        };
    }

    let result = async {
        let svg = assets.download_svg(&logo.slug).await?;
        IconAssetClient::save_svg(&svg, &logo.slug, logo_dir).await
    }
    .await;

    match result {
        Ok(path) => AddOutcome::Added {
            name: logo.name.clone(),
            path,
        },
        Err(e) => AddOutcome::Failed {
            query: logo.name.clone(),
            reason: e.to_string(),
        },
    }
}

fn print_add_summary(outcomes: &[AddOutcome]) {
    println!();
    for outcome in outcomes {
        match outcome {
            AddOutcome::Added { name, path } => {
                println!("  + {} -> {}", name, display_path(path));
            }
            AddOutcome::AlreadyPresent { name, path } => {
                println!("  = {} already exists at {}", name, display_path(path));
            }
            AddOutcome::Failed { query, reason } => {
                println!("  x {query}: {reason}");
            }
        }
    }
    println!();
}

pub async fn execute_remove(ctx: &CliContext, names: &[String], dir: Option<PathBuf>) -> Result<()> {
    let logo_dir = resolve_logo_dir(ctx, dir)?;
    let mut missing = Vec::new();

    println!();
    for name in names {
        let removed = remove_svg(name, &logo_dir)
            .await
            .with_context(|| format!("Failed to remove \"{name}\""))?;

        if removed.is_empty() {
            println!("  x {name}: not found in {}", display_path(&logo_dir));
            missing.push(name.as_str());
        }
        for path in &removed {
            println!("  - {} ({})", name, display_path(path));
        }
    }
    println!();

    if !missing.is_empty() {
        anyhow::bail!("{} of {} logo(s) not found", missing.len(), names.len());
    }

    Ok(())
}

/// Path relative to the working directory when possible
pub(crate) fn display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

/// Table row for search results
#[derive(Tabled)]
struct SearchResultRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Score")]
    score: u32,
    #[tabled(rename = "Also known as")]
    aliases: String,
}

/// Table row for catalog pages
#[derive(Tabled)]
struct LogoRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Hex")]
    hex: String,
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

fn render_table<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

pub async fn execute_search(ctx: &CliContext, query: &str, json: bool, limit: usize) -> Result<()> {
    if query.trim().is_empty() {
        anyhow::bail!("Please provide a search query\n  Example: logocn search react");
    }

    let mut registry = ctx.registry()?;
    let results = registry
        .search_scored(query)
        .await
        .context("Search failed. Try running \"logocn update\" to refresh the logo cache")?;

    if json {
        let shown: Vec<&ScoredLogo> = results.iter().take(limit).collect();
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("\nNo logos found matching \"{query}\"");
        println!("\nSuggestions:");
        println!("  - Try a shorter search term");
        println!("  - Use \"logocn list\" to browse all logos");
        return Ok(());
    }

    println!(
        "\nFound {} matching logo{} for \"{}\":\n",
        results.len(),
        if results.len() == 1 { "" } else { "s" },
        query
    );
    print_search_table(&results, limit);

    println!();
    println!("To add a logo to your project:");
    println!("  logocn add {}", results[0].logo.slug);

    Ok(())
}

fn print_search_table(results: &[ScoredLogo], limit: usize) {
    let rows: Vec<SearchResultRow> = results
        .iter()
        .take(limit)
        .map(|hit| SearchResultRow {
            name: hit.logo.name.clone(),
            slug: hit.logo.slug.clone(),
            score: hit.score,
            aliases: truncate(&hit.logo.aliases_display(), 40),
        })
        .collect();

    println!("{}", render_table(&rows));

    if results.len() > limit {
        println!("  ...and {} more results", results.len() - limit);
        println!("  Refine your search for more specific results");
    }
}

pub async fn execute_list(
    ctx: &CliContext,
    page: i64,
    page_size: usize,
    search: Option<&str>,
) -> Result<()> {
    let mut registry = ctx.registry()?;

    if let Some(query) = search {
        let results = registry
            .search_scored(query)
            .await
            .context("Failed to list logos")?;

        if results.is_empty() {
            println!("\nNo logos found matching \"{query}\"");
            return Ok(());
        }

        println!("\nSearch results for \"{}\" ({} found):\n", query, results.len());
        print_search_table(&results, page_size.max(1));
        return Ok(());
    }

    let page = registry
        .get_paginated(page, page_size)
        .await
        .context("Failed to list logos. Try running \"logocn update\" to refresh the logo cache")?;

    println!("\nAvailable logos: {} from Simple Icons", page.total_count);
    println!("Page {} of {}\n", page.current_page, page.total_pages.max(1));

    if page.records.is_empty() {
        println!("  (catalog is empty)");
        return Ok(());
    }

    let rows: Vec<LogoRow> = page
        .records
        .iter()
        .map(|logo| LogoRow {
            name: logo.name.clone(),
            slug: logo.slug.clone(),
            hex: format!("#{}", logo.hex),
        })
        .collect();
    println!("{}", render_table(&rows));

    let mut hints = Vec::new();
    if page.current_page > 1 {
        hints.push(format!("Previous: logocn list --page {}", page.current_page - 1));
    }
    if page.current_page < page.total_pages {
        hints.push(format!("Next: logocn list --page {}", page.current_page + 1));
    }
    if !hints.is_empty() {
        println!("\n{}", hints.join(" | "));
    }

    Ok(())
}

pub async fn execute_update(ctx: &CliContext) -> Result<()> {
    let mut registry = ctx.registry()?;
    let before = registry.cache_stats().await;

    println!("Downloading latest Simple Icons metadata...");
    let count = registry.refresh().await.context(
        "Failed to update cache. Please check your internet connection and try again",
    )?;

    println!("\nSimple Icons cache updated: {count} logos available");

    if let Some(previous) = before.count {
        let diff = count as i64 - previous as i64;
        if diff > 0 {
            println!("  +{diff} new logos added");
        } else if diff < 0 {
            println!("  {} logos removed", diff.abs());
        }
    }

    Ok(())
}
