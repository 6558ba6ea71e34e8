//! Remove logocn's files from a project and the user's machine

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::logo_cli::{display_path, resolve_logo_dir};
use crate::CliContext;

#[derive(Debug, Clone, Copy)]
pub struct UninstallOptions {
    pub yes: bool,
    pub keep_logos: bool,
    pub purge_cache: bool,
}

/// Something uninstall would delete
#[derive(Debug)]
enum Target {
    Config(PathBuf),
    Logos { path: PathBuf, svg_count: usize },
    Cache(PathBuf),
}

impl Target {
    fn path(&self) -> &Path {
        match self {
            Target::Config(path) | Target::Cache(path) => path,
            Target::Logos { path, .. } => path,
        }
    }

    fn describe(&self) -> String {
        match self {
            Target::Config(path) => format!("Config file: {}", path.display()),
            Target::Logos { path, svg_count } => {
                format!("Logo directory: {} ({svg_count} SVGs)", display_path(path))
            }
            Target::Cache(path) => format!("Catalog cache: {}", path.display()),
        }
    }
}

pub async fn execute(ctx: &CliContext, dir: Option<PathBuf>, options: UninstallOptions) -> Result<()> {
    let targets = collect_targets(ctx, dir, options).await?;

    if targets.is_empty() {
        println!("No logocn files found.");
        return Ok(());
    }

    println!("Found the following logocn files:\n");
    for target in &targets {
        println!("  - {}", target.describe());
    }
    println!();

    if !options.yes {
        println!("Nothing was removed. Re-run with --yes to delete these files.");
        return Ok(());
    }

    for target in &targets {
        remove_target(target).await?;
        println!("Removed {}", target.path().display());
    }

    println!("\nlogocn cleanup complete");
    Ok(())
}

async fn collect_targets(
    ctx: &CliContext,
    dir: Option<PathBuf>,
    options: UninstallOptions,
) -> Result<Vec<Target>> {
    let mut targets = Vec::new();

    let config_file = ctx.paths.config_file();
    if exists(&config_file).await {
        targets.push(Target::Config(config_file));
    }

    if !options.keep_logos {
        let logo_dir = resolve_logo_dir(ctx, dir)?;
        if exists(&logo_dir).await {
            let svg_count = count_svgs(&logo_dir).await?;
            targets.push(Target::Logos {
                path: logo_dir,
                svg_count,
            });
        }
    }

    if options.purge_cache && exists(&ctx.paths.cache_dir).await {
        targets.push(Target::Cache(ctx.paths.cache_dir.clone()));
    }

    Ok(targets)
}

async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

async fn count_svgs(dir: &Path) -> Result<usize> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read {}", dir.display()))?;

    let mut count = 0;
    while let Some(entry) = entries.next_entry().await? {
        if entry.path().extension().is_some_and(|ext| ext == "svg") {
            count += 1;
        }
    }
    Ok(count)
}

async fn remove_target(target: &Target) -> Result<()> {
    let path = target.path();
    let result = match target {
        Target::Config(_) => tokio::fs::remove_file(path).await,
        Target::Logos { .. } | Target::Cache(_) => tokio::fs::remove_dir_all(path).await,
    };
    result.with_context(|| format!("Failed to remove {}", path.display()))
}
