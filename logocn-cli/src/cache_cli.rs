//! Cache maintenance commands

use anyhow::{Context, Result};
use clap::Subcommand;

use logocn_core::catalog::CacheMetadata;

use crate::CliContext;

#[derive(Subcommand, Debug)]
pub enum CacheCommand {
    /// Show cache location, age, and logo count
    Stats {
        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// Delete the cached catalog (it is downloaded again on next use)
    Clear,
}

pub async fn execute(ctx: &CliContext, command: CacheCommand) -> Result<()> {
    let registry = ctx.registry()?;

    match command {
        CacheCommand::Stats { json } => {
            let stats = registry.cache_stats().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("{}", describe_stats(&stats, &registry.cache().path().display().to_string()));
            }
        }
        CacheCommand::Clear => {
            registry
                .clear_cache()
                .await
                .context("Failed to clear cache")?;
            println!("Cleared catalog cache at {}", registry.cache().path().display());
        }
    }

    Ok(())
}

fn describe_stats(stats: &CacheMetadata, location: &str) -> String {
    if !stats.exists {
        return format!(
            "No catalog cache at {location}\nRun \"logocn update\" to download it."
        );
    }

    let mut lines = vec![format!("Location: {location}")];
    if let Some(age) = stats.age_hours {
        lines.push(format!("Age:      {age} hour(s)"));
    }
    match stats.count {
        Some(count) => lines.push(format!("Logos:    {count}")),
        None => lines.push("Logos:    unknown (cache file is unreadable)".to_string()),
    }
    lines.join("\n")
}
