//! logocn - Add brand logos from Simple Icons to your project
//!
//! Thin command-line front end over `logocn_core`. Logs go to stderr so
//! stdout stays parseable for `--json` output.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use logocn_core::catalog::{IconAssetClient, LogoRegistry};
use logocn_core::config::LogocnConfig;
use logocn_core::paths::LogocnPaths;

mod cache_cli;
mod config_cli;
mod logo_cli;
mod uninstall_cli;

/// Trace modules for targeted debugging
#[derive(Debug, Clone, ValueEnum)]
enum TraceModule {
    Cache,
    Registry,
    Assets,
    All,
}

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "logocn",
    about = "Add brand logos from Simple Icons to your project",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Enable trace output for specific components (comma-separated: cache,registry,assets,all)
    #[clap(long, value_delimiter = ',', global = true)]
    trace: Vec<TraceModule>,

    /// Set log level
    #[clap(long, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Override the logocn home directory (config and cache)
    #[clap(long, global = true)]
    home: Option<PathBuf>,
}

#[derive(Parser, Debug)]
enum Command {
    /// Download logos into the project's logo directory
    Add {
        /// Logo names, slugs, or aliases
        #[clap(required = true)]
        names: Vec<String>,

        /// Target directory (defaults to the configured logo directory)
        #[clap(long)]
        dir: Option<PathBuf>,

        /// Re-download logos that already exist on disk
        #[clap(long)]
        force: bool,
    },

    /// Delete logos from the project's logo directory
    Remove {
        /// Logo names or slugs
        #[clap(required = true)]
        names: Vec<String>,

        /// Logo directory (defaults to the configured logo directory)
        #[clap(long)]
        dir: Option<PathBuf>,
    },

    /// Remove logocn's config and the project's logo directory
    Uninstall {
        /// Delete without asking; otherwise only list what would be removed
        #[clap(long, short)]
        yes: bool,

        /// Leave the logo directory in place
        #[clap(long)]
        keep_logos: bool,

        /// Also delete the catalog cache
        #[clap(long)]
        purge_cache: bool,

        /// Logo directory (defaults to the configured logo directory)
        #[clap(long)]
        dir: Option<PathBuf>,
    },

    /// Search the catalog, most relevant first
    Search {
        /// Search query (matches names, slugs, and aliases)
        query: String,

        /// Output results as JSON (includes scores)
        #[clap(long)]
        json: bool,

        /// Maximum number of results to display
        #[clap(long, default_value = "50")]
        limit: usize,
    },

    /// Browse the catalog page by page
    List {
        /// Page number (clamped into range)
        #[clap(long, default_value = "1", allow_negative_numbers = true)]
        page: i64,

        /// Logos per page
        #[clap(long, default_value = "50")]
        page_size: usize,

        /// Show search results instead of a page
        #[clap(long)]
        search: Option<String>,
    },

    /// Refresh the local Simple Icons catalog
    Update,

    /// Inspect or clear the local catalog cache
    Cache {
        #[clap(subcommand)]
        command: cache_cli::CacheCommand,
    },

    /// View or change logocn settings
    Config {
        #[clap(subcommand)]
        command: config_cli::ConfigCommand,
    },
}

fn initialize_tracing(log_level: &LogLevel, trace_modules: &[TraceModule]) {
    let mut filter = EnvFilter::new(log_level.to_filter_directive());

    for module in trace_modules {
        let directive = match module {
            TraceModule::Cache => "logocn_core::catalog::cache=trace",
            TraceModule::Registry => "logocn_core::catalog::registry=trace",
            TraceModule::Assets => "logocn_core::catalog::assets=trace",
            TraceModule::All => "logocn_core=trace",
        };

        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(!trace_modules.is_empty())
        .with_writer(std::io::stderr)
        .init();
}

/// Resolved per-user paths and configuration for one invocation
pub struct CliContext {
    pub paths: LogocnPaths,
    pub config: LogocnConfig,
}

impl CliContext {
    fn load(home: Option<&Path>) -> Result<Self> {
        let paths = match home {
            Some(root) => LogocnPaths::for_root(root),
            None => LogocnPaths::new()?,
        };
        let config = LogocnConfig::load(&paths)?;

        tracing::debug!(
            "Using config dir {} (cache: {})",
            paths.config_dir.display(),
            paths.catalog_cache_file().display()
        );

        Ok(Self { paths, config })
    }

    pub fn registry(&self) -> Result<LogoRegistry> {
        LogoRegistry::from_config(&self.paths, &self.config)
            .context("Failed to set up logo registry")
    }

    pub fn asset_client(&self) -> Result<IconAssetClient> {
        IconAssetClient::with_base_url(self.config.icon_base_url.clone())
            .context("Failed to set up icon downloader")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level, &cli.trace);

    let ctx = CliContext::load(cli.home.as_deref())?;

    match cli.command {
        Command::Add { names, dir, force } => {
            logo_cli::execute_add(&ctx, &names, dir, force).await
        }
        Command::Remove { names, dir } => logo_cli::execute_remove(&ctx, &names, dir).await,
        Command::Uninstall {
            yes,
            keep_logos,
            purge_cache,
            dir,
        } => {
            let options = uninstall_cli::UninstallOptions {
                yes,
                keep_logos,
                purge_cache,
            };
            uninstall_cli::execute(&ctx, dir, options).await
        }
        Command::Search { query, json, limit } => {
            logo_cli::execute_search(&ctx, &query, json, limit).await
        }
        Command::List {
            page,
            page_size,
            search,
        } => logo_cli::execute_list(&ctx, page, page_size, search.as_deref()).await,
        Command::Update => logo_cli::execute_update(&ctx).await,
        Command::Cache { command } => cache_cli::execute(&ctx, command).await,
        Command::Config { command } => config_cli::execute(&ctx, command),
    }
}
