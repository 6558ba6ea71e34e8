//! Configuration commands

use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;

use logocn_core::config::LogocnConfig;

use crate::CliContext;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Set the directory where logos are saved
    SetDir {
        /// Directory, relative to the project root or absolute
        path: PathBuf,
    },

    /// Restore default settings
    Reset,
}

pub fn execute(ctx: &CliContext, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            println!("Config file: {}\n", ctx.paths.config_file().display());
            print!("{}", serde_yaml_ng::to_string(&ctx.config)?);
        }
        ConfigCommand::SetDir { path } => {
            let config = LogocnConfig {
                logo_directory: path,
                ..ctx.config.clone()
            };
            config.save(&ctx.paths)?;
            println!("Logo directory set to {}", config.logo_directory.display());
        }
        ConfigCommand::Reset => {
            LogocnConfig::default().save(&ctx.paths)?;
            println!("Configuration reset to defaults");
        }
    }

    Ok(())
}
