//! Analysis configuration commands.
//!
//! Writes a default `crestline.toml` and shows the configuration a run would use.

use anyhow::{Context, bail};
use clap::{Args, Subcommand};
use crestline_config::{AnalysisConfig, CONFIG_FILE_NAME, ensure_user_config_dir};
use std::path::PathBuf;

use super::common::load_config;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Write a config file holding the default settings
    Init {
        /// Target file (default: crestline.toml in the user config directory)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration a run would use
    Show {
        /// Config file to show instead of the default lookup
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Init { path, force } => init_config(path, force),
        ConfigCommand::Show { config } => show_config(config),
    }
}

fn init_config(path: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => path,
        None => ensure_user_config_dir()?.join(CONFIG_FILE_NAME),
    };

    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    AnalysisConfig::default()
        .save(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

fn show_config(config: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config.as_deref())?;
    print!("{}", config.to_toml()?);
    Ok(())
}
