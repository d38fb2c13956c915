//! Config command - inspect and initialize configuration.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use paylint_core::models::config::PaylintConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Output path (default: the standard config location)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the configuration file path
    Path,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    let config_path = default_config_path();

    match args.command {
        ConfigCommand::Show => {
            let config = if config_path.exists() {
                PaylintConfig::from_file(&config_path)?
            } else {
                println!(
                    "{} No config file found, showing defaults.",
                    style("ℹ").blue()
                );
                PaylintConfig::default()
            };
            println!("{}", serde_json::to_string_pretty(&config)?);
        }

        ConfigCommand::Init { output, force } => {
            let target = output.unwrap_or(config_path);
            if target.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    target.display()
                );
            }
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            PaylintConfig::default().save(&target)?;
            println!(
                "{} Created configuration file at {}",
                style("✓").green(),
                target.display()
            );
        }

        ConfigCommand::Path => {
            println!("Configuration file: {}", config_path.display());
            if config_path.exists() {
                println!("Status: {}", style("exists").green());
            } else {
                println!("Status: {}", style("not created").yellow());
                println!();
                println!("Run 'paylint config init' to create a configuration file.");
            }
        }
    }

    Ok(())
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("paylint")
        .join("config.json")
}
