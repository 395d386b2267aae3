pub mod commands;
pub mod runtime;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use self::commands::{ConfigArgs, PlanArgs, ValidateArgs};

#[derive(Parser, Debug)]
#[command(
    name = "pagereach",
    about = "Batch outreach automation for feed-driven profile pages",
    version
)]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Shorthand for --log-level debug
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import a target list and report what survives the profile filter
    Validate(ValidateArgs),
    /// Show how a target list partitions into batches
    Plan(PlanArgs),
    /// Print or write the effective configuration
    Config(ConfigArgs),
}

pub async fn run(cli: Cli) -> Result<()> {
    runtime::init_logging(&cli.log_level, cli.debug)?;
    let loaded = runtime::load_config(cli.config.as_ref()).await?;

    match cli.command {
        Command::Validate(args) => commands::cmd_validate(args, &loaded.config),
        Command::Plan(args) => commands::cmd_plan(args, &loaded.config),
        Command::Config(args) => commands::cmd_config(args, &loaded.config).await,
    }
}
