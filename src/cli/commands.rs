use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use pagereach_core_types::TargetFilter;

use crate::cli::runtime;
use crate::config::AppConfig;
use crate::importer::import_targets;

#[derive(Args, Clone, Debug)]
pub struct ValidateArgs {
    /// Target list to validate (CSV with order,title,url columns)
    #[arg(short, long)]
    pub input: PathBuf,
}

#[derive(Args, Clone, Debug)]
pub struct PlanArgs {
    /// Target list to partition into batches
    #[arg(short, long)]
    pub input: PathBuf,

    /// Override the configured batch size
    #[arg(long)]
    pub batch_size: Option<usize>,
}

#[derive(Args, Clone, Debug)]
pub struct ConfigArgs {
    /// Write the effective configuration to this path instead of printing it
    #[arg(long)]
    pub write: Option<PathBuf>,
}

pub fn cmd_validate(args: ValidateArgs, config: &AppConfig) -> Result<()> {
    let filter = TargetFilter::from_config(&config.discovery.filter)?;
    let summary = import_targets(&args.input, &filter)?;
    if summary.targets.is_empty() {
        bail!(
            "no valid targets in {} ({} rows scanned, {} rejected)",
            args.input.display(),
            summary.scanned,
            summary.rejected
        );
    }

    println!(
        "{} valid targets ({} rows scanned, {} rejected)",
        summary.targets.len(),
        summary.scanned,
        summary.rejected
    );
    for target in summary.targets.iter().take(10) {
        println!("  {}  {}", target.url, target.title);
    }
    if summary.targets.len() > 10 {
        println!("  … and {} more", summary.targets.len() - 10);
    }
    Ok(())
}

pub fn cmd_plan(args: PlanArgs, config: &AppConfig) -> Result<()> {
    let filter = TargetFilter::from_config(&config.discovery.filter)?;
    let summary = import_targets(&args.input, &filter)?;
    if summary.targets.is_empty() {
        bail!("no valid targets to plan for");
    }

    let batch_size = args
        .batch_size
        .unwrap_or(config.scheduler.batch_size)
        .max(1);
    let total = summary.targets.len();
    let total_batches = total.div_ceil(batch_size);
    println!("{total} targets in {total_batches} batches of up to {batch_size} tabs");
    for (index, chunk) in summary.targets.chunks(batch_size).enumerate() {
        let start = index * batch_size + 1;
        let end = start + chunk.len() - 1;
        println!("  batch {}/{}: targets {}-{}", index + 1, total_batches, start, end);
    }
    Ok(())
}

pub async fn cmd_config(args: ConfigArgs, config: &AppConfig) -> Result<()> {
    match args.write {
        Some(path) => {
            runtime::write_config(config, &path).await?;
            println!("wrote configuration to {}", path.display());
        }
        None => {
            let yaml = serde_yaml::to_string(config)?;
            print!("{yaml}");
        }
    }
    Ok(())
}
