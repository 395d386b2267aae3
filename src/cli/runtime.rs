use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

pub fn init_logging(level: &str, debug: bool) -> Result<()> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse().context("invalid log level")?
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(())
}

pub struct LoadedConfig {
    pub config: AppConfig,
    pub path: Option<PathBuf>,
}

/// Load the YAML config, preferring an explicit path, then
/// `./config/config.yaml`, then the per-user config directory. A missing
/// file yields defaults.
pub async fn load_config(config_path: Option<&PathBuf>) -> Result<LoadedConfig> {
    let candidate = match config_path {
        Some(path) => path.clone(),
        None => {
            let local = PathBuf::from("config/config.yaml");
            if local.exists() {
                local
            } else {
                let mut path = dirs::config_dir().context("failed to get config directory")?;
                path.push("pagereach");
                path.push("config.yaml");
                path
            }
        }
    };

    if !candidate.exists() {
        return Ok(LoadedConfig {
            config: AppConfig::default(),
            path: None,
        });
    }

    let contents = fs::read_to_string(&candidate)
        .await
        .with_context(|| format!("failed to read config {}", candidate.display()))?;
    let config: AppConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse config {}", candidate.display()))?;
    info!(path = %candidate.display(), "loaded configuration");
    Ok(LoadedConfig {
        config,
        path: Some(candidate),
    })
}

pub async fn write_config(config: &AppConfig, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(config).context("failed to serialize config")?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    fs::write(path, yaml)
        .await
        .with_context(|| format!("failed to write config {}", path.display()))?;
    Ok(())
}
