//! Configuration file commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use padlink_engine::EngineConfig;
use tracing::info;

use crate::commands::ConfigCommands;
use crate::error::CliError;

pub fn execute(cmd: &ConfigCommands, json: bool) -> Result<()> {
    match cmd {
        ConfigCommands::Init { path, force } => init(path.as_deref(), *force, json),
        ConfigCommands::Show { path } => show(path.as_deref()),
    }
}

/// An explicit path, or the platform default.
pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(EngineConfig::default_path().map_err(CliError::from)?),
    }
}

/// Load the configuration for a command.
///
/// An explicit path must exist and parse. Without one, a missing default file
/// yields the built-in defaults.
pub fn load(path: Option<&Path>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::load(path)
            .map_err(CliError::from)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => match EngineConfig::default_path() {
            Ok(path) => EngineConfig::load_or_default(&path).map_err(CliError::from)?,
            Err(_) => EngineConfig::default(),
        },
    };
    config.validate().map_err(CliError::from)?;
    Ok(config)
}

fn init(path: Option<&Path>, force: bool, json: bool) -> Result<()> {
    let path = resolve_path(path)?;
    if path.exists() && !force {
        return Err(CliError::ConfigExists(path).into());
    }

    EngineConfig::default()
        .save(&path)
        .map_err(CliError::from)?;
    info!(path = %path.display(), "Wrote default configuration");

    if json {
        println!(
            "{}",
            serde_json::json!({ "success": true, "path": path.display().to_string() })
        );
    } else {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn show(path: Option<&Path>) -> Result<()> {
    let config = load(path)?;
    let text = config.to_json().map_err(CliError::from)?;
    println!("{text}");
    Ok(())
}
