//! Handler functions for config CLI commands.
//!
//! Implements the `path`, `get` and `init` subcommands over
//! [`FloorflowConfig`].

use std::path::PathBuf;

use crate::cli::ConfigAction;
use crate::config::FloorflowConfig;
use crate::{Error, Result};

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Get { key } => {
            println!("{}", cmd_config_get(config_path, &key)?);
            Ok(())
        }
        ConfigAction::Init { file, force } => {
            let path = cmd_config_init(file.as_deref().or(config_path), force)?;
            println!("Config file created at {}", path.display());
            Ok(())
        }
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    match FloorflowConfig::resolve_config_path(config_path) {
        Some(path) => {
            println!("{}", path.display());
            if !path.exists() {
                eprintln!(
                    "(file does not exist; run `{} config init` to create it)",
                    FloorflowConfig::project_name()
                );
            }
            Ok(())
        }
        None => Err(Error::config(
            "Could not determine config directory for this platform",
        )),
    }
}

/// Look up a configuration value by dotted key, rendered for display.
pub fn cmd_config_get(config_path: Option<&str>, key: &str) -> Result<String> {
    let config = FloorflowConfig::load(config_path)?;
    let root = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    let value = key
        .split('.')
        .try_fold(&root, |node, part| node.as_table()?.get(part))
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))?;
    // Every leaf is a string; `sheets` is the only table.
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        other => toml::to_string_pretty(other).map_err(|e| Error::config(e.to_string())),
    }
}

/// Create a default configuration file. Returns the path written.
pub fn cmd_config_init(file: Option<&str>, force: bool) -> Result<PathBuf> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => FloorflowConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(floorflow_core::Error::from)?;
    }

    let toml_str = FloorflowConfig::default().to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(floorflow_core::Error::from)?;
    tracing::info!(path = %path.display(), "wrote default config");
    Ok(path)
}

// ============================================================================
// Tests
// ============================================================================
