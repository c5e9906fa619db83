//! Configuration for the `floorflow` binary.
//!
//! Resolution order for the file: `--config`, then `FLOORFLOW_CONFIG`, then
//! `<config dir>/floorflow/config.toml`. A missing file means defaults.
//! `FLOORFLOW_SCRIPT_URL` and `FLOORFLOW_SHEET_ID` override the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use floorflow_client::{ClientConfig, DEFAULT_DOCS_BASE_URL, SheetNames};

use crate::{Error, Result};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "FLOORFLOW_CONFIG";
/// Environment variable overriding `script_url`.
pub const SCRIPT_URL_ENV: &str = "FLOORFLOW_SCRIPT_URL";
/// Environment variable overriding `sheet_id`.
pub const SHEET_ID_ENV: &str = "FLOORFLOW_SHEET_ID";

const PROJECT_NAME: &str = "floorflow";

/// Settings of the `floorflow` binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorflowConfig {
    /// Script endpoint of the project store.
    pub script_url: String,
    /// Spreadsheet id for the export endpoint.
    pub sheet_id: String,
    /// Host of the export endpoint.
    pub docs_base_url: String,
    /// Directory holding the session slots; platform data dir when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_dir: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// Sheet names read through the export endpoint.
    pub sheets: SheetNames,
}

impl Default for FloorflowConfig {
    fn default() -> Self {
        Self {
            script_url: String::new(),
            sheet_id: String::new(),
            docs_base_url: DEFAULT_DOCS_BASE_URL.to_string(),
            session_dir: None,
            log_level: None,
            sheets: SheetNames::default(),
        }
    }
}

impl FloorflowConfig {
    /// Name used for the config and data directories.
    pub fn project_name() -> &'static str {
        PROJECT_NAME
    }

    /// `<config dir>/floorflow/config.toml`, if the platform has one.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// The file that would be read for `explicit`.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var(CONFIG_ENV)
            && !path.is_empty()
        {
            return Some(PathBuf::from(path));
        }
        Self::default_config_path()
    }

    /// Loads the resolved file, or defaults when it does not exist, then
    /// applies environment overrides.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Parses one config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Applies `FLOORFLOW_*` overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(SCRIPT_URL_ENV).filter(|v| !v.is_empty()) {
            self.script_url = url;
        }
        if let Some(id) = lookup(SHEET_ID_ENV).filter(|v| !v.is_empty()) {
            self.sheet_id = id;
        }
    }

    /// Pretty TOML rendering.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Client settings; both endpoints must be set.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let config = ClientConfig::new(&self.script_url, &self.sheet_id)
            .with_docs_base_url(&self.docs_base_url)
            .with_sheets(self.sheets.clone());
        config.validate()?;
        Ok(config)
    }

    /// Directory holding the session slots.
    pub fn session_dir(&self) -> Result<PathBuf> {
        match &self.session_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(PROJECT_NAME))
                .ok_or_else(|| Error::config("Could not determine data directory for sessions")),
        }
    }
}
