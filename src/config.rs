use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "package-cloud.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format (table, json)
    pub format: Option<String>,

    /// Folder receiving the lint log file
    pub log_folder: Option<PathBuf>,

    /// Lint packages in parallel
    pub parallel: Option<bool>,

    /// Exit with an error when any package is invalid
    pub fail_on_invalid: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: Some("table".to_string()),
            log_folder: Some(PathBuf::from(".")),
            parallel: Some(false),
            fail_on_invalid: Some(false),
        }
    }
}

/// Load `package-cloud.toml` from the working directory
pub fn load_config() -> Result<Config> {
    let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    load_config_from(&dir)
}

/// Load `package-cloud.toml` from `dir`, falling back to defaults when absent
pub fn load_config_from(dir: &Path) -> Result<Config> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;

    if let Some(format) = config.format.as_deref() {
        if !matches!(format, "table" | "json") {
            anyhow::bail!(
                "Invalid format '{}' in {}, expected table or json",
                format,
                config_path.display()
            );
        }
    }

    Ok(config)
}
