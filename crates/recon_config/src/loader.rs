//! Configuration file loading and validation.

use std::path::Path;

use crate::error::ConfigError;
use crate::types::ReconConfig;

/// Name of the configuration file looked up in a project directory.
pub const CONFIG_FILE: &str = "recon.toml";

/// Loads and validates `<project_dir>/recon.toml`.
pub fn load_config(project_dir: &Path) -> Result<ReconConfig, ConfigError> {
    load_config_file(&project_dir.join(CONFIG_FILE))
}

/// Loads and validates a configuration file at an explicit path.
pub fn load_config_file(path: &Path) -> Result<ReconConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, &path.display().to_string())
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<ReconConfig, ConfigError> {
    parse(content, "<string>")
}

fn parse(content: &str, origin: &str) -> Result<ReconConfig, ConfigError> {
    let config: ReconConfig = toml::from_str(content).map_err(|e| ConfigError::ParseError {
        origin: origin.to_string(),
        message: e.to_string(),
    })?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ReconConfig) -> Result<(), ConfigError> {
    let empty = |key: &'static str| ConfigError::ValidationError {
        key,
        reason: "must not be empty",
    };
    if config.artifacts.dir.as_os_str().is_empty() {
        return Err(empty("artifacts.dir"));
    }
    if config.artifacts.extension.trim_start_matches('.').is_empty() {
        return Err(empty("artifacts.extension"));
    }
    if config.sources.dir.as_os_str().is_empty() {
        return Err(empty("sources.dir"));
    }
    Ok(())
}
