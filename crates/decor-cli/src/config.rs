//! Configuration for the CLI
//!
//! This module defines the TOML configuration of the `decor` tool and finds
//! and loads it from various locations (explicit path, local directory,
//! system directory).

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Read(#[from] io::Error),

    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// How a decorated error is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// The plain text lines of the error
    #[default]
    Plain,
    /// A graphical diagnostic with labels under the option tokens
    Fancy,
}

/// Output settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: Format,
}

/// Exit status settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExitConfig {
    /// Exit code used when the error resolves to `0`
    pub default_code: i32,
}

impl Default for ExitConfig {
    fn default() -> Self {
        Self { default_code: 1 }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub exit: ExitConfig,
}

impl AppConfig {
    fn validate(self) -> Result<Self, ConfigError> {
        if !(1..=255).contains(&self.exit.default_code) {
            return Err(ConfigError::Validation(format!(
                "exit.default_code must be between 1 and 255, got {}",
                self.exit.default_code
            )));
        }
        Ok(self)
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (decor/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be read, parsed, or validated
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ConfigError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("decor/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "orreryworks", "decor") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    config.validate()
}
