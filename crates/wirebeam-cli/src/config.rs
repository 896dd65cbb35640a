//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use wirebeam::{WirebeamError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for WirebeamError {
    fn from(err: ConfigError) -> Self {
        WirebeamError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (wirebeam/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or holds out-of-range values
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, WirebeamError> {
    // 1. An explicit path must exist
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    // 2. Local project directory
    let local_config = Path::new("wirebeam/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    // 3. Platform-specific config directory
    if let Some(proj_dirs) = ProjectDirs::from("com", "wirebeam", "wirebeam") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    // 4. Nothing found, fall back to defaults
    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, WirebeamError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    debug!(config:?; "Configuration loaded");

    Ok(config)
}

fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate().map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.timing().settle_delay().as_millis(), 100);
        assert_eq!(config.style().dash_length(), 1500.0);
    }

    #[test]
    fn test_partial_config() {
        let config = parse_config(
            r##"
            [timing]
            duration = 5.0

            [style]
            background_color = "#0a0a0a"

            [palette]
            blue = "#2563eb"
            "##,
        )
        .unwrap();

        assert_eq!(config.timing().duration(), 5.0);
        assert_eq!(config.timing().delay(), 0.0);
        assert!(config.style().background_color().unwrap().is_some());
        assert!(config.palette().palette().is_ok());
    }

    #[test]
    fn test_unknown_accent_is_a_parse_error() {
        let err = parse_config("[palette]\nteal = \"#14b8a6\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_parse_error_reports_location() {
        let err = parse_config("[timing]\nduration = 3.0\ndelay = \"soon\"\n").unwrap_err();
        match err {
            ConfigError::Parse(msg) => {
                assert!(msg.contains("line 3"), "no location in `{msg}`");
                assert!(msg.contains("delay"));
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_value_is_a_validation_error() {
        let err = parse_config("[style]\ndash_length = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(msg) if msg.contains("dash_length")));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load_config(Some("definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("Missing configuration file"));
    }
}
