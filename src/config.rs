//! Configuration management for block assembly

use crate::error::{ChainError, Result};
use crate::miner::SealingMode;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sealing: SealingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SealingConfig {
    #[serde(default)]
    pub mode: SealingMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

/// Load `config.toml` from the working directory, falling back to defaults
/// when it is absent.
pub fn load_config() -> Result<Config> {
    load_config_from(DEFAULT_CONFIG_PATH)
}

pub fn load_config_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Config::default());
    }

    let config_str = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&config_str)?;

    // Validate critical values
    if config.logging.level.parse::<tracing::Level>().is_err() {
        return Err(ChainError::Config(format!(
            "logging.level '{}' is not a valid level",
            config.logging.level
        )));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.sealing.mode, SealingMode::Strict);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_relaxed_mode() {
        let file = write_config("[sealing]\nmode = \"relaxed\"\n");
        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.sealing.mode, SealingMode::Relaxed);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let file = write_config("[sealing]\nmode = \"turbo\"\n");
        let err = load_config_from(file.path()).unwrap_err();
        assert!(matches!(err, ChainError::Config(_)));
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let file = write_config("[logging]\nlevel = \"loud\"\n");
        assert!(load_config_from(file.path()).is_err());
    }
}
