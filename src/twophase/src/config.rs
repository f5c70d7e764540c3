use crate::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Solver settings, read from a TOML file. Missing keys take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// The longest solution to search for.
    pub max_depth: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read the configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse the configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

impl SolverConfig {
    /// # Errors
    ///
    /// If `toml` is not valid TOML or has a value of the wrong type.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml)?)
    }

    /// # Errors
    ///
    /// If the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let toml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&toml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(SolverConfig::default().max_depth, 22);
        assert_eq!(SolverConfig::from_toml_str("").unwrap(), SolverConfig::default());
    }

    #[test]
    fn test_parse() {
        let config = SolverConfig::from_toml_str("max_depth = 18").unwrap();
        assert_eq!(config.max_depth, 18);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            SolverConfig::from_toml_str("max_depth = \"deep\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SolverConfig::from_toml_str("max_depth = -1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = SolverConfig { max_depth: 20 };
        let toml = toml::to_string(&config).unwrap();
        assert_eq!(SolverConfig::from_toml_str(&toml).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("twophase-no-such-config.toml");
        assert!(matches!(
            SolverConfig::load(&path),
            Err(ConfigError::Io { path: error_path, .. }) if error_path == path
        ));
    }
}
