//! Configuration loading from TOML files

mod constants;
mod tables;

pub use constants::{
    BondConstants, BuildConstants, DefenseConstants, EnemyDefaults, EngineConstants,
    ReactionConstants, ResistanceConstants, TeamConstants,
};
pub use tables::{
    BaseStats, BondProfile, CharacterEntry, ReferenceTables, TalentMultipliers, TalentOverride,
};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load engine constants from a TOML file
pub fn load_constants(path: &Path) -> Result<EngineConstants, ConfigError> {
    load_toml(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_constants_file() {
        let result = load_constants(Path::new("/nonexistent/constants.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_partial_constants_use_defaults() {
        let constants: EngineConstants = parse_toml("[enemy]\nlevel = 100\n").unwrap();
        assert_eq!(constants.enemy.level, 100);
        assert!((constants.bond.assumed_value - 50.0).abs() < f64::EPSILON);
    }
}
