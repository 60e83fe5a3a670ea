use std::path::Path;

use twenty48_utils::EngineError;
use twenty48_utils::game::Rules;

/// Front-end configuration, loaded from TOML.
///
/// ```toml
/// seed = 42
///
/// [rules]
/// target_tile = 2048
/// four_probability = 0.1
///
/// [display]
/// clear_screen = true
/// ```
#[derive(Clone, Debug, PartialEq, serde::Deserialize, Default)]
pub struct Config {
    /// Fixed RNG seed. When absent a random seed is drawn and logged.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub rules: Rules,

    #[serde(default)]
    pub display: Display,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Display {
    /// Clear the terminal before drawing each frame.
    #[serde(default)]
    pub clear_screen: bool,
    /// Print the key help line under the board.
    #[serde(default = "defaults::show_help")]
    pub show_help: bool,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            clear_screen: false,
            show_help: defaults::show_help(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid rules: {0}")]
    Rules(#[from] EngineError),
}

impl Config {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate a TOML document.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.rules.validate()?;
        Ok(cfg)
    }
}

mod defaults {
    pub fn show_help() -> bool { true }
}
