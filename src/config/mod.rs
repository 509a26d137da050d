//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// League scoring rules shared by every calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Tournaments a player must have played to be eligible for season awards.
    /// Historically this moved between 8, 10 and 11; 11 is the current rule.
    #[serde(default = "default_min_played_for_awards")]
    pub min_played_for_awards: u32,

    /// Played count at which the worst point score is dropped
    #[serde(default = "default_first_drop_at")]
    pub first_drop_at: u32,

    /// Played count at which a second worst point score is dropped
    #[serde(default = "default_second_drop_at")]
    pub second_drop_at: u32,

    /// First season ranked on winnings with points as the tie-break.
    /// Earlier seasons break winnings ties on average place.
    #[serde(default = "default_new_tiebreak_from_season")]
    pub new_tiebreak_from_season: i32,
}

fn default_min_played_for_awards() -> u32 {
    11
}

fn default_first_drop_at() -> u32 {
    10
}

fn default_second_drop_at() -> u32 {
    20
}

fn default_new_tiebreak_from_season() -> i32 {
    2013
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            min_played_for_awards: default_min_played_for_awards(),
            first_drop_at: default_first_drop_at(),
            second_drop_at: default_second_drop_at(),
            new_tiebreak_from_season: default_new_tiebreak_from_season(),
        }
    }
}

impl ScoringRules {
    /// Whether a player with `num_played` tournaments qualifies for awards.
    pub fn is_eligible(&self, num_played: u32) -> bool {
        num_played >= self.min_played_for_awards
    }

    /// Whether `season` still uses the average-place winnings tie-break.
    pub fn uses_old_tiebreak(&self, season: i32) -> bool {
        season < self.new_tiebreak_from_season
    }

    /// How many worst point scores are discarded for a player.
    pub fn dropped_scores(&self, num_played: u32) -> usize {
        let mut dropped = 0;
        if num_played >= self.first_drop_at {
            dropped += 1;
        }
        if num_played >= self.second_drop_at {
            dropped += 1;
        }
        dropped
    }

    /// Validate the rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_played_for_awards == 0 {
            return Err(ConfigError::ValidationError(
                "min_played_for_awards must be greater than 0".to_string(),
            ));
        }

        if self.first_drop_at >= self.second_drop_at {
            return Err(ConfigError::ValidationError(
                "first_drop_at must be lower than second_drop_at".to_string(),
            ));
        }

        Ok(())
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// JSONL file holding one tournament per line
    #[serde(default = "default_tournaments_file")]
    pub tournaments_file: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub rules: ScoringRules,
}

fn default_tournaments_file() -> PathBuf {
    PathBuf::from("./data/tournaments.jsonl")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tournaments_file: default_tournaments_file(),
            log_level: default_log_level(),
            rules: ScoringRules::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tournaments_file.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "tournaments_file must not be empty".to_string(),
            ));
        }

        self.rules.validate()
    }
}
