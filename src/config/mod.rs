//! Configuration loading and validation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::normalize::TeamNames;
use crate::parse::ParseOptions;
use crate::source::DataLocation;

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

/// Parse a TTL such as "1h", "90m", "45s" or a bare number of seconds.
pub fn parse_ttl(s: &str) -> Option<Duration> {
    let s = s.trim();
    let (digits, unit_secs) = match s.char_indices().last()? {
        (i, 'h') => (&s[..i], 3600),
        (i, 'm') => (&s[..i], 60),
        (i, 's') => (&s[..i], 1),
        _ => (s, 1),
    };
    let n: u64 = digits.trim().parse().ok()?;
    n.checked_mul(unit_secs).map(Duration::from_secs)
}

/// Data file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// File name looked up in the working directory and its parents
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Explicit path, tried first
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Number of parent directories to probe
    #[serde(default = "default_search_depth")]
    pub search_depth: usize,
}

fn default_file_name() -> String {
    "football_matches_2024_2025.csv".to_string()
}

fn default_search_depth() -> usize {
    5
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            path: None,
            search_depth: default_search_depth(),
        }
    }
}

impl DataConfig {
    /// Search locations rooted at `start_dir`.
    pub fn location(&self, start_dir: impl Into<PathBuf>) -> DataLocation {
        DataLocation {
            file_name: self.file_name.clone(),
            path: self.path.clone(),
            start_dir: start_dir.into(),
            search_depth: self.search_depth,
        }
    }
}

/// Competition filtering and caching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueConfig {
    #[serde(default = "default_competition_code")]
    pub competition_code: String,

    #[serde(default = "default_finished_status")]
    pub finished_status: String,

    /// How long a parsed data file is reused, e.g. "1h"
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: String,
}

fn default_competition_code() -> String {
    "FL1".to_string()
}

fn default_finished_status() -> String {
    "FINISHED".to_string()
}

fn default_cache_ttl() -> String {
    "1h".to_string()
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            competition_code: default_competition_code(),
            finished_status: default_finished_status(),
            cache_ttl: default_cache_ttl(),
        }
    }
}

/// Extra team aliases merged over the built-in table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamsConfig {
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    9090
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub league: LeagueConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub teams: TeamsConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            data: DataConfig::default(),
            league: LeagueConfig::default(),
            server: ServerConfig::default(),
            teams: TeamsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load from `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            let config = Self::default();
            config.validate()?;
            Ok(config)
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.league.competition_code.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Competition code must not be empty".to_string(),
            ));
        }

        match parse_ttl(&self.league.cache_ttl) {
            Some(ttl) if !ttl.is_zero() => {}
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid cache TTL: {:?}",
                    self.league.cache_ttl
                )))
            }
        }

        if self.data.file_name.trim().is_empty() && self.data.path.is_none() {
            return Err(ConfigError::ValidationError(
                "Either data.file_name or data.path must be set".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Cache TTL; falls back to one hour if unparseable.
    pub fn cache_ttl(&self) -> Duration {
        parse_ttl(&self.league.cache_ttl).unwrap_or(crate::cache::DEFAULT_TTL)
    }

    /// Parser options built from league and team settings.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            competition_code: self.league.competition_code.clone(),
            finished_status: self.league.finished_status.clone(),
            team_names: TeamNames::default().with_aliases(self.teams.aliases.clone()),
        }
    }
}
