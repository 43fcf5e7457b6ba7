use game_core::DEFAULT_TICK_MS;
use game_persistence::connection::DEFAULT_DATABASE_URL;
use std::env;
use thiserror::Error;

pub const DEFAULT_WORDS_DIRECTORY: &str = "./words";
pub const DEFAULT_SNAPSHOT_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a positive number of milliseconds, got '{value}'")]
    InvalidDuration { key: &'static str, value: String },
    #[error("{key} must not be empty")]
    Empty { key: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub words_directory: String,
    pub tick_ms: u64,
    pub snapshot_interval_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any variable source; unset variables take defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            database_url: text(&lookup, "DATABASE_URL", DEFAULT_DATABASE_URL)?,
            words_directory: text(&lookup, "WORDS_DIRECTORY", DEFAULT_WORDS_DIRECTORY)?,
            tick_ms: millis(&lookup, "TICK_MS", DEFAULT_TICK_MS)?,
            snapshot_interval_ms: millis(
                &lookup,
                "SNAPSHOT_INTERVAL_MS",
                DEFAULT_SNAPSHOT_INTERVAL_MS,
            )?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            words_directory: DEFAULT_WORDS_DIRECTORY.to_string(),
            tick_ms: DEFAULT_TICK_MS,
            snapshot_interval_ms: DEFAULT_SNAPSHOT_INTERVAL_MS,
        }
    }
}

fn text<F>(lookup: &F, key: &'static str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default.to_string()),
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { key }),
        Some(value) => Ok(value.trim().to_string()),
    }
}

fn millis<F>(lookup: &F, key: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(default);
    };
    match value.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(ms),
        _ => Err(ConfigError::InvalidDuration { key, value }),
    }
}
