use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Reasons a match configuration is rejected before a match is created.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SettingsError {
    #[error("player count must be 4, 6 or 8 (got {count})")]
    InvalidPlayerCount { count: u32 },
    #[error("at least {min} rounds are required (got {rounds})")]
    TooFewRounds { rounds: u32, min: u32 },
    #[error("rounds must last at least {min} seconds (got {seconds})")]
    RoundTooShort { seconds: u32, min: u32 },
    #[error("at least one category must be selected")]
    NoCategories,
    #[error("unknown category: {name}")]
    UnknownCategory { name: String },
    #[error("selected categories contain no words")]
    EmptyWordPool,
    #[error("player at seat {seat} has no name")]
    MissingPlayerName { seat: usize },
}
