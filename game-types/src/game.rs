use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::errors::SettingsError;
use crate::player::{Player, Team, TeamColor};

pub const ALLOWED_PLAYER_COUNTS: [u32; 3] = [4, 6, 8];
pub const MAX_PLAYERS: usize = 8;
pub const MIN_ROUNDS: u32 = 3;
pub const MIN_ROUND_SECONDS: u32 = 60;

/// Match configuration chosen on the setup screens.
///
/// Stored settings are merged with the defaults field by field, so records
/// written by older builds still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct GameSettings {
    pub player_count: u32,
    pub rounds_count: u32,
    pub round_duration_seconds: u32,
    pub selected_categories: Vec<String>,
    pub player_names: Vec<String>, // always MAX_PLAYERS slots once normalized
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            player_count: 4,
            rounds_count: 3,
            round_duration_seconds: 90,
            selected_categories: Vec::new(),
            player_names: vec![String::new(); MAX_PLAYERS],
        }
    }
}

impl GameSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !ALLOWED_PLAYER_COUNTS.contains(&self.player_count) {
            return Err(SettingsError::InvalidPlayerCount {
                count: self.player_count,
            });
        }
        if self.rounds_count < MIN_ROUNDS {
            return Err(SettingsError::TooFewRounds {
                rounds: self.rounds_count,
                min: MIN_ROUNDS,
            });
        }
        if self.round_duration_seconds < MIN_ROUND_SECONDS {
            return Err(SettingsError::RoundTooShort {
                seconds: self.round_duration_seconds,
                min: MIN_ROUND_SECONDS,
            });
        }
        if self.selected_categories.is_empty() {
            return Err(SettingsError::NoCategories);
        }
        for seat in 0..self.player_count as usize {
            let named = self
                .player_names
                .get(seat)
                .is_some_and(|name| !name.trim().is_empty());
            if !named {
                return Err(SettingsError::MissingPlayerName { seat });
            }
        }
        Ok(())
    }

    /// Pads or truncates the name list to `MAX_PLAYERS` slots.
    pub fn normalized(mut self) -> Self {
        self.player_names.resize(MAX_PLAYERS, String::new());
        self
    }

    pub fn team_count(&self) -> usize {
        self.player_count as usize / 2
    }

    pub fn round_duration_ms(&self) -> u64 {
        u64::from(self.round_duration_seconds) * 1000
    }

    /// Whole-match time shared out between the teams.
    pub fn total_budget_ms(&self) -> u64 {
        u64::from(self.rounds_count) * self.round_duration_ms()
    }

    /// Equal split of the match budget; any remainder of the division is dropped.
    pub fn team_budget_ms(&self) -> u64 {
        match self.team_count() {
            0 => 0,
            teams => self.total_budget_ms() / teams as u64,
        }
    }

    /// Names of the seated players, trimmed, in seat order.
    pub fn seated_names(&self) -> Vec<String> {
        self.player_names
            .iter()
            .take(self.player_count as usize)
            .map(|name| name.trim().to_string())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MatchPhase {
    Setup,         // No match exists
    RoundStarting, // Waiting for the players to start the round
    Playing,       // Clock running
    Paused,
    HelpOverlay,
    RoundFinished, // Round timer ran out, waiting for acknowledgment
    GameOver,
}

impl MatchPhase {
    pub fn is_running(&self) -> bool {
        matches!(self, MatchPhase::Playing)
    }
}

/// Winner of a finished match as recorded in the history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum WinnerTag {
    Team(TeamColor),
    Tie,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub date: String, // ISO 8601 string
    pub players: Vec<String>,
    pub winner: WinnerTag,
    pub winner_names: Vec<String>,
}

/// Everything the UI needs to render the match screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MatchSnapshot {
    pub phase: MatchPhase,
    pub round: u32,
    pub rounds_total: u32,
    #[ts(type = "number")]
    pub round_timer_ms: u64,
    #[ts(type = "number")]
    pub swap_cooldown_ms: u64,
    pub active_seat: usize,
    pub current_word: Option<String>,
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
}

impl MatchSnapshot {
    pub fn active_player(&self) -> Option<&Player> {
        self.players.get(self.active_seat)
    }

    pub fn active_team(&self) -> Option<&Team> {
        let player = self.active_player()?;
        self.teams.iter().find(|t| t.id == player.team_id)
    }
}
