use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{GameSettings, HistoryEntry, MatchPhase, MatchSnapshot, TeamColor, TeamId, WinnerTag};

/// Commands accepted from the UI, one JSON value per line.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum UiCommand {
    /// Start a match. Without settings the stored (or default) settings are used.
    StartMatch { settings: Option<GameSettings> },
    GuessCorrect,
    SwapWord,
    Pause,
    Resume,
    OpenHelp,
    CloseHelp,
    StartNextRound,
    ExitToMenu,
    SaveSettings { settings: GameSettings },
    GetSettings,
    GetHistory,
    GetCategories,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryInfo {
    pub name: String,
    pub word_count: usize,
}

/// Messages pushed to the UI.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum UiMessage {
    StateUpdate { snapshot: Option<MatchSnapshot> },
    PhaseChanged { from: MatchPhase, to: MatchPhase },
    WordChanged { word: String },
    ActivePlayerChanged { seat: usize, name: String },
    RoundStarted { round: u32 },
    RoundFinished { round: u32 },
    TeamEliminated { team_id: TeamId, color: TeamColor },
    GameOver {
        winner: WinnerTag,
        winner_names: Vec<String>,
        entry: HistoryEntry,
    },
    Settings { settings: GameSettings },
    History { entries: Vec<HistoryEntry> },
    Categories { categories: Vec<CategoryInfo> },
    Error { message: String },
}
