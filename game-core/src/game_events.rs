use game_types::{HistoryEntry, MatchPhase, TeamColor, TeamId};

use crate::MatchOutcome;

/// Notifications produced by controller operations, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    PhaseChanged {
        from: MatchPhase,
        to: MatchPhase,
    },
    WordDrawn {
        word: String,
    },
    ActivePlayerChanged {
        seat: usize,
    },
    RoundStarted {
        round: u32,
    },
    RoundFinished {
        round: u32,
    },
    TeamEliminated {
        team_id: TeamId,
        color: TeamColor,
    },
    GameOver {
        outcome: MatchOutcome,
        history: HistoryEntry,
    },
}

impl MatchEvent {
    pub fn name(&self) -> &'static str {
        match self {
            MatchEvent::PhaseChanged { .. } => "phase_changed",
            MatchEvent::WordDrawn { .. } => "word_drawn",
            MatchEvent::ActivePlayerChanged { .. } => "active_player_changed",
            MatchEvent::RoundStarted { .. } => "round_started",
            MatchEvent::RoundFinished { .. } => "round_finished",
            MatchEvent::TeamEliminated { .. } => "team_eliminated",
            MatchEvent::GameOver { .. } => "game_over",
        }
    }

    /// Phase entered, if this event is a transition
    pub fn entered_phase(&self) -> Option<MatchPhase> {
        match self {
            MatchEvent::PhaseChanged { to, .. } => Some(*to),
            _ => None,
        }
    }
}
