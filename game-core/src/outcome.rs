use game_types::{HistoryEntry, TeamId, WinnerTag};
use tracing::warn;
use uuid::Uuid;

use crate::TeamRoster;

/// Result of a finished match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub winners: Vec<TeamId>,
    pub winner: WinnerTag,
    pub winner_names: Vec<String>,
}

impl MatchOutcome {
    /// Winners are the surviving teams holding the most time. When the final
    /// tick took out every team at once, the teams it took out share the win.
    pub fn decide(roster: &TeamRoster, final_eliminations: &[TeamId]) -> Self {
        let mut candidates: Vec<(TeamId, u64)> = roster
            .remaining_teams()
            .iter()
            .map(|t| (t.id, t.time_remaining_ms))
            .collect();

        if candidates.is_empty() {
            candidates = final_eliminations
                .iter()
                .filter_map(|&id| roster.team(id).map(|t| (t.id, t.time_remaining_ms)))
                .collect();
        }

        let winners: Vec<TeamId> = match candidates.iter().map(|&(_, time)| time).max() {
            Some(best) => candidates
                .iter()
                .filter(|&&(_, time)| time == best)
                .map(|&(id, _)| id)
                .collect(),
            None => {
                warn!("Match ended with no teams to crown, recording an empty tie");
                Vec::new()
            }
        };

        let winner = match winners.as_slice() {
            [only] => roster
                .team(*only)
                .map_or(WinnerTag::Tie, |t| WinnerTag::Team(t.color)),
            _ => WinnerTag::Tie,
        };

        let winner_names = roster
            .players()
            .iter()
            .filter(|p| winners.contains(&p.team_id))
            .map(|p| p.name.clone())
            .collect();

        Self {
            winners,
            winner,
            winner_names,
        }
    }

    pub fn is_tie(&self) -> bool {
        self.winners.len() != 1
    }

    pub fn history_entry(&self, roster: &TeamRoster) -> HistoryEntry {
        HistoryEntry {
            id: Uuid::new_v4(),
            date: chrono::Utc::now().to_rfc3339(),
            players: roster.player_names(),
            winner: self.winner,
            winner_names: self.winner_names.clone(),
        }
    }
}
