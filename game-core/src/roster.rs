use game_types::{GameSettings, Player, Team, TeamColor, TeamId};

/// Players and teams of a match. Seating is fixed at setup; only team time
/// and elimination change afterwards.
#[derive(Debug, Clone)]
pub struct TeamRoster {
    players: Vec<Player>,
    teams: Vec<Team>,
}

impl TeamRoster {
    /// Player `i` and player `i + team_count` form team `i mod team_count`,
    /// seated opposite each other.
    pub fn from_settings(settings: &GameSettings) -> Self {
        let team_count = settings.team_count();
        let budget = settings.team_budget_ms();

        let teams = (0..team_count)
            .map(|id| Team {
                id,
                color: TeamColor::for_team(id),
                time_remaining_ms: budget,
                is_eliminated: false,
                player_ids: vec![id, id + team_count],
            })
            .collect();

        let players = settings
            .seated_names()
            .into_iter()
            .enumerate()
            .map(|(seat, name)| {
                let team_id = seat % team_count.max(1);
                Player {
                    id: seat,
                    seat,
                    name,
                    team_id,
                    team_color: TeamColor::for_team(team_id),
                }
            })
            .collect();

        Self { players, teams }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn seat_count(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    pub fn team(&self, team_id: TeamId) -> Option<&Team> {
        self.teams.get(team_id)
    }

    pub fn team_of_seat(&self, seat: usize) -> Option<&Team> {
        self.player(seat).and_then(|p| self.team(p.team_id))
    }

    pub fn players_of_team(&self, team_id: TeamId) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.team_id == team_id)
    }

    pub fn player_names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }

    /// Subtract `delta_ms` from a live team's clock, stopping at zero.
    /// Returns the time left, or `None` for unknown or eliminated teams.
    pub fn decrement_team(&mut self, team_id: TeamId, delta_ms: u64) -> Option<u64> {
        let team = self.teams.get_mut(team_id).filter(|t| !t.is_eliminated)?;
        team.time_remaining_ms = team.time_remaining_ms.saturating_sub(delta_ms);
        Some(team.time_remaining_ms)
    }

    /// Mark a team eliminated and pin its time to zero. Returns true only on
    /// the call that actually eliminated it.
    pub fn eliminate(&mut self, team_id: TeamId) -> bool {
        match self.teams.get_mut(team_id) {
            Some(team) if !team.is_eliminated => {
                team.is_eliminated = true;
                team.time_remaining_ms = 0;
                true
            }
            _ => false,
        }
    }

    pub fn remaining_teams(&self) -> Vec<&Team> {
        self.teams.iter().filter(|t| t.is_live()).collect()
    }

    /// Live teams whose clock has run out
    pub fn teams_out_of_time(&self) -> Vec<TeamId> {
        self.teams
            .iter()
            .filter(|t| t.is_live() && t.time_remaining_ms == 0)
            .map(|t| t.id)
            .collect()
    }

    pub fn is_seat_live(&self, seat: usize) -> bool {
        self.team_of_seat(seat).is_some_and(Team::is_live)
    }

    #[cfg(test)]
    pub(crate) fn set_team_time(&mut self, team_id: TeamId, time_ms: u64) {
        if let Some(team) = self.teams.get_mut(team_id) {
            team.time_remaining_ms = time_ms;
        }
    }
}
