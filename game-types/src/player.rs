use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub type PlayerId = usize;
pub type TeamId = usize;

/// Team tags in seating order. Presentation (colors, labels in other
/// languages) belongs to the UI; the core only carries the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum TeamColor {
    Blue,
    Red,
    Green,
    Yellow,
}

impl TeamColor {
    pub const ALL: [TeamColor; 4] = [
        TeamColor::Blue,
        TeamColor::Red,
        TeamColor::Green,
        TeamColor::Yellow,
    ];

    /// Color assigned to the team with the given id. Ids past the palette wrap.
    pub fn for_team(team_id: TeamId) -> Self {
        Self::ALL[team_id % Self::ALL.len()]
    }

    pub fn label(&self) -> &'static str {
        match self {
            TeamColor::Blue => "Blue",
            TeamColor::Red => "Red",
            TeamColor::Green => "Green",
            TeamColor::Yellow => "Yellow",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Player {
    pub id: PlayerId,
    pub seat: usize,
    pub name: String,
    pub team_id: TeamId,
    pub team_color: TeamColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Team {
    pub id: TeamId,
    pub color: TeamColor,
    #[ts(type = "number")]
    pub time_remaining_ms: u64,
    pub is_eliminated: bool,
    pub player_ids: Vec<PlayerId>, // seated opposite each other
}

impl Team {
    pub fn is_live(&self) -> bool {
        !self.is_eliminated
    }
}
