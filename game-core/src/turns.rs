use crate::TeamRoster;

pub struct TurnSequencer;

impl TurnSequencer {
    /// Next seat clockwise from `current` whose team is still in the game.
    /// Falls back to `current` when no other live seat exists.
    pub fn next_active(current: usize, roster: &TeamRoster) -> usize {
        let seats = roster.seat_count();
        (1..=seats)
            .map(|step| (current + step) % seats)
            .find(|&seat| roster.is_seat_live(seat))
            .unwrap_or(current)
    }
}
