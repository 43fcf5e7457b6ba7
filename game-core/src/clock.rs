use game_types::TeamId;

use crate::TeamRoster;

/// Tick size used by the host scheduler unless configured otherwise.
pub const DEFAULT_TICK_MS: u64 = 10;

/// Minimum time between discretionary word swaps; restarted on every draw.
pub const SWAP_COOLDOWN_MS: u64 = 20_000;

/// Countdowns owned by the match besides the per-team clocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchTimers {
    pub round_ms: u64,
    pub swap_cooldown_ms: u64,
}

impl MatchTimers {
    pub fn new(round_ms: u64) -> Self {
        Self {
            round_ms,
            swap_cooldown_ms: SWAP_COOLDOWN_MS,
        }
    }
}

/// What one tick changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    pub round_finished: bool,
}

pub struct GameClock;

impl GameClock {
    /// Apply one tick of `delta_ms` to the round timer, the active team's
    /// clock and the swap cooldown. All three stop at zero.
    pub fn advance(
        timers: &mut MatchTimers,
        roster: &mut TeamRoster,
        active_team: TeamId,
        delta_ms: u64,
    ) -> ClockTick {
        timers.round_ms = timers.round_ms.saturating_sub(delta_ms);
        roster.decrement_team(active_team, delta_ms);
        timers.swap_cooldown_ms = timers.swap_cooldown_ms.saturating_sub(delta_ms);

        ClockTick {
            round_finished: timers.round_ms == 0,
        }
    }
}
