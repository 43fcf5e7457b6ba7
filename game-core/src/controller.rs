use anyhow::Result;
use game_types::{GameSettings, MatchPhase, MatchSnapshot, TeamId};
use tracing::{debug, info, trace, warn};

use crate::{
    GameClock, MatchEvent, MatchOutcome, MatchTimers, SWAP_COOLDOWN_MS, TeamRoster, TurnSequencer,
    WordBag, WordCatalog, WordPicker,
};

/// State of one match, from the first round until game over.
#[derive(Debug)]
pub struct MatchSession {
    settings: GameSettings,
    roster: TeamRoster,
    word_bag: WordBag,
    phase: MatchPhase,
    round: u32,
    timers: MatchTimers,
    active_seat: usize,
    current_word: Option<String>,
    help_opened_from: Option<MatchPhase>,
}

impl MatchSession {
    fn new(settings: GameSettings, roster: TeamRoster, word_bag: WordBag) -> Self {
        let timers = MatchTimers::new(settings.round_duration_ms());
        Self {
            settings,
            roster,
            word_bag,
            phase: MatchPhase::RoundStarting,
            round: 1,
            timers,
            active_seat: 0,
            current_word: None,
            help_opened_from: None,
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn roster(&self) -> &TeamRoster {
        &self.roster
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn timers(&self) -> MatchTimers {
        self.timers
    }

    pub fn active_seat(&self) -> usize {
        self.active_seat
    }

    pub fn current_word(&self) -> Option<&str> {
        self.current_word.as_deref()
    }

    fn active_team(&self) -> Option<TeamId> {
        self.roster.player(self.active_seat).map(|p| p.team_id)
    }

    fn set_phase(&mut self, to: MatchPhase, events: &mut Vec<MatchEvent>) {
        let from = self.phase;
        if from == to {
            return;
        }
        info!("Match phase {:?} -> {:?} (round {})", from, to, self.round);
        self.phase = to;
        events.push(MatchEvent::PhaseChanged { from, to });
    }

    fn draw_word(&mut self, events: &mut Vec<MatchEvent>) {
        let word = self.word_bag.next();
        debug!("Drew word '{}' for seat {}", word, self.active_seat);
        self.timers.swap_cooldown_ms = SWAP_COOLDOWN_MS;
        self.current_word = Some(word.clone());
        events.push(MatchEvent::WordDrawn { word });
    }

    fn advance_turn(&mut self, events: &mut Vec<MatchEvent>) {
        let next = TurnSequencer::next_active(self.active_seat, &self.roster);
        if next != self.active_seat {
            self.active_seat = next;
            events.push(MatchEvent::ActivePlayerChanged { seat: next });
        }
    }

    /// Resuming always hands the active player a fresh word.
    fn resume_play(&mut self, events: &mut Vec<MatchEvent>) {
        self.draw_word(events);
        self.set_phase(MatchPhase::Playing, events);
    }

    fn finish(&mut self, final_eliminations: &[TeamId], events: &mut Vec<MatchEvent>) {
        let outcome = MatchOutcome::decide(&self.roster, final_eliminations);
        let history = outcome.history_entry(&self.roster);
        info!(
            "Match over after round {}: winners {:?} ({:?})",
            self.round, outcome.winner_names, outcome.winner
        );
        self.set_phase(MatchPhase::GameOver, events);
        events.push(MatchEvent::GameOver { outcome, history });
    }

    fn resume(&mut self) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        match self.phase {
            MatchPhase::RoundStarting | MatchPhase::Paused => self.resume_play(&mut events),
            MatchPhase::HelpOverlay => return self.close_help(),
            phase => debug!("Ignoring resume in phase {:?}", phase),
        }
        events
    }

    fn pause(&mut self) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        if self.phase == MatchPhase::Playing {
            self.set_phase(MatchPhase::Paused, &mut events);
        } else {
            debug!("Ignoring pause in phase {:?}", self.phase);
        }
        events
    }

    fn open_help(&mut self) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        match self.phase {
            MatchPhase::RoundStarting
            | MatchPhase::Playing
            | MatchPhase::Paused
            | MatchPhase::RoundFinished => {
                self.help_opened_from = Some(self.phase);
                self.set_phase(MatchPhase::HelpOverlay, &mut events);
            }
            phase => debug!("Ignoring help request in phase {:?}", phase),
        }
        events
    }

    fn close_help(&mut self) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        if self.phase != MatchPhase::HelpOverlay {
            debug!("Ignoring help close in phase {:?}", self.phase);
            return events;
        }
        match self.help_opened_from.take() {
            // The end-of-round acknowledgment cannot be skipped through help
            Some(MatchPhase::RoundFinished) => {
                self.set_phase(MatchPhase::RoundFinished, &mut events)
            }
            _ => self.resume_play(&mut events),
        }
        events
    }

    fn tick(&mut self, delta_ms: u64) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        if self.phase != MatchPhase::Playing {
            trace!("Dropping tick in phase {:?}", self.phase);
            return events;
        }
        let Some(active_team) = self.active_team() else {
            warn!("Active seat {} has no player", self.active_seat);
            return events;
        };

        let tick = GameClock::advance(&mut self.timers, &mut self.roster, active_team, delta_ms);

        let out_of_time = self.roster.teams_out_of_time();
        for &team_id in &out_of_time {
            self.roster.eliminate(team_id);
            if let Some(team) = self.roster.team(team_id) {
                info!("{} team ran out of time", team.color.label());
            }
        }

        if !out_of_time.is_empty() {
            if self.roster.remaining_teams().len() <= 1 {
                self.finish(&out_of_time, &mut events);
                return events;
            }
            for &team_id in &out_of_time {
                if let Some(team) = self.roster.team(team_id) {
                    events.push(MatchEvent::TeamEliminated {
                        team_id,
                        color: team.color,
                    });
                }
            }
            self.advance_turn(&mut events);
            // A round boundary in the same tick draws at the next round start instead
            if !tick.round_finished {
                self.draw_word(&mut events);
            }
        }

        if tick.round_finished {
            events.push(MatchEvent::RoundFinished { round: self.round });
            self.set_phase(MatchPhase::RoundFinished, &mut events);
        }
        events
    }

    fn word_guessed(&mut self) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        if self.phase != MatchPhase::Playing {
            debug!("Ignoring guess in phase {:?}", self.phase);
            return events;
        }
        self.advance_turn(&mut events);
        self.draw_word(&mut events);
        events
    }

    fn swap_word(&mut self) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        if self.phase != MatchPhase::Playing {
            debug!("Ignoring swap in phase {:?}", self.phase);
        } else if self.timers.swap_cooldown_ms > 0 {
            debug!("Swap refused, {} ms cooldown left", self.timers.swap_cooldown_ms);
        } else {
            self.draw_word(&mut events);
        }
        events
    }

    fn start_next_round(&mut self) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        if self.phase != MatchPhase::RoundFinished {
            debug!("Ignoring next round in phase {:?}", self.phase);
            return events;
        }
        if self.round >= self.settings.rounds_count {
            warn!(
                "Round {} of {} finished with {} teams left, ending match",
                self.round,
                self.settings.rounds_count,
                self.roster.remaining_teams().len()
            );
            self.finish(&[], &mut events);
            return events;
        }

        self.round += 1;
        self.timers.round_ms = self.settings.round_duration_ms();
        events.push(MatchEvent::RoundStarted { round: self.round });
        self.set_phase(MatchPhase::RoundStarting, &mut events);
        self.resume_play(&mut events);
        events
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            phase: self.phase,
            round: self.round,
            rounds_total: self.settings.rounds_count,
            round_timer_ms: self.timers.round_ms,
            swap_cooldown_ms: self.timers.swap_cooldown_ms,
            active_seat: self.active_seat,
            current_word: self.current_word.clone(),
            teams: self.roster.teams().to_vec(),
            players: self.roster.players().to_vec(),
        }
    }
}

/// Drives the match lifecycle. Every operation returns the events it caused;
/// operations that make no sense in the current phase do nothing.
#[derive(Debug, Default)]
pub struct MatchController {
    session: Option<MatchSession>,
}

impl MatchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> MatchPhase {
        self.session
            .as_ref()
            .map_or(MatchPhase::Setup, MatchSession::phase)
    }

    pub fn is_running(&self) -> bool {
        self.phase().is_running()
    }

    pub fn session(&self) -> Option<&MatchSession> {
        self.session.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> Option<&mut MatchSession> {
        self.session.as_mut()
    }

    pub fn snapshot(&self) -> Option<MatchSnapshot> {
        self.session.as_ref().map(MatchSession::snapshot)
    }

    /// Build the roster and word bag and wait for the first round to start.
    /// Only possible from the menu or after a finished match.
    pub fn start_match(
        &mut self,
        settings: GameSettings,
        catalog: &WordCatalog,
        picker: Box<dyn WordPicker>,
    ) -> Result<Vec<MatchEvent>> {
        let from = self.phase();
        if !matches!(from, MatchPhase::Setup | MatchPhase::GameOver) {
            debug!("Ignoring match start in phase {:?}", from);
            return Ok(Vec::new());
        }

        let settings = settings.normalized();
        settings.validate()?;
        let word_bag = WordBag::initialize(catalog, &settings.selected_categories, picker)?;
        let roster = TeamRoster::from_settings(&settings);

        info!(
            "Starting match: {} players, {} rounds of {}s, {} words",
            settings.player_count,
            settings.rounds_count,
            settings.round_duration_seconds,
            word_bag.pool_len()
        );

        let session = MatchSession::new(settings, roster, word_bag);
        let events = vec![
            MatchEvent::PhaseChanged {
                from,
                to: session.phase,
            },
            MatchEvent::RoundStarted { round: 1 },
            MatchEvent::ActivePlayerChanged { seat: 0 },
        ];
        self.session = Some(session);
        Ok(events)
    }

    pub fn resume(&mut self) -> Vec<MatchEvent> {
        self.with_session(MatchSession::resume)
    }

    pub fn pause(&mut self) -> Vec<MatchEvent> {
        self.with_session(MatchSession::pause)
    }

    pub fn open_help(&mut self) -> Vec<MatchEvent> {
        self.with_session(MatchSession::open_help)
    }

    pub fn close_help(&mut self) -> Vec<MatchEvent> {
        self.with_session(MatchSession::close_help)
    }

    /// Advance the match clock by `delta_ms`. Ignored unless playing.
    pub fn tick(&mut self, delta_ms: u64) -> Vec<MatchEvent> {
        self.with_session(|session| session.tick(delta_ms))
    }

    pub fn word_guessed(&mut self) -> Vec<MatchEvent> {
        self.with_session(MatchSession::word_guessed)
    }

    pub fn swap_word(&mut self) -> Vec<MatchEvent> {
        self.with_session(MatchSession::swap_word)
    }

    pub fn start_next_round(&mut self) -> Vec<MatchEvent> {
        self.with_session(MatchSession::start_next_round)
    }

    /// Abandon the current match without recording it.
    pub fn exit_to_menu(&mut self) -> Vec<MatchEvent> {
        match self.session.take() {
            Some(session) => {
                info!("Leaving match in phase {:?}", session.phase);
                vec![MatchEvent::PhaseChanged {
                    from: session.phase,
                    to: MatchPhase::Setup,
                }]
            }
            None => Vec::new(),
        }
    }

    fn with_session(
        &mut self,
        op: impl FnOnce(&mut MatchSession) -> Vec<MatchEvent>,
    ) -> Vec<MatchEvent> {
        match self.session.as_mut() {
            Some(session) => op(session),
            None => {
                debug!("No match in progress");
                Vec::new()
            }
        }
    }
}
