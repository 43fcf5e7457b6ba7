use game_core::{MatchController, MatchEvent, WordCatalog};
use game_types::{GameSettings, MatchPhase};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Creates a catalog with a few small categories
pub fn create_test_catalog() -> WordCatalog {
    WordCatalog::from_lists([
        ("animals", "cat\ndog\nowl\nfox\nyak\nemu\nbee\nant"),
        ("food", "bread\nsoup\nrice\nplum"),
        ("tiny", "sun\nmoon\nstar"),
    ])
}

/// Creates valid settings for the given table size
pub fn create_test_settings(player_count: u32) -> GameSettings {
    GameSettings {
        player_count,
        rounds_count: 3,
        round_duration_seconds: 90,
        selected_categories: vec!["animals".to_string()],
        player_names: (0..8).map(|i| format!("Player{}", i + 1)).collect(),
    }
}

/// Starts a match with a seeded word picker, leaving it in RoundStarting
pub fn start_match(settings: GameSettings) -> MatchController {
    let mut controller = MatchController::new();
    controller
        .start_match(settings, &create_test_catalog(), Box::new(StdRng::seed_from_u64(42)))
        .expect("valid settings");
    controller
}

/// Starts a match and resumes it into Playing
pub fn start_playing(settings: GameSettings) -> MatchController {
    let mut controller = start_match(settings);
    controller.resume();
    assert_eq!(controller.phase(), MatchPhase::Playing);
    controller
}

/// Phases entered, in order
pub fn entered_phases(events: &[MatchEvent]) -> Vec<MatchPhase> {
    events.iter().filter_map(MatchEvent::entered_phase).collect()
}

pub fn drawn_words(events: &[MatchEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            MatchEvent::WordDrawn { word } => Some(word.clone()),
            _ => None,
        })
        .collect()
}

pub fn active_seat(controller: &MatchController) -> usize {
    controller.session().expect("match in progress").active_seat()
}

pub fn team_time(controller: &MatchController, team_id: usize) -> u64 {
    controller
        .session()
        .and_then(|s| s.roster().team(team_id))
        .map(|t| t.time_remaining_ms)
        .expect("team exists")
}

/// Ticks until `done` holds or `max_ticks` is reached; returns the tick count
pub fn tick_until(
    controller: &mut MatchController,
    delta_ms: u64,
    max_ticks: usize,
    done: impl Fn(&MatchController) -> bool,
) -> usize {
    for tick in 1..=max_ticks {
        controller.tick(delta_ms);
        if done(controller) {
            return tick;
        }
    }
    panic!("condition not reached after {} ticks", max_ticks);
}
