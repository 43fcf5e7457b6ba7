mod common;

use common::*;
use game_core::{MatchController, MatchEvent, SWAP_COOLDOWN_MS, WordBag};
use game_types::{GameSettings, MatchPhase, SettingsError, TeamColor, WinnerTag};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

#[test]
fn test_match_starts_waiting_for_first_round() {
    let controller = start_match(create_test_settings(4));
    let session = controller.session().unwrap();

    assert_eq!(session.phase(), MatchPhase::RoundStarting);
    assert_eq!(session.round(), 1);
    assert_eq!(session.timers().round_ms, 90_000);
    assert_eq!(session.timers().swap_cooldown_ms, SWAP_COOLDOWN_MS);
    assert_eq!(session.active_seat(), 0);
    assert!(session.current_word().is_none());
    assert_eq!(session.roster().teams().len(), 2);
}

#[test]
fn test_invalid_settings_rejected() {
    let mut controller = MatchController::new();
    let settings = GameSettings {
        selected_categories: vec![],
        ..create_test_settings(4)
    };
    let result = controller.start_match(
        settings,
        &create_test_catalog(),
        Box::new(StdRng::seed_from_u64(1)),
    );
    let err = result.unwrap_err();
    assert_eq!(
        err.downcast_ref::<SettingsError>(),
        Some(&SettingsError::NoCategories)
    );
    assert_eq!(controller.phase(), MatchPhase::Setup);

    let unknown = GameSettings {
        selected_categories: vec!["planets".to_string()],
        ..create_test_settings(4)
    };
    let result = controller.start_match(
        unknown,
        &create_test_catalog(),
        Box::new(StdRng::seed_from_u64(1)),
    );
    assert!(result.unwrap_err().to_string().contains("planets"));
}

#[test]
fn test_start_ignored_while_match_in_progress() {
    let mut controller = start_playing(create_test_settings(4));
    let events = controller
        .start_match(
            create_test_settings(6),
            &create_test_catalog(),
            Box::new(StdRng::seed_from_u64(1)),
        )
        .unwrap();
    assert!(events.is_empty());
    assert_eq!(controller.session().unwrap().roster().seat_count(), 4);
}

#[test]
fn test_commands_without_match_are_noops() {
    let mut controller = MatchController::new();
    assert!(controller.tick(10).is_empty());
    assert!(controller.resume().is_empty());
    assert!(controller.word_guessed().is_empty());
    assert!(controller.exit_to_menu().is_empty());
    assert!(controller.snapshot().is_none());
    assert_eq!(controller.phase(), MatchPhase::Setup);
}

#[test]
fn test_resume_draws_word_and_resets_cooldown() {
    let mut controller = start_match(create_test_settings(4));
    let events = controller.resume();

    assert_eq!(entered_phases(&events), vec![MatchPhase::Playing]);
    let words = drawn_words(&events);
    assert_eq!(words.len(), 1);
    assert_eq!(controller.session().unwrap().current_word(), Some(words[0].as_str()));

    controller.tick(5_000);
    assert_eq!(controller.session().unwrap().timers().swap_cooldown_ms, 15_000);

    controller.pause();
    let events = controller.resume();
    assert_eq!(drawn_words(&events).len(), 1);
    assert_eq!(
        controller.session().unwrap().timers().swap_cooldown_ms,
        SWAP_COOLDOWN_MS
    );
}

#[test]
fn test_ticks_charge_only_the_active_team() {
    let mut controller = start_playing(create_test_settings(4));
    for _ in 0..100 {
        controller.tick(10);
    }
    let session = controller.session().unwrap();
    assert_eq!(session.timers().round_ms, 89_000);
    assert_eq!(session.timers().swap_cooldown_ms, 19_000);
    assert_eq!(team_time(&controller, 0), 134_000);
    assert_eq!(team_time(&controller, 1), 135_000);
}

#[test]
fn test_pause_suspends_clock() {
    let mut controller = start_playing(create_test_settings(4));
    controller.tick(10);
    let before = controller.snapshot().unwrap();

    let events = controller.pause();
    assert_eq!(entered_phases(&events), vec![MatchPhase::Paused]);
    for _ in 0..1_000 {
        assert!(controller.tick(10).is_empty());
    }

    let after = controller.snapshot().unwrap();
    assert_eq!(after.round_timer_ms, before.round_timer_ms);
    assert_eq!(after.teams, before.teams);

    // No catch-up after resuming
    controller.resume();
    controller.tick(10);
    assert_eq!(
        controller.snapshot().unwrap().round_timer_ms,
        before.round_timer_ms - 10
    );
}

#[test]
fn test_help_overlay_suspends_and_resumes_like_pause() {
    let mut controller = start_playing(create_test_settings(4));
    let events = controller.open_help();
    assert_eq!(entered_phases(&events), vec![MatchPhase::HelpOverlay]);
    assert!(controller.tick(10).is_empty());

    let events = controller.close_help();
    assert_eq!(entered_phases(&events), vec![MatchPhase::Playing]);
    assert_eq!(drawn_words(&events).len(), 1);
}

#[test]
fn test_guess_advances_clockwise_with_new_word() {
    let mut controller = start_playing(create_test_settings(4));
    let mut seats = Vec::new();
    for _ in 0..5 {
        let events = controller.word_guessed();
        assert_eq!(drawn_words(&events).len(), 1);
        seats.push(active_seat(&controller));
    }
    assert_eq!(seats, vec![1, 2, 3, 0, 1]);
}

#[test]
fn test_guess_ignored_outside_play() {
    let mut controller = start_match(create_test_settings(4));
    assert!(controller.word_guessed().is_empty());
    assert_eq!(active_seat(&controller), 0);
}

#[test]
fn test_swap_respects_cooldown() {
    let mut controller = start_playing(create_test_settings(4));
    let seat = active_seat(&controller);

    assert!(controller.swap_word().is_empty());

    for _ in 0..1_999 {
        controller.tick(10);
    }
    assert_eq!(controller.session().unwrap().timers().swap_cooldown_ms, 10);
    assert!(controller.swap_word().is_empty());

    controller.tick(10);
    let events = controller.swap_word();
    assert_eq!(drawn_words(&events).len(), 1);
    assert_eq!(active_seat(&controller), seat);
    assert_eq!(
        controller.session().unwrap().timers().swap_cooldown_ms,
        SWAP_COOLDOWN_MS
    );
}

#[test]
fn test_four_player_match_ends_when_team_time_runs_out() {
    let mut controller = start_playing(create_test_settings(4));
    assert_eq!(team_time(&controller, 0), 135_000);
    assert_eq!(team_time(&controller, 1), 135_000);

    let mut game_over = None;
    for tick in 1..=13_500 {
        let events = controller.tick(10);
        if controller.phase() == MatchPhase::RoundFinished {
            controller.start_next_round();
        }
        if events.iter().any(|e| matches!(e, MatchEvent::GameOver { .. })) {
            game_over = Some((tick, events));
            break;
        }
    }

    let (tick, events) = game_over.expect("match should end");
    assert_eq!(tick, 13_500);
    assert_eq!(controller.phase(), MatchPhase::GameOver);
    // The last team out is reported through the game over alone
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, MatchEvent::TeamEliminated { .. }))
    );
    let event = events
        .into_iter()
        .find(|e| matches!(e, MatchEvent::GameOver { .. }))
        .unwrap();

    let session = controller.session().unwrap();
    assert_eq!(session.round(), 2);
    assert!(session.roster().team(0).unwrap().is_eliminated);
    assert_eq!(session.roster().team(1).unwrap().time_remaining_ms, 135_000);

    match event {
        MatchEvent::GameOver { outcome, history } => {
            assert_eq!(outcome.winners, vec![1]);
            assert_eq!(history.winner, WinnerTag::Team(TeamColor::Red));
            assert_eq!(history.winner_names, vec!["Player2", "Player4"]);
            assert_eq!(
                history.players,
                vec!["Player1", "Player2", "Player3", "Player4"]
            );
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_round_finishes_and_blocks_until_acknowledged() {
    let settings = GameSettings {
        round_duration_seconds: 60,
        ..create_test_settings(4)
    };
    let mut controller = start_playing(settings);

    let ticks = tick_until(&mut controller, 100, 10_000, |c| {
        c.phase() == MatchPhase::RoundFinished
    });
    assert_eq!(ticks, 600);
    assert_eq!(controller.session().unwrap().timers().round_ms, 0);

    let frozen = team_time(&controller, 0);
    assert!(controller.tick(100).is_empty());
    assert!(controller.word_guessed().is_empty());
    assert!(controller.resume().is_empty());
    assert_eq!(team_time(&controller, 0), frozen);

    let events = controller.start_next_round();
    assert_eq!(
        entered_phases(&events),
        vec![MatchPhase::RoundStarting, MatchPhase::Playing]
    );
    assert_eq!(drawn_words(&events).len(), 1);
    assert_eq!(controller.session().unwrap().round(), 2);
    assert_eq!(controller.session().unwrap().timers().round_ms, 60_000);
}

#[test]
fn test_elimination_skips_team_and_continues() {
    // 3 teams with 80s each, 60s rounds
    let settings = GameSettings {
        rounds_count: 4,
        round_duration_seconds: 60,
        ..create_test_settings(6)
    };
    let mut controller = start_playing(settings);
    assert_eq!(team_time(&controller, 0), 80_000);

    tick_until(&mut controller, 10, 10_000, |c| {
        c.phase() == MatchPhase::RoundFinished
    });
    controller.start_next_round();

    let mut eliminated = Vec::new();
    for _ in 0..2_000 {
        eliminated = controller.tick(10);
        if !eliminated.is_empty() {
            break;
        }
    }

    assert!(eliminated.iter().any(|e| matches!(
        e,
        MatchEvent::TeamEliminated {
            team_id: 0,
            color: TeamColor::Blue
        }
    )));
    assert!(eliminated.contains(&MatchEvent::ActivePlayerChanged { seat: 1 }));
    // The next player gets a fresh word in the same tick
    assert_eq!(drawn_words(&eliminated).len(), 1);
    assert_eq!(controller.phase(), MatchPhase::Playing);
    assert_eq!(active_seat(&controller), 1);
    assert_eq!(team_time(&controller, 0), 0);

    // Seats 0 and 3 belong to the eliminated team
    controller.word_guessed();
    assert_eq!(active_seat(&controller), 2);
    controller.word_guessed();
    assert_eq!(active_seat(&controller), 4);
    controller.word_guessed();
    assert_eq!(active_seat(&controller), 5);
    controller.word_guessed();
    assert_eq!(active_seat(&controller), 1);
}

#[test]
fn test_small_pool_repeats_instead_of_stalling() {
    let settings = GameSettings {
        selected_categories: vec!["tiny".to_string()],
        ..create_test_settings(4)
    };
    let mut controller = start_match(settings);
    let first = drawn_words(&controller.resume());

    let mut draws = first.clone();
    for _ in 0..5 {
        draws.extend(drawn_words(&controller.word_guessed()));
    }
    assert_eq!(draws.len(), 6);

    let pool: HashSet<&str> = ["sun", "moon", "star"].into_iter().collect();
    assert!(draws.iter().all(|w| pool.contains(w.as_str())));
    let unique: HashSet<&String> = draws[..3].iter().collect();
    assert_eq!(unique.len(), 3);
}

#[test]
fn test_word_bag_repeats_after_three_word_pool() {
    let pool: Vec<String> = ["sun", "moon", "star"].iter().map(|w| w.to_string()).collect();
    let mut bag = WordBag::new(pool.clone(), Box::new(StdRng::seed_from_u64(9))).unwrap();

    let draws: Vec<String> = (0..5).map(|_| bag.next()).collect();
    let first_three: HashSet<&String> = draws[..3].iter().collect();
    assert_eq!(first_three.len(), 3);
    assert!(first_three.contains(&draws[3]));
    assert!(first_three.contains(&draws[4]));
}

#[test]
fn test_exit_to_menu_discards_match() {
    let mut controller = start_playing(create_test_settings(4));
    let events = controller.exit_to_menu();
    assert_eq!(
        events,
        vec![MatchEvent::PhaseChanged {
            from: MatchPhase::Playing,
            to: MatchPhase::Setup
        }]
    );
    assert!(controller.session().is_none());

    // A fresh match can be started afterwards
    let events = controller
        .start_match(
            create_test_settings(8),
            &create_test_catalog(),
            Box::new(StdRng::seed_from_u64(3)),
        )
        .unwrap();
    assert_eq!(entered_phases(&events), vec![MatchPhase::RoundStarting]);
    assert_eq!(controller.session().unwrap().roster().teams().len(), 4);
}

#[test]
fn test_snapshot_reflects_state() {
    let mut controller = start_playing(create_test_settings(6));
    controller.word_guessed();
    controller.tick(250);

    let snapshot = controller.snapshot().unwrap();
    assert_eq!(snapshot.phase, MatchPhase::Playing);
    assert_eq!(snapshot.round, 1);
    assert_eq!(snapshot.rounds_total, 3);
    assert_eq!(snapshot.round_timer_ms, 89_750);
    assert_eq!(snapshot.active_seat, 1);
    assert_eq!(snapshot.active_player().unwrap().name, "Player2");
    assert_eq!(snapshot.active_team().unwrap().color, TeamColor::Red);
    assert_eq!(snapshot.active_team().unwrap().time_remaining_ms, 89_750);
    assert!(snapshot.current_word.is_some());
    assert_eq!(snapshot.players.len(), 6);
}
