use std::sync::Arc;

use game_core::{MatchController, MatchEvent, WordCatalog, WordPicker};
use game_persistence::{MatchStore, append_history};
use game_types::{GameSettings, HistoryEntry, MatchPhase, UiCommand, UiMessage};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::{RwLock, watch};
use tracing::{debug, info};

/// One device's match, shared between the command reader and the ticker.
pub struct GameSession {
    controller: RwLock<MatchController>,
    store: Arc<dyn MatchStore>,
    catalog: WordCatalog,
    playing: watch::Sender<bool>,
    seed: Option<u64>,
}

impl GameSession {
    pub fn new(catalog: WordCatalog, store: Arc<dyn MatchStore>) -> Self {
        let (playing, _) = watch::channel(false);
        Self {
            controller: RwLock::new(MatchController::new()),
            store,
            catalog,
            playing,
            seed: None,
        }
    }

    /// Draw words from a seeded generator instead of the OS one
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Flag that is `true` exactly while the match is in `Playing`
    pub fn subscribe_playing(&self) -> watch::Receiver<bool> {
        self.playing.subscribe()
    }

    pub async fn phase(&self) -> MatchPhase {
        self.controller.read().await.phase()
    }

    pub async fn state_update(&self) -> UiMessage {
        UiMessage::StateUpdate {
            snapshot: self.controller.read().await.snapshot(),
        }
    }

    /// Apply one UI command. The reply always ends with a fresh snapshot.
    pub async fn handle_command(&self, command: UiCommand) -> Vec<UiMessage> {
        debug!("Handling command {:?}", command);

        let mut messages = match command {
            UiCommand::StartMatch { settings } => self.start_match(settings).await,
            UiCommand::GuessCorrect => self.apply(MatchController::word_guessed).await,
            UiCommand::SwapWord => self.apply(MatchController::swap_word).await,
            UiCommand::Pause => self.apply(MatchController::pause).await,
            UiCommand::Resume => self.apply(MatchController::resume).await,
            UiCommand::OpenHelp => self.apply(MatchController::open_help).await,
            UiCommand::CloseHelp => self.apply(MatchController::close_help).await,
            UiCommand::StartNextRound => self.apply(MatchController::start_next_round).await,
            UiCommand::ExitToMenu => self.apply(MatchController::exit_to_menu).await,
            UiCommand::SaveSettings { settings } => {
                let settings = settings.normalized();
                self.store.save_settings(&settings).await;
                vec![UiMessage::Settings { settings }]
            }
            UiCommand::GetSettings => vec![UiMessage::Settings {
                settings: self.current_settings().await,
            }],
            UiCommand::GetHistory => vec![UiMessage::History {
                entries: self.store.load_history().await,
            }],
            UiCommand::GetCategories => vec![UiMessage::Categories {
                categories: self.catalog.infos(),
            }],
        };

        messages.push(self.state_update().await);
        messages
    }

    /// Advance the running match by `delta_ms`
    pub async fn tick(&self, delta_ms: u64) -> Vec<UiMessage> {
        self.apply(|controller| controller.tick(delta_ms)).await
    }

    /// Stored settings, or defaults playing the first catalog category
    pub async fn current_settings(&self) -> GameSettings {
        match self.store.load_settings().await {
            Some(settings) => settings,
            None => GameSettings {
                selected_categories: self.catalog.category_names().into_iter().take(1).collect(),
                ..GameSettings::default()
            },
        }
    }

    async fn start_match(&self, settings: Option<GameSettings>) -> Vec<UiMessage> {
        let explicit = settings.is_some();
        let settings = match settings {
            Some(settings) => settings.normalized(),
            None => self.current_settings().await,
        };

        let result = {
            let mut controller = self.controller.write().await;
            controller
                .start_match(settings.clone(), &self.catalog, self.picker())
                .map(|events| self.finish(&*controller, events))
        };

        match result {
            Ok((messages, finished)) => {
                if explicit && !messages.is_empty() {
                    self.store.save_settings(&settings).await;
                }
                self.record(finished).await;
                messages
            }
            Err(e) => {
                info!("Match start rejected: {}", e);
                vec![UiMessage::Error {
                    message: e.to_string(),
                }]
            }
        }
    }

    async fn apply<F>(&self, op: F) -> Vec<UiMessage>
    where
        F: FnOnce(&mut MatchController) -> Vec<MatchEvent>,
    {
        let (messages, finished) = {
            let mut controller = self.controller.write().await;
            let events = op(&mut *controller);
            self.finish(&*controller, events)
        };
        self.record(finished).await;
        messages
    }

    /// Translate controller events and refresh the playing flag
    fn finish(
        &self,
        controller: &MatchController,
        events: Vec<MatchEvent>,
    ) -> (Vec<UiMessage>, Vec<HistoryEntry>) {
        let now_playing = controller.phase() == MatchPhase::Playing;
        self.playing.send_if_modified(|playing| {
            let changed = *playing != now_playing;
            *playing = now_playing;
            changed
        });

        let mut finished = Vec::new();
        let messages = events
            .into_iter()
            .map(|event| {
                debug!("Match event {}", event.name());
                match event {
                    MatchEvent::PhaseChanged { from, to } => UiMessage::PhaseChanged { from, to },
                    MatchEvent::WordDrawn { word } => UiMessage::WordChanged { word },
                    MatchEvent::ActivePlayerChanged { seat } => UiMessage::ActivePlayerChanged {
                        seat,
                        name: controller
                            .session()
                            .and_then(|s| s.roster().player(seat))
                            .map(|p| p.name.clone())
                            .unwrap_or_default(),
                    },
                    MatchEvent::RoundStarted { round } => UiMessage::RoundStarted { round },
                    MatchEvent::RoundFinished { round } => UiMessage::RoundFinished { round },
                    MatchEvent::TeamEliminated { team_id, color } => {
                        UiMessage::TeamEliminated { team_id, color }
                    }
                    MatchEvent::GameOver { outcome, history } => {
                        finished.push(history.clone());
                        UiMessage::GameOver {
                            winner: outcome.winner,
                            winner_names: outcome.winner_names,
                            entry: history,
                        }
                    }
                }
            })
            .collect();

        (messages, finished)
    }

    async fn record(&self, finished: Vec<HistoryEntry>) {
        for entry in finished {
            info!("Recording match {} in history", entry.id);
            append_history(self.store.as_ref(), entry).await;
        }
    }

    fn picker(&self) -> Box<dyn WordPicker> {
        match self.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_os_rng()),
        }
    }
}
