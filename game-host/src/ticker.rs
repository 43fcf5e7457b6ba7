use std::sync::Arc;
use std::time::Duration;

use game_types::UiMessage;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::session::GameSession;

/// Drive the match clock while the session is playing.
///
/// Ticks are `tick_ms` apart and only run in `Playing`; when play stops the
/// loop parks on the playing flag and restarts its interval on resume, so
/// paused time is never charged. A snapshot goes out every
/// `snapshot_interval_ms` of play. Returns once the output channel closes.
pub async fn run_ticker(
    session: Arc<GameSession>,
    tick_ms: u64,
    snapshot_interval_ms: u64,
    out: mpsc::UnboundedSender<UiMessage>,
) {
    let mut playing = session.subscribe_playing();
    let mut interval = tokio::time::interval(Duration::from_millis(tick_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

    let mut was_playing = false;
    let mut since_snapshot = 0;

    loop {
        let is_playing = *playing.borrow_and_update();
        if !is_playing {
            if was_playing {
                debug!("Clock stopped");
                was_playing = false;
            }
            let resumed = playing.wait_for(|p| *p).await.is_ok();
            if !resumed {
                return;
            }
            continue;
        }

        if !was_playing {
            debug!("Clock running");
            interval.reset();
            was_playing = true;
        }

        tokio::select! {
            _ = interval.tick() => {
                let mut messages = session.tick(tick_ms).await;
                since_snapshot += tick_ms;
                if since_snapshot >= snapshot_interval_ms {
                    since_snapshot = 0;
                    messages.push(session.state_update().await);
                }
                for message in messages {
                    if out.send(message).is_err() {
                        return;
                    }
                }
            }
            changed = playing.changed() => {
                if changed.is_err() {
                    return;
                }
            }
        }
    }
}
