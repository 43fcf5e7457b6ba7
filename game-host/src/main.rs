use std::sync::Arc;
use tokio::io::BufReader;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use game_core::WordCatalog;
use game_host::{
    config::Config,
    protocol::{read_commands, write_messages},
    session::GameSession,
    ticker::run_ticker,
};
use game_persistence::{
    MatchStore, MemoryStore, SqliteStore, connection::connect_and_migrate,
    repositories::KvRepository,
};

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries protocol lines only
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Word Circle host...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Loading words from directory: {}", config.words_directory);
    let catalog = match WordCatalog::from_directory(&config.words_directory) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(
                "Failed to load words from directory '{}': {:#}",
                config.words_directory, e
            );
            error!("Set WORDS_DIRECTORY to a directory containing .txt word files.");
            std::process::exit(1);
        }
    };

    let store: Arc<dyn MatchStore> = match connect_and_migrate(&config.database_url).await {
        Ok(db) => Arc::new(SqliteStore::new(KvRepository::new(db))),
        Err(e) => {
            warn!(
                "Failed to open database '{}': {}. Settings and history will not outlive this run.",
                config.database_url, e
            );
            Arc::new(MemoryStore::in_memory())
        }
    };

    let session = Arc::new(GameSession::new(catalog, store));
    let (out_tx, out_rx) = mpsc::unbounded_channel();

    let writer = tokio::spawn(write_messages(out_rx, tokio::io::stdout()));
    let ticker = tokio::spawn(run_ticker(
        session.clone(),
        config.tick_ms,
        config.snapshot_interval_ms,
        out_tx.clone(),
    ));

    if out_tx.send(session.state_update().await).is_err() {
        warn!("Output closed before the first snapshot");
    }

    let stdin = BufReader::new(tokio::io::stdin());
    tokio::select! {
        result = read_commands(stdin, &session, &out_tx) => {
            match result {
                Ok(()) => info!("Input closed, shutting down..."),
                Err(e) => error!("Failed to read commands: {}", e),
            }
        }
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    ticker.abort();
    let _ = ticker.await;
    drop(out_tx);
    match writer.await {
        Ok(Err(e)) => error!("Failed to write messages: {}", e),
        Err(e) => error!("Output task failed: {}", e),
        Ok(Ok(())) => {}
    }

    info!("Host shutdown complete.");
}
