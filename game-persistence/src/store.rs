use anyhow::Result;
use async_trait::async_trait;
use game_types::{GameSettings, HistoryEntry};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::repositories::KvRepository;

/// Completed matches kept in the history log.
pub const HISTORY_LIMIT: usize = 30;

pub const SETTINGS_KEY: &str = "settings";
pub const HISTORY_KEY: &str = "history";

/// Settings and history persistence as seen by the game.
///
/// Loads never fail: missing or unreadable data comes back as `None` or an
/// empty history. Saves log failures instead of returning them.
#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn load_settings(&self) -> Option<GameSettings>;
    async fn save_settings(&self, settings: &GameSettings);
    /// Newest first
    async fn load_history(&self) -> Vec<HistoryEntry>;
    /// Stores at most `HISTORY_LIMIT` entries
    async fn save_history(&self, entries: &[HistoryEntry]);
}

/// Raw string storage behind a `MatchStore`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn put(&self, key: &str, value: String) -> Result<()>;
}

#[async_trait]
impl KeyValueStore for KvRepository {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        KvRepository::get(self, key).await
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        KvRepository::put(self, key, value).await
    }
}

/// In-process key-value storage, used in tests and when no database is available.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

/// `MatchStore` that keeps JSON documents in a key-value backend.
pub struct JsonStore<K> {
    kv: K,
}

pub type SqliteStore = JsonStore<KvRepository>;
pub type MemoryStore = JsonStore<MemoryKv>;

impl<K: KeyValueStore> JsonStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    pub fn backend(&self) -> &K {
        &self.kv
    }

    async fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.kv.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("Nothing stored under '{}'", key);
                return None;
            }
            Err(e) => {
                warn!("Failed to read '{}' from storage: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring malformed '{}' record: {}", key, e);
                None
            }
        }
    }

    async fn save_json<T: Serialize + ?Sized + Sync>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to encode '{}': {}", key, e);
                return;
            }
        };
        if let Err(e) = self.kv.put(key, raw).await {
            warn!("Failed to save '{}': {}", key, e);
        }
    }
}

impl MemoryStore {
    pub fn in_memory() -> Self {
        Self::new(MemoryKv::new())
    }
}

#[async_trait]
impl<K: KeyValueStore> MatchStore for JsonStore<K> {
    async fn load_settings(&self) -> Option<GameSettings> {
        self.load_json::<GameSettings>(SETTINGS_KEY)
            .await
            .map(GameSettings::normalized)
    }

    async fn save_settings(&self, settings: &GameSettings) {
        self.save_json(SETTINGS_KEY, settings).await;
    }

    async fn load_history(&self) -> Vec<HistoryEntry> {
        let mut entries: Vec<HistoryEntry> = self.load_json(HISTORY_KEY).await.unwrap_or_default();
        entries.truncate(HISTORY_LIMIT);
        entries
    }

    async fn save_history(&self, entries: &[HistoryEntry]) {
        let kept = &entries[..entries.len().min(HISTORY_LIMIT)];
        self.save_json(HISTORY_KEY, kept).await;
    }
}

/// Record a finished match at the front of the history log, dropping the
/// oldest entries past `HISTORY_LIMIT`. Returns the stored log.
pub async fn append_history(store: &dyn MatchStore, entry: HistoryEntry) -> Vec<HistoryEntry> {
    let mut entries = store.load_history().await;
    entries.insert(0, entry);
    entries.truncate(HISTORY_LIMIT);
    store.save_history(&entries).await;
    entries
}
