use game_types::SettingsError;
use rand::Rng;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

use crate::WordCatalog;

/// Source of randomness for word draws.
///
/// Any `rand::Rng` is a picker; tests can seed one or script the draws.
pub trait WordPicker: Send + Sync {
    /// Index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: Rng + Send + Sync> WordPicker for R {
    fn pick_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// The match's candidate words plus the words already shown.
pub struct WordBag {
    pool: Vec<String>,
    used: HashSet<String>,
    picker: Box<dyn WordPicker>,
}

impl WordBag {
    pub fn new(pool: Vec<String>, picker: Box<dyn WordPicker>) -> Result<Self, SettingsError> {
        if pool.is_empty() {
            return Err(SettingsError::EmptyWordPool);
        }
        Ok(Self {
            pool,
            used: HashSet::new(),
            picker,
        })
    }

    /// Pool made of the selected categories, with nothing used yet
    pub fn initialize(
        catalog: &WordCatalog,
        categories: &[String],
        picker: Box<dyn WordPicker>,
    ) -> Result<Self, SettingsError> {
        Self::new(catalog.pool_for(categories)?, picker)
    }

    /// Draw a word not shown yet. Once every word has been shown the whole
    /// pool is eligible again, so the game never runs dry.
    pub fn next(&mut self) -> String {
        let available: Vec<&String> = self
            .pool
            .iter()
            .filter(|word| !self.used.contains(*word))
            .collect();

        let candidates: Vec<&String> = if available.is_empty() {
            debug!("Word pool exhausted after {} words, allowing repeats", self.used.len());
            self.pool.iter().collect()
        } else {
            available
        };

        let index = self.picker.pick_index(candidates.len()) % candidates.len();
        let word = candidates[index].clone();
        self.used.insert(word.clone());
        word
    }

    pub fn contains(&self, word: &str) -> bool {
        self.pool.iter().any(|w| w == word)
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    pub fn used_len(&self) -> usize {
        self.used.len()
    }
}

impl fmt::Debug for WordBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordBag")
            .field("pool", &self.pool.len())
            .field("used", &self.used.len())
            .finish()
    }
}
