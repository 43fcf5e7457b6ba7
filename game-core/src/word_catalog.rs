use anyhow::{Context, Result, anyhow};
use game_types::{CategoryInfo, SettingsError};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Category name -> word list. Each category is loaded from one word-list file.
#[derive(Debug, Clone, Default)]
pub struct WordCatalog {
    categories: BTreeMap<String, Vec<String>>,
}

impl WordCatalog {
    /// Build a catalog from `(category, word list text)` pairs
    pub fn from_lists<I, N, T>(lists: I) -> Self
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: AsRef<str>,
    {
        let mut categories = BTreeMap::new();
        for (name, text) in lists {
            let words = parse_word_list(text.as_ref());
            if !words.is_empty() {
                categories.insert(name.into(), words);
            }
        }
        Self { categories }
    }

    /// Load every `*.txt` file in `dir` as a category named after the file stem
    pub fn from_directory<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read words directory {}", dir.display()))?;

        let mut lists = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("txt") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                warn!("Skipping word list with non UTF-8 name: {}", path.display());
                continue;
            };
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read word list {}", path.display()))?;
            lists.push((name.to_string(), text));
        }

        let catalog = Self::from_lists(lists);
        if catalog.categories.is_empty() {
            return Err(anyhow!("No word lists found in {}", dir.display()));
        }

        info!(
            "Loaded {} categories ({} words) from {}",
            catalog.categories.len(),
            catalog.total_words(),
            dir.display()
        );
        Ok(catalog)
    }

    pub fn category_names(&self) -> Vec<String> {
        self.categories.keys().cloned().collect()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    pub fn word_count(&self, category: &str) -> usize {
        self.categories.get(category).map_or(0, Vec::len)
    }

    pub fn total_words(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn infos(&self) -> Vec<CategoryInfo> {
        self.categories
            .iter()
            .map(|(name, words)| CategoryInfo {
                name: name.clone(),
                word_count: words.len(),
            })
            .collect()
    }

    /// Candidate pool for a match: the selected categories concatenated in
    /// selection order. Words shared by two categories appear twice.
    pub fn pool_for(&self, selected: &[String]) -> Result<Vec<String>, SettingsError> {
        if selected.is_empty() {
            return Err(SettingsError::NoCategories);
        }

        let mut pool = Vec::new();
        for name in selected {
            let words = self
                .categories
                .get(name)
                .ok_or_else(|| SettingsError::UnknownCategory { name: name.clone() })?;
            pool.extend(words.iter().cloned());
        }

        if pool.is_empty() {
            return Err(SettingsError::EmptyWordPool);
        }
        Ok(pool)
    }
}

/// One word per line; blank lines and `#` comments are skipped
fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
