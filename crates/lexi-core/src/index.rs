//! Dictionary index: the static available-word list merged with the words
//! cached locally.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::StorageConfig;
use crate::storage::WordStore;
use crate::Result;

/// Ordered, duplicate-free vocabulary index.
///
/// Duplicates are exact string matches after trimming, so `Apple` from the
/// available list and a cached `apple` are both kept. Lookups fold case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryIndex {
    words: Vec<String>,
}

impl DictionaryIndex {
    /// Build an index from a word sequence, keeping the first occurrence of
    /// each word and skipping blanks.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let words = words
            .into_iter()
            .filter_map(|word| {
                let word = word.as_ref().trim();
                (!word.is_empty() && seen.insert(word.to_string())).then(|| word.to_string())
            })
            .collect();
        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn into_words(self) -> Vec<String> {
        self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        let word = word.trim().to_lowercase();
        self.words
            .iter()
            .any(|candidate| candidate.to_lowercase() == word)
    }

    /// Words starting with `prefix` (case-insensitive), in index order.
    pub fn search_prefix(&self, prefix: &str, limit: usize) -> Vec<&str> {
        let prefix = prefix.trim().to_lowercase();
        self.words
            .iter()
            .filter(|word| word.to_lowercase().starts_with(&prefix))
            .take(limit)
            .map(String::as_str)
            .collect()
    }
}

/// Builds the [`DictionaryIndex`] from `AvailableWordList.txt` and the
/// word cache.
#[derive(Debug, Clone)]
pub struct DictionaryIndexBuilder {
    available_list: PathBuf,
    words: WordStore,
}

impl DictionaryIndexBuilder {
    pub fn new(config: &StorageConfig, words: WordStore) -> Self {
        Self::with_list(config.available_word_list(), words)
    }

    pub fn with_list(available_list: impl Into<PathBuf>, words: WordStore) -> Self {
        Self {
            available_list: available_list.into(),
            words,
        }
    }

    /// Available words first, then cached-only words, duplicates collapsed.
    pub fn build_index(&self) -> Result<DictionaryIndex> {
        let available = read_available_words(&self.available_list)?;
        let stored = self.words.list_stored_words()?;
        tracing::debug!(
            "Building dictionary index from {} available and {} stored words",
            available.len(),
            stored.len()
        );
        Ok(DictionaryIndex::from_words(
            available.iter().chain(stored.iter()),
        ))
    }
}

/// One word per line, trimmed, blank lines skipped. A missing list is empty.
fn read_available_words(path: &Path) -> Result<Vec<String>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("No available word list at {}", path.display());
            return Ok(Vec::new());
        }
        Err(error) => return Err(error.into()),
    };
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;
    use crate::models::Word;

    fn builder_with(
        list: Option<&str>,
        stored: &[&str],
    ) -> (tempfile::TempDir, DictionaryIndexBuilder) {
        let tmp = tempdir().unwrap();
        let config = StorageConfig::new(tmp.path());
        if let Some(list) = list {
            fs::write(config.available_word_list(), list).unwrap();
        }
        let words = WordStore::new(&config);
        for word in stored {
            words.save_if_absent(&[Word::new(*word)]).unwrap();
        }
        let builder = DictionaryIndexBuilder::new(&config, words);
        (tmp, builder)
    }

    #[test]
    fn index_is_available_then_stored_without_duplicates() {
        let (_tmp, builder) =
            builder_with(Some("  banana \n\napple\ncherry\napple\n"), &["apple", "zest", "date"]);
        let index = builder.build_index().unwrap();

        assert_eq!(index.words(), ["banana", "apple", "cherry", "date", "zest"]);
    }

    #[test]
    fn every_source_word_appears_exactly_once() {
        let (_tmp, builder) = builder_with(Some("a\nb\nc\nb\n"), &["c", "d", "a"]);
        let index = builder.build_index().unwrap();

        for word in ["a", "b", "c", "d"] {
            let occurrences = index.words().iter().filter(|w| *w == word).count();
            assert_eq!(occurrences, 1, "{word} should appear once");
        }
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn missing_list_yields_stored_words_only() {
        let (_tmp, builder) = builder_with(None, &["kiwi"]);
        let index = builder.build_index().unwrap();
        assert_eq!(index.into_words(), vec!["kiwi".to_string()]);
    }

    #[test]
    fn empty_sources_yield_empty_index() {
        let (_tmp, builder) = builder_with(None, &[]);
        assert!(builder.build_index().unwrap().is_empty());
    }

    #[test]
    fn search_prefix_respects_order_and_limit() {
        let index = DictionaryIndex::from_words(["Apple", "banana", "apricot", "avocado"]);
        assert_eq!(index.search_prefix("ap", 10), vec!["Apple", "apricot"]);
        assert_eq!(index.search_prefix("A", 2), vec!["Apple", "apricot"]);
        assert!(index.contains("APPLE"));
        assert!(!index.contains("cherry"));
    }

    #[test]
    fn lookups_fold_non_ascii_case() {
        let index = DictionaryIndex::from_words(["Été", "étude", "eagle"]);
        assert!(index.contains("été"));
        assert!(index.contains("ÉTUDE"));
        assert_eq!(index.search_prefix("ét", 10), vec!["Été", "étude"]);
        assert_eq!(index.search_prefix("ÉT", 1), vec!["Été"]);
    }

    #[test]
    fn differently_cased_sources_are_both_kept() {
        let (_tmp, builder) = builder_with(Some("Apple
"), &["apple"]);
        let index = builder.build_index().unwrap();
        assert_eq!(index.words(), ["Apple", "apple"]);
        assert!(index.contains("APPLE"));
    }

    #[test]
    fn dot_prefixed_cached_words_are_indexed() {
        let (_tmp, builder) = builder_with(Some(".net
net
"), &[".net", "net"]);
        let index = builder.build_index().unwrap();
        assert_eq!(index.words(), [".net", "net"]);
        assert!(index.contains(".NET"));
    }
}
