//! Cached vocabulary entries, one JSON file per lowercased headword.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::StorageConfig;
use crate::models::Word;
use crate::storage::fs::{
    list_file_stems, read_json_optional, remove_file_if_exists, write_json_atomic,
};
use crate::{Error, Result};

const WORD_FILE_EXTENSION: &str = "json";
const WORD_FILE_SUFFIX: &str = ".json";

/// Outcome of [`WordStore::download`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadStatus {
    AlreadyExists(PathBuf),
    Downloaded(PathBuf),
}

impl DownloadStatus {
    #[must_use]
    pub const fn was_written(&self) -> bool {
        matches!(self, Self::Downloaded(_))
    }
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyExists(path) => write!(f, "already exists at {}", path.display()),
            Self::Downloaded(path) => write!(f, "downloaded to {}", path.display()),
        }
    }
}

/// File-backed word cache rooted at `<root>/StoredWord`.
///
/// Clones share one write lock, so the existence check and the write of
/// [`save_if_absent`](Self::save_if_absent) and [`download`](Self::download)
/// are a single critical section. Build one store per storage root.
#[derive(Debug, Clone)]
pub struct WordStore {
    dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl WordStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self::with_dir(config.word_dir())
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Map a word to its cache file, dropping a trailing `.json` if present.
    ///
    /// Case is preserved; callers that address a cached entry lowercase first.
    pub fn path_for(&self, word: &str) -> PathBuf {
        let stem = word.strip_suffix(WORD_FILE_SUFFIX).unwrap_or(word);
        self.dir.join(format!("{stem}{WORD_FILE_SUFFIX}"))
    }

    /// Headwords currently cached, sorted. Empty when nothing was cached yet.
    pub fn list_stored_words(&self) -> Result<Vec<String>> {
        list_file_stems(&self.dir, WORD_FILE_EXTENSION)
    }

    pub fn contains(&self, word: &str) -> Result<bool> {
        let key = headword_key(word)?;
        Ok(self.path_for(&key).is_file())
    }

    /// Load the cached senses for `word`, or `None` when it was never cached.
    pub fn load(&self, word: &str) -> Result<Option<Vec<Word>>> {
        let key = headword_key(word)?;
        let path = self.path_for(&key);
        let words = read_json_optional::<Vec<Word>>(&path)?;
        tracing::debug!(
            "Word cache {} for '{}'",
            if words.is_some() { "hit" } else { "miss" },
            key
        );
        Ok(words)
    }

    /// Write `words` only if the headword is not cached yet.
    ///
    /// Returns `false` without touching the existing file when it is.
    pub fn save_if_absent(&self, words: &[Word]) -> Result<bool> {
        let key = first_headword_key(words)?;
        let path = self.path_for(&key);

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if path.exists() {
            tracing::debug!("Word '{}' already cached, skipping save", key);
            return Ok(false);
        }
        write_json_atomic(&path, words)?;
        tracing::info!("Cached word '{}' at {}", key, path.display());
        Ok(true)
    }

    /// User-facing save reporting where the entry lives.
    pub fn download(&self, words: &[Word]) -> Result<DownloadStatus> {
        let key = first_headword_key(words)?;
        let path = self.path_for(&key);

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if path.exists() {
            return Ok(DownloadStatus::AlreadyExists(path));
        }
        write_json_atomic(&path, words)?;
        tracing::info!("Downloaded word '{}' to {}", key, path.display());
        Ok(DownloadStatus::Downloaded(path))
    }

    /// Drop a cached entry. Returns whether a file was removed.
    pub fn remove(&self, word: &str) -> Result<bool> {
        let key = headword_key(word)?;
        let path = self.path_for(&key);

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let removed = remove_file_if_exists(&path)?;
        if removed {
            tracing::info!("Removed cached word '{}'", key);
        }
        Ok(removed)
    }
}

fn first_headword_key(words: &[Word]) -> Result<String> {
    let first = words
        .first()
        .ok_or_else(|| Error::InvalidInput("word list must not be empty".to_string()))?;
    headword_key(&first.word)
}

/// Lowercased file stem for a headword; rejects names that would escape the
/// word directory.
fn headword_key(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let stem = trimmed.strip_suffix(WORD_FILE_SUFFIX).unwrap_or(trimmed);
    let key = stem.to_lowercase();
    if key.is_empty() {
        return Err(Error::InvalidInput("headword must not be empty".to_string()));
    }
    if key == "." || key == ".." || key.contains(['/', '\\', '\0']) {
        return Err(Error::InvalidInput(format!("invalid headword '{raw}'")));
    }
    Ok(key)
}
