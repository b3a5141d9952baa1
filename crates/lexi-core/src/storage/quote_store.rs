//! Cached quotes, one JSON file per quote id.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::StorageConfig;
use crate::models::Quote;
use crate::storage::fs::{list_file_stems, read_json_optional, write_json_atomic};
use crate::Result;

const QUOTE_FILE_PREFIX: &str = "quote_";

/// File-backed quote cache rooted at `<root>/StoredQuote`.
#[derive(Debug, Clone)]
pub struct QuoteStore {
    dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl QuoteStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self::with_dir(config.quote_dir())
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path_for(&self, id: u32) -> PathBuf {
        self.dir.join(format!("{QUOTE_FILE_PREFIX}{id}.json"))
    }

    pub fn load_by_id(&self, id: u32) -> Result<Option<Quote>> {
        self.load_by_path(&self.path_for(id))
    }

    pub fn load_by_path(&self, path: &Path) -> Result<Option<Quote>> {
        let quote = read_json_optional::<Quote>(path)?;
        if quote.is_none() {
            tracing::debug!("Quote cache miss at {}", path.display());
        }
        Ok(quote)
    }

    /// Cache `quote` unless a file for its id already exists.
    pub fn save_if_absent(&self, quote: &Quote) -> Result<bool> {
        let path = self.path_for(quote.id);

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if path.exists() {
            return Ok(false);
        }
        write_json_atomic(&path, quote)?;
        tracing::info!("Cached quote {} at {}", quote.id, path.display());
        Ok(true)
    }

    /// Ids of every cached quote, ascending.
    pub fn list_stored_ids(&self) -> Result<Vec<u32>> {
        let mut ids = list_file_stems(&self.dir, "json")?
            .iter()
            .filter_map(|stem| stem.strip_prefix(QUOTE_FILE_PREFIX)?.parse::<u32>().ok())
            .collect::<Vec<_>>();
        ids.sort_unstable();
        Ok(ids)
    }
}
