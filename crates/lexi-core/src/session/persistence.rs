//! Session snapshot persistence.

use std::path::{Path, PathBuf};

use crate::config::StorageConfig;
use crate::models::SessionSnapshot;
use crate::storage::{read_json_optional, remove_file_if_exists, write_json_atomic};
use crate::Result;

/// Backend holding the persisted session snapshot.
pub trait SessionPersistence: Send + Sync + 'static {
    fn load_session(&self) -> Result<Option<SessionSnapshot>>;
    fn save_session(&self, session: &SessionSnapshot) -> Result<()>;
    fn clear_session(&self) -> Result<()>;
}

/// Session snapshot kept in `System/CurrentUser.json`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self::with_path(config.session_file())
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionPersistence for FileSessionStore {
    fn load_session(&self) -> Result<Option<SessionSnapshot>> {
        read_json_optional(&self.path)
    }

    fn save_session(&self, session: &SessionSnapshot) -> Result<()> {
        write_json_atomic(&self.path, session)
    }

    fn clear_session(&self) -> Result<()> {
        if remove_file_if_exists(&self.path)? {
            tracing::debug!("Removed session file {}", self.path.display());
        }
        Ok(())
    }
}
