//! Storage configuration.
//!
//! Every store resolves its files relative to one injected storage root:
//!
//! ```text
//! <root>/
//! ├── AvailableWordList.txt
//! ├── StoredWord/<word>.json
//! ├── StoredQuote/quote_<id>.json
//! ├── System/CurrentUser.json
//! ├── System/LoginLog.json
//! └── UserData/<namespace>/
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::util::normalize_text_option;
use crate::{Error, Result};

/// Environment variable consulted by [`StorageConfig::from_env`].
pub const STORAGE_ROOT_ENV: &str = "LEXI_STORAGE_ROOT";

const WORD_DIR_NAME: &str = "StoredWord";
const QUOTE_DIR_NAME: &str = "StoredQuote";
const SYSTEM_DIR_NAME: &str = "System";
const USER_DATA_DIR_NAME: &str = "UserData";
const SESSION_FILE_NAME: &str = "CurrentUser.json";
const LOGIN_LOG_FILE_NAME: &str = "LoginLog.json";
const AVAILABLE_WORD_LIST_FILE_NAME: &str = "AvailableWordList.txt";

/// Storage root resolved once at startup and handed to every store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    pub root: PathBuf,
}

impl StorageConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the storage root from a raw path string.
    ///
    /// Blank values are rejected so that a stray empty env var does not point
    /// the stores at the process working directory.
    pub fn from_raw(raw: Option<String>) -> Result<Self> {
        normalize_text_option(raw)
            .map(Self::new)
            .ok_or_else(|| Error::Storage("storage root must not be empty".to_string()))
    }

    /// Resolve the storage root from `LEXI_STORAGE_ROOT`, if set.
    pub fn from_env() -> Option<Self> {
        normalize_text_option(std::env::var(STORAGE_ROOT_ENV).ok()).map(Self::new)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn word_dir(&self) -> PathBuf {
        self.root.join(WORD_DIR_NAME)
    }

    pub fn quote_dir(&self) -> PathBuf {
        self.root.join(QUOTE_DIR_NAME)
    }

    pub fn system_dir(&self) -> PathBuf {
        self.root.join(SYSTEM_DIR_NAME)
    }

    pub fn session_file(&self) -> PathBuf {
        self.system_dir().join(SESSION_FILE_NAME)
    }

    pub fn login_log_file(&self) -> PathBuf {
        self.system_dir().join(LOGIN_LOG_FILE_NAME)
    }

    pub fn available_word_list(&self) -> PathBuf {
        self.root.join(AVAILABLE_WORD_LIST_FILE_NAME)
    }

    pub fn user_data_dir(&self) -> PathBuf {
        self.root.join(USER_DATA_DIR_NAME)
    }
}
