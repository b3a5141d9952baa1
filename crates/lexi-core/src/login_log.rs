//! Rolling log of login/logout events (`System/LoginLog.json`).
//!
//! The log is auxiliary: unreadable files load as empty and write failures
//! are logged, never returned.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};

use crate::config::StorageConfig;
use crate::models::LoginRecord;
use crate::storage::{read_json_optional, write_json_atomic};

/// Number of most recent records the log retains.
pub const MAX_LOGIN_RECORDS: usize = 50;

#[derive(Debug, Clone)]
pub struct LoginLogStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl LoginLogStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self::with_path(config.login_log_file())
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `record`, keeping only the newest [`MAX_LOGIN_RECORDS`].
    pub fn append(&self, record: LoginRecord) {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut records = self.read_records();
        records.push(record);
        if records.len() > MAX_LOGIN_RECORDS {
            let excess = records.len() - MAX_LOGIN_RECORDS;
            records.drain(..excess);
        }
        self.write_records(&records);
    }

    /// Every retained record, oldest first. Empty if the log is missing or unreadable.
    pub fn load_all(&self) -> Vec<LoginRecord> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.read_records()
    }

    pub fn records_for(&self, email: &str) -> Vec<LoginRecord> {
        self.load_all()
            .into_iter()
            .filter(|record| record.belongs_to(email))
            .collect()
    }

    /// Stamp the latest open record for `email` with the current time.
    pub fn close_open_record(&self, email: &str) {
        self.close_open_record_at(email, Utc::now());
    }

    /// Stamp the latest open record for `email` with `logout_time`.
    ///
    /// Does nothing when `email` has no open record.
    pub fn close_open_record_at(&self, email: &str, logout_time: DateTime<Utc>) {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut records = self.read_records();
        let Some(open) = records
            .iter_mut()
            .rev()
            .find(|record| record.belongs_to(email) && record.is_open())
        else {
            tracing::debug!("No open login record for {}", email);
            return;
        };
        open.logout_time = Some(logout_time);
        self.write_records(&records);
    }

    fn read_records(&self) -> Vec<LoginRecord> {
        match read_json_optional::<Vec<LoginRecord>>(&self.path) {
            Ok(records) => records.unwrap_or_default(),
            Err(error) => {
                tracing::warn!(
                    "Ignoring unreadable login log at {}: {}",
                    self.path.display(),
                    error
                );
                Vec::new()
            }
        }
    }

    fn write_records(&self, records: &[LoginRecord]) {
        if let Err(error) = write_json_atomic(&self.path, records) {
            tracing::warn!(
                "Failed to write login log at {}: {}",
                self.path.display(),
                error
            );
        }
    }
}
