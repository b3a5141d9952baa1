//! Per-user data namespace selection.

use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use crate::config::StorageConfig;

const GUEST_NAMESPACE: &str = "Guest";

/// Collaborator told which user's data directory is active.
pub trait DataNamespace: Send + Sync {
    fn select_guest(&self);
    fn select_user(&self, email: &str);
}

/// Points at `<root>/UserData/Guest` or `<root>/UserData/<email>`.
#[derive(Debug)]
pub struct UserDataDirectory {
    base: PathBuf,
    current: RwLock<PathBuf>,
}

impl UserDataDirectory {
    pub fn new(config: &StorageConfig) -> Self {
        Self::with_base(config.user_data_dir())
    }

    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        let current = base.join(GUEST_NAMESPACE);
        Self {
            base,
            current: RwLock::new(current),
        }
    }

    /// Directory of the namespace currently selected.
    pub fn current(&self) -> PathBuf {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_current(&self, path: PathBuf) {
        tracing::debug!("User data namespace set to {}", path.display());
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = path;
    }
}

impl DataNamespace for UserDataDirectory {
    fn select_guest(&self) {
        self.set_current(self.base.join(GUEST_NAMESPACE));
    }

    fn select_user(&self, email: &str) {
        self.set_current(self.base.join(namespace_segment(email)));
    }
}

/// Filesystem-safe directory name for an email address.
fn namespace_segment(email: &str) -> String {
    let segment = email
        .trim()
        .to_lowercase()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '@' | '.' | '-' | '_' | '+') {
                ch
            } else {
                '_'
            }
        })
        .collect::<String>();
    if segment.is_empty() || segment.chars().all(|ch| ch == '.') {
        format!("_{segment}")
    } else {
        segment
    }
}
