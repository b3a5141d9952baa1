//! Application context built once at startup.

use std::sync::Arc;

use crate::config::StorageConfig;
use crate::index::DictionaryIndexBuilder;
use crate::login_log::LoginLogStore;
use crate::models::{LoginRecord, SessionSnapshot};
use crate::session::{FileSessionStore, SessionService, UserDataDirectory};
use crate::storage::{QuoteStore, WordStore};

/// Every store for one storage root, plus the session service.
///
/// Collaborators receive this by reference instead of reaching for globals.
pub struct AppContext {
    pub config: StorageConfig,
    pub words: WordStore,
    pub quotes: QuoteStore,
    pub index: DictionaryIndexBuilder,
    pub session: SessionService<FileSessionStore>,
    pub user_data: Arc<UserDataDirectory>,
    pub login_log: LoginLogStore,
}

impl AppContext {
    pub fn open(config: StorageConfig) -> Self {
        tracing::debug!("Opening storage root {}", config.root().display());
        let words = WordStore::new(&config);
        let user_data = Arc::new(UserDataDirectory::new(&config));
        Self {
            quotes: QuoteStore::new(&config),
            index: DictionaryIndexBuilder::new(&config, words.clone()),
            session: SessionService::new(FileSessionStore::new(&config), user_data.clone()),
            login_log: LoginLogStore::new(&config),
            words,
            user_data,
            config,
        }
    }

    /// Record a completed sign-in: switch identity, persist the snapshot and
    /// open a login record.
    pub fn sign_in(&self, snapshot: &SessionSnapshot) {
        self.session.set_logged_in_user(snapshot.user.clone());
        self.session.save_session(snapshot);
        self.login_log.append(LoginRecord::open(&snapshot.user.email));
    }

    /// Sign the current user out: close their login record and clear the session.
    ///
    /// Falls back to the persisted snapshot's email when the process is
    /// already in guest mode.
    pub fn sign_out(&self) {
        let email = self
            .session
            .current_identity()
            .email()
            .map(ToString::to_string)
            .or_else(|| self.session.load_session().map(|snapshot| snapshot.user.email));
        if let Some(email) = email {
            self.login_log.close_open_record(&email);
        }
        self.session.clear();
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::models::{TokenInfo, UserIdentity, UserProfile};

    fn snapshot() -> SessionSnapshot {
        SessionSnapshot {
            user: UserProfile {
                user_id: "u-1".to_string(),
                email: "reader@example.com".to_string(),
                display_name: "Reader".to_string(),
                avatar_url: None,
            },
            token: TokenInfo {
                access_token: "token".to_string(),
                refresh_token: None,
                expires_at: i64::MAX,
            },
        }
    }

    #[test]
    fn sign_in_and_out_round_trip() {
        let tmp = tempdir().unwrap();
        let context = AppContext::open(StorageConfig::new(tmp.path()));

        context.sign_in(&snapshot());
        assert!(context.session.is_logged_in());
        assert!(context.session.is_session_valid());
        assert!(context.user_data.current().ends_with("reader@example.com"));
        assert!(context.login_log.load_all()[0].is_open());

        context.sign_out();
        assert_eq!(context.session.current_identity(), UserIdentity::Guest);
        assert!(context.session.load_session().is_none());
        assert!(!context.login_log.load_all()[0].is_open());
    }

    #[test]
    fn sign_out_in_fresh_process_uses_persisted_email() {
        let tmp = tempdir().unwrap();
        let config = StorageConfig::new(tmp.path());
        AppContext::open(config.clone()).sign_in(&snapshot());

        let restarted = AppContext::open(config);
        assert!(!restarted.session.is_logged_in());
        restarted.sign_out();

        assert!(!restarted.login_log.load_all()[0].is_open());
        assert!(!restarted.config.session_file().exists());
    }

    #[test]
    fn index_sees_words_cached_through_the_context() {
        let tmp = tempdir().unwrap();
        let context = AppContext::open(StorageConfig::new(tmp.path()));
        context
            .words
            .save_if_absent(&[crate::models::Word::new("quill")])
            .unwrap();

        let index = context.index.build_index().unwrap();
        assert!(index.contains("quill"));
    }
}
