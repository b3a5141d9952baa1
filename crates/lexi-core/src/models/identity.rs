//! User identity and persisted session snapshot models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Profile of a signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// The identity currently active in the process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UserIdentity {
    #[default]
    Guest,
    LoggedIn(UserProfile),
}

impl UserIdentity {
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn(_))
    }

    #[must_use]
    pub const fn profile(&self) -> Option<&UserProfile> {
        match self {
            Self::Guest => None,
            Self::LoggedIn(profile) => Some(profile),
        }
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.profile().map(|profile| profile.email.as_str())
    }
}

/// OAuth token material obtained by the authentication layer
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Expiry as Unix seconds
    pub expires_at: i64,
}

impl TokenInfo {
    /// A token is fresh only while `now` is strictly before its expiry.
    #[must_use]
    pub const fn is_fresh_at(&self, now: i64) -> bool {
        self.expires_at > now
    }
}

impl fmt::Debug for TokenInfo {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TokenInfo")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// On-disk snapshot of a signed-in session (`System/CurrentUser.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub user: UserProfile,
    pub token: TokenInfo,
}

impl SessionSnapshot {
    #[must_use]
    pub const fn is_valid_at(&self, now: i64) -> bool {
        self.token.is_fresh_at(now)
    }
}
