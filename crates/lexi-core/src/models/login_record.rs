//! Login log record model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One login/logout event in the rolling login log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRecord {
    pub email: String,
    pub login_time: DateTime<Utc>,
    /// `None` while the session is still open
    #[serde(default)]
    pub logout_time: Option<DateTime<Utc>>,
}

impl LoginRecord {
    /// Open a record for `email` stamped with the current time
    #[must_use]
    pub fn open(email: impl Into<String>) -> Self {
        Self::open_at(email, Utc::now())
    }

    #[must_use]
    pub fn open_at(email: impl Into<String>, login_time: DateTime<Utc>) -> Self {
        Self {
            email: email.into(),
            login_time,
            logout_time: None,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.logout_time.is_none()
    }

    #[must_use]
    pub fn belongs_to(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }
}
