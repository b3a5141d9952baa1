//! lexi-core - Core library for Lexi
//!
//! This crate contains the local persistence and session layer shared by every
//! Lexi interface: the cached word and quote stores, the dictionary index,
//! the user session service and the login log.

pub mod config;
pub mod context;
pub mod error;
pub mod index;
pub mod login_log;
pub mod models;
pub mod session;
pub mod storage;
pub mod util;

pub use config::StorageConfig;
pub use context::AppContext;
pub use error::{Error, Result};
pub use models::{LoginRecord, Quote, SessionSnapshot, TokenInfo, UserIdentity, UserProfile, Word};
