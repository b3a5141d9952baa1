//! Data models for Lexi

mod identity;
mod login_record;
mod quote;
mod word;

pub use identity::{SessionSnapshot, TokenInfo, UserIdentity, UserProfile};
pub use login_record::LoginRecord;
pub use quote::Quote;
pub use word::Word;
