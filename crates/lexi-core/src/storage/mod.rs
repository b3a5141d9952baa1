//! File-backed stores for cached dictionary entities.
//!
//! Stores keep no in-memory cache: every call is a real filesystem read or
//! write. Writes go to a sibling temporary file that is renamed into place.

mod fs;
mod quote_store;
mod word_store;

pub use fs::{list_file_stems, read_json_optional, remove_file_if_exists, write_json_atomic};
pub use quote_store::QuoteStore;
pub use word_store::{DownloadStatus, WordStore};
