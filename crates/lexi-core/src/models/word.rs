//! Word model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One sense record of a cached vocabulary entry.
///
/// Only the headword is interpreted here; everything else the dictionary API
/// returned (phonetics, meanings, source urls, ...) is carried through as an
/// opaque payload so a load returns exactly what was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Headword as returned by the dictionary
    pub word: String,
    /// Remaining sense payload
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Word {
    /// Create a sense record with an empty payload
    #[must_use]
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            details: Map::new(),
        }
    }

    /// Attach a payload field
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: Value) -> Self {
        self.details.insert(key.into(), value);
        self
    }
}
