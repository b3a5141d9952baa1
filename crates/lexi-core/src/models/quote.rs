//! Quote model

use serde::{Deserialize, Serialize};

/// A cached inspirational or example quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Identifier assigned by the quote provider
    pub id: u32,
    /// Quote text
    pub quote: String,
    /// Attributed author
    pub author: String,
}

impl Quote {
    #[must_use]
    pub fn new(id: u32, quote: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            quote: quote.into(),
            author: author.into(),
        }
    }
}
