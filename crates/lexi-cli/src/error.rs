use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] lexi_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No word data provided")]
    EmptyInput,
    #[error("Word not cached: {0}")]
    WordNotFound(String),
    #[error("Quote not cached: {0}")]
    QuoteNotFound(u32),
    #[error("Configuration error: {0}")]
    Config(String),
}
