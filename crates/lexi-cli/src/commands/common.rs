use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use lexi_core::{LoginRecord, StorageConfig, Word};
use serde::Serialize;
use serde_json::Value;

use crate::error::CliError;

const DATA_DIR_NAME: &str = "lexi";
const SENSE_SUMMARY_LEN: usize = 100;

#[derive(Debug, Serialize)]
pub struct LoginRecordItem {
    pub email: String,
    pub login_time: String,
    pub logout_time: Option<String>,
    pub open: bool,
}

/// Resolve the storage root: `--storage-root`, then `LEXI_STORAGE_ROOT`, then
/// the platform data directory.
pub fn resolve_storage_config(explicit: Option<PathBuf>) -> Result<StorageConfig, CliError> {
    if let Some(root) = explicit {
        return StorageConfig::from_raw(Some(root.to_string_lossy().into_owned()))
            .map_err(|error| CliError::Config(error.to_string()));
    }
    if let Some(config) = StorageConfig::from_env() {
        return Ok(config);
    }
    dirs::data_dir()
        .map(|dir| StorageConfig::new(dir.join(DATA_DIR_NAME)))
        .ok_or_else(|| {
            CliError::Config(
                "Failed to resolve a data directory; pass --storage-root or set LEXI_STORAGE_ROOT"
                    .to_string(),
            )
        })
}

/// Read raw input from `path`, or from piped stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    if let Some(path) = path {
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Err(CliError::EmptyInput);
    }
    let mut buffer = String::new();
    stdin.read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Parse a dictionary payload: either an array of senses or a single sense.
pub fn parse_word_payload(raw: &str) -> Result<Vec<Word>, CliError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CliError::EmptyInput);
    }

    let words = if trimmed.starts_with('[') {
        serde_json::from_str::<Vec<Word>>(trimmed)?
    } else {
        vec![serde_json::from_str::<Word>(trimmed)?]
    };
    if words.is_empty() {
        return Err(CliError::EmptyInput);
    }
    Ok(words)
}

pub fn format_word_lines(words: &[Word]) -> Vec<String> {
    let Some(first) = words.first() else {
        return Vec::new();
    };

    let mut lines = vec![first.word.clone()];
    lines.extend(
        words
            .iter()
            .enumerate()
            .map(|(index, sense)| format!("  {}. {}", index + 1, sense_summary(sense))),
    );
    lines
}

/// Short description of a sense: its first definition when the payload has
/// the usual dictionary shape, otherwise the compact payload.
pub fn sense_summary(sense: &Word) -> String {
    let summary = sense
        .details
        .get("definition")
        .and_then(Value::as_str)
        .or_else(|| sense.details.values().find_map(first_definition))
        .map_or_else(
            || Value::Object(sense.details.clone()).to_string(),
            ToString::to_string,
        );
    truncate_with_ellipsis(&summary, SENSE_SUMMARY_LEN)
}

fn first_definition(value: &Value) -> Option<&str> {
    match value {
        Value::Object(map) => map
            .get("definition")
            .and_then(Value::as_str)
            .or_else(|| map.values().find_map(first_definition)),
        Value::Array(items) => items.iter().find_map(first_definition),
        _ => None,
    }
}

pub fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let mut truncated = text
        .chars()
        .take(max_len.saturating_sub(3))
        .collect::<String>();
    truncated.push_str("...");
    truncated
}

pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

pub fn format_unix_timestamp(seconds: i64) -> String {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map_or_else(|| seconds.to_string(), format_timestamp)
}

pub fn login_record_item(record: &LoginRecord) -> LoginRecordItem {
    LoginRecordItem {
        email: record.email.clone(),
        login_time: record.login_time.to_rfc3339(),
        logout_time: record.logout_time.map(|time| time.to_rfc3339()),
        open: record.is_open(),
    }
}

pub fn format_login_record_line(record: &LoginRecord) -> String {
    let logout = record
        .logout_time
        .map_or_else(|| "open".to_string(), format_timestamp);
    format!(
        "{}  login={}  logout={}",
        record.email,
        format_timestamp(record.login_time),
        logout
    )
}
