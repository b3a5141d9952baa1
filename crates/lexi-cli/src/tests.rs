use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use clap_complete::Shell;
use lexi_core::{AppContext, LoginRecord, StorageConfig, Word};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::tempdir;

use crate::cli::{SessionCommands, WordCommands};
use crate::commands::common::{
    format_login_record_line, format_unix_timestamp, format_word_lines, login_record_item,
    parse_word_payload, resolve_storage_config, sense_summary, truncate_with_ellipsis,
};
use crate::commands::completions::{completion_script, run_completions};
use crate::commands::session::{build_snapshot, run_session};
use crate::commands::word::run_word;
use crate::error::CliError;

#[test]
fn explicit_storage_root_wins() {
    let config = resolve_storage_config(Some(PathBuf::from("/srv/lexi"))).unwrap();
    assert_eq!(config, StorageConfig::new("/srv/lexi"));
}

#[test]
fn blank_storage_root_is_rejected() {
    let error = resolve_storage_config(Some(PathBuf::from("  "))).unwrap_err();
    assert!(matches!(error, CliError::Config(_)));
}

#[test]
fn parse_word_payload_accepts_array_or_single_sense() {
    let array = parse_word_payload(r#"[{"word":"apple"},{"word":"apple","x":1}]"#).unwrap();
    assert_eq!(array.len(), 2);

    let single = parse_word_payload(r#"{"word":"pear","phonetic":"/pɛə/"}"#).unwrap();
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].word, "pear");
}

#[test]
fn parse_word_payload_rejects_empty_input() {
    assert!(matches!(parse_word_payload("  \n"), Err(CliError::EmptyInput)));
    assert!(matches!(parse_word_payload("[]"), Err(CliError::EmptyInput)));
    assert!(matches!(
        parse_word_payload("{oops"),
        Err(CliError::Serialization(_))
    ));
}

#[test]
fn sense_summary_prefers_nested_definition() {
    let sense = Word::new("apple").with_detail(
        "meanings",
        json!([{ "partOfSpeech": "noun", "definitions": [{ "definition": "A round fruit." }] }]),
    );
    assert_eq!(sense_summary(&sense), "A round fruit.");

    let opaque = Word::new("apple").with_detail("note", json!(3));
    assert_eq!(sense_summary(&opaque), r#"{"note":3}"#);
}

#[test]
fn format_word_lines_numbers_senses() {
    let words = vec![
        Word::new("run").with_detail("definition", json!("move fast")),
        Word::new("run").with_detail("definition", json!("a period of running")),
    ];
    assert_eq!(
        format_word_lines(&words),
        vec![
            "run".to_string(),
            "  1. move fast".to_string(),
            "  2. a period of running".to_string(),
        ]
    );
    assert!(format_word_lines(&[]).is_empty());
}

#[test]
fn truncate_with_ellipsis_shortens_long_text() {
    assert_eq!(truncate_with_ellipsis("short", 10), "short");
    assert_eq!(truncate_with_ellipsis("abcdefghijkl", 8), "abcde...");
}

#[test]
fn format_unix_timestamp_returns_utc_label() {
    assert_eq!(format_unix_timestamp(0), "1970-01-01 00:00:00 UTC");
}

#[test]
fn login_record_formatting_marks_open_sessions() {
    let mut record = LoginRecord::open_at("a@example.com", Utc.timestamp_opt(0, 0).unwrap());
    assert_eq!(
        format_login_record_line(&record),
        "a@example.com  login=1970-01-01 00:00:00 UTC  logout=open"
    );
    assert!(login_record_item(&record).open);

    record.logout_time = Some(Utc.timestamp_opt(60, 0).unwrap());
    let item = login_record_item(&record);
    assert!(!item.open);
    assert_eq!(item.logout_time.as_deref(), Some("1970-01-01T00:01:00+00:00"));
}

#[test]
fn build_snapshot_requires_identity_fields() {
    let snapshot = build_snapshot(
        " u-1 ".to_string(),
        "reader@example.com".to_string(),
        "Reader".to_string(),
        Some("  ".to_string()),
        "token".to_string(),
        42,
    )
    .unwrap();
    assert_eq!(snapshot.user.user_id, "u-1");
    assert_eq!(snapshot.user.avatar_url, None);
    assert_eq!(snapshot.token.expires_at, 42);

    let error = build_snapshot(
        "u-1".to_string(),
        " ".to_string(),
        "Reader".to_string(),
        None,
        "token".to_string(),
        42,
    )
    .unwrap_err();
    assert!(error.to_string().contains("email"));
}

#[test]
fn word_download_command_writes_into_storage_root() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("apple.json");
    std::fs::write(&input, r#"[{"word":"Apple","definition":"fruit"}]"#).unwrap();
    let context = AppContext::open(StorageConfig::new(tmp.path().join("store")));

    run_word(
        WordCommands::Download {
            input: Some(input.clone()),
        },
        &context,
    )
    .unwrap();
    run_word(WordCommands::Download { input: Some(input) }, &context).unwrap();

    assert_eq!(context.words.list_stored_words().unwrap(), vec!["apple"]);
    assert!(matches!(
        run_word(
            WordCommands::Show {
                word: "missing".to_string(),
                json: false
            },
            &context
        ),
        Err(CliError::WordNotFound(_))
    ));
}

#[test]
fn session_login_then_logout_updates_log() {
    let tmp = tempdir().unwrap();
    let context = AppContext::open(StorageConfig::new(tmp.path()));

    run_session(
        SessionCommands::Login {
            user_id: "u-1".to_string(),
            email: "reader@example.com".to_string(),
            name: "Reader".to_string(),
            avatar_url: None,
            token: "token".to_string(),
            expires_in: 3600,
        },
        &context,
    )
    .unwrap();
    assert!(context.session.is_session_valid());

    run_session(SessionCommands::Logout, &context).unwrap();
    let records = context.login_log.load_all();
    assert_eq!(records.len(), 1);
    assert!(!records[0].is_open());
    assert!(context.session.load_session().is_none());
}

#[test]
fn completion_scripts_target_the_lexi_binary() {
    let bash = String::from_utf8(completion_script(Shell::Bash)).unwrap();
    assert!(bash.contains("_lexi"));
    assert!(bash.contains("complete"));

    let fish = String::from_utf8(completion_script(Shell::Fish)).unwrap();
    assert!(fish.contains("complete -c lexi"));
}

#[test]
fn completions_output_creates_parent_directories() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("share").join("zsh").join("_lexi");

    run_completions(Shell::Zsh, Some(&path)).unwrap();

    let written = std::fs::read(&path).unwrap();
    assert_eq!(written, completion_script(Shell::Zsh));
    assert!(!written.is_empty());
}
