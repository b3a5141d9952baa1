use lexi_core::AppContext;

use crate::cli::WordCommands;
use crate::commands::common::{format_word_lines, parse_word_payload, read_input};
use crate::error::CliError;

pub fn run_word(command: WordCommands, context: &AppContext) -> Result<(), CliError> {
    match command {
        WordCommands::Show { word, json } => {
            let words = context
                .words
                .load(&word)?
                .ok_or_else(|| CliError::WordNotFound(word.trim().to_string()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&words)?);
            } else {
                for line in format_word_lines(&words) {
                    println!("{line}");
                }
            }
        }
        WordCommands::List => {
            for word in context.words.list_stored_words()? {
                println!("{word}");
            }
        }
        WordCommands::Save { input } => {
            let words = parse_word_payload(&read_input(input.as_deref())?)?;
            let headword = &words[0].word;
            if context.words.save_if_absent(&words)? {
                println!("Saved '{headword}'");
            } else {
                println!("'{headword}' is already cached");
            }
        }
        WordCommands::Download { input } => {
            let words = parse_word_payload(&read_input(input.as_deref())?)?;
            let status = context.words.download(&words)?;
            println!("'{}' {}", words[0].word, status);
        }
        WordCommands::Remove { word } => {
            if context.words.remove(&word)? {
                println!("Removed '{}'", word.trim());
            } else {
                return Err(CliError::WordNotFound(word.trim().to_string()));
            }
        }
    }
    Ok(())
}
