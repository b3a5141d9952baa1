//! Lexi CLI - Command-line interface for the local vocabulary cache
//!
//! Stands in for the lookup, authentication and browsing layers: it stores
//! parsed entries, reads cached ones and drives the session service.

mod cli;
mod commands;
mod error;
#[cfg(test)]
mod tests;

use clap::{CommandFactory, Parser};
use lexi_core::AppContext;

use crate::cli::{Cli, Commands};
use crate::commands::common::resolve_storage_config;
use crate::commands::completions::run_completions;
use crate::commands::index::run_index;
use crate::commands::log::run_log;
use crate::commands::quote::run_quote;
use crate::commands::session::run_session;
use crate::commands::word::run_word;
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let default_directive = "lexi=info"
        .parse::<tracing_subscriber::filter::Directive>()
        .map_err(|error| CliError::Config(format!("invalid log directive: {error}")))?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_directive),
        )
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };
    if let Commands::Completions { shell, output } = command {
        return run_completions(shell, output.as_deref());
    }

    let config = resolve_storage_config(cli.storage_root)?;
    let context = AppContext::open(config);
    context.session.restore_session();

    match command {
        Commands::Word { command } => run_word(command, &context),
        Commands::Quote { command } => run_quote(command, &context),
        Commands::Index { prefix, limit } => run_index(prefix.as_deref(), limit, &context),
        Commands::Session { command } => run_session(command, &context),
        Commands::Log { command } => run_log(command, &context),
        Commands::Completions { .. } => Ok(()),
    }
}
