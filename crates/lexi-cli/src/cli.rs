use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "lexi")]
#[command(about = "Browse and manage your local vocabulary cache")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Storage root holding cached words, quotes and session files
    #[arg(long, global = true, value_name = "PATH")]
    pub storage_root: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect and manage cached words
    Word {
        #[command(subcommand)]
        command: WordCommands,
    },
    /// Inspect cached quotes
    Quote {
        #[command(subcommand)]
        command: QuoteCommands,
    },
    /// Print the dictionary index
    Index {
        /// Only show words starting with this prefix
        #[arg(long)]
        prefix: Option<String>,
        /// Maximum number of words to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Manage the signed-in user session
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Inspect the login log
    Log {
        #[command(subcommand)]
        command: LogCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum WordCommands {
    /// Show the cached senses of a word
    Show {
        word: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List cached headwords
    List,
    /// Cache a word list unless the headword is already cached
    Save {
        /// JSON array of word senses (stdin when omitted)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Download a word list into the cache and report where it lives
    Download {
        /// JSON array of word senses (stdin when omitted)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Remove a cached word
    Remove { word: String },
}

#[derive(Subcommand)]
pub enum QuoteCommands {
    /// Show a cached quote
    Show {
        id: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List cached quote ids
    List,
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Show the persisted session
    Status,
    /// Record a sign-in obtained from the identity provider
    Login {
        #[arg(long, value_name = "ID")]
        user_id: String,
        #[arg(long, value_name = "EMAIL")]
        email: String,
        #[arg(long, value_name = "NAME")]
        name: String,
        #[arg(long, value_name = "URL")]
        avatar_url: Option<String>,
        /// Access token issued by the identity provider
        #[arg(long, value_name = "TOKEN")]
        token: String,
        /// Seconds until the token expires
        #[arg(long, value_name = "SECS", default_value = "3600")]
        expires_in: i64,
    },
    /// Sign out and delete the persisted session
    Logout,
}

#[derive(Subcommand)]
pub enum LogCommands {
    /// List login records, oldest first
    List {
        /// Only show records for this email
        #[arg(long)]
        email: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
