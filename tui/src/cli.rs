use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tasklist_core::DEFAULT_BASE_URL;

/// tasklist - terminal client for the todo list API
///
/// Runs the interactive list when no subcommand is given.
#[derive(Parser, Debug)]
#[command(name = "tasklist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the todo API, including the `/api` prefix
    #[arg(long, env = "TASKLIST_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "TASKLIST_TIMEOUT_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Log file used while the interactive list owns the terminal
    #[arg(long, env = "TASKLIST_LOG_FILE", default_value = "tasklist.log")]
    pub log_file: PathBuf,

    /// Log level (trace, debug, info, warn, error); RUST_LOG wins when set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Check that the API is up
    Health,

    /// Print the API welcome message
    Welcome,

    /// List todos, newest first
    #[command(alias = "ls")]
    List {
        /// Only completed todos
        #[arg(long, conflicts_with = "pending")]
        completed: bool,

        /// Only pending todos
        #[arg(long)]
        pending: bool,
    },

    /// Show one todo
    Get {
        id: i64,
    },

    /// Create a todo
    Add {
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Flip a todo between pending and completed
    Done {
        id: i64,
    },

    /// Delete a todo
    #[command(alias = "rm")]
    Delete {
        id: i64,
    },

    /// Delete every todo
    Clear {
        /// Required, there is no undo
        #[arg(long)]
        yes: bool,
    },

    /// Search todo titles
    Search {
        keyword: String,
    },
}
