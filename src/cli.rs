//! Command-line interface definition for ragchat
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for inspecting and maintaining chat history.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ragchat - chat history for a document question-answering assistant
///
/// Inspect, delete and prune the chat sessions persisted by the chat
/// front-end.
#[derive(Parser, Debug, Clone)]
#[command(name = "ragchat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the chat history directory
    #[arg(long)]
    pub storage_dir: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for ragchat
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Manage saved chat sessions
    History {
        /// History subcommand
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

/// History management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum HistoryCommand {
    /// List saved sessions, newest first
    List {
        /// Print summaries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the transcript of a session
    Show {
        /// Session identifier
        id: String,

        /// Print the full record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a saved session
    Delete {
        /// Session identifier
        id: String,
    },

    /// Evict the oldest sessions beyond the configured maximum
    Prune,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            storage_dir: None,
            command: Commands::History {
                command: HistoryCommand::List { json: false },
            },
        }
    }
}
