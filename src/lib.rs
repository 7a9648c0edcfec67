//! ragchat - chat session history library
//!
//! This library provides the session history component of a chat front-end
//! over a document question-answering engine: durable, bounded persistence
//! of conversations as JSON files with oldest-first retention eviction.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `storage`: File-backed session store, record types and title derivation
//! - `recorder`: In-memory chat session flushed to the store at chat end
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: CLI command handlers
//!
//! # Example
//!
//! ```no_run
//! use ragchat::{ChatSession, Config};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let store = config.history.store();
//!     let mut session = ChatSession::new();
//!     session.push_user("You", "Summarize the onboarding guide");
//!     session.push_assistant("Assistant", "The guide covers accounts, VPN and payroll.");
//!     session.finish(store.as_ref())?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod recorder;
pub mod storage;

// Re-export commonly used types
pub use config::{Config, HistoryConfig};
pub use error::{RagchatError, Result};
pub use recorder::ChatSession;
pub use storage::{LoadOutcome, Message, MessageKind, Session, SessionStore, SessionSummary};

#[cfg(test)]
pub mod test_utils;
