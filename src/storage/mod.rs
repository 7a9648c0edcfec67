use crate::config::HistoryConfig;
use crate::error::{RagchatError, Result};
use anyhow::Context;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub mod title;
pub mod types;
pub use title::derive_title;
pub use types::{count_user_messages, LoadOutcome, Message, MessageKind, Session, SessionSummary};

/// File extension of session records
const RECORD_EXTENSION: &str = "json";

/// File-backed storage for chat session history
///
/// Each session lives in `<root>/<session_id>.json`. The store keeps no
/// in-memory state beyond its root and retention cap, so it can be shared by
/// reference between tasks.
#[derive(Debug, Clone)]
pub struct SessionStore {
    root: PathBuf,
    max_sessions: usize,
}

impl SessionStore {
    /// Create a store rooted at `root` that retains at most `max_sessions`.
    ///
    /// The directory is created lazily on the first save.
    ///
    /// # Examples
    ///
    /// ```
    /// use ragchat::storage::SessionStore;
    ///
    /// let store = SessionStore::new("./chat_history", 50);
    /// assert_eq!(store.max_sessions(), 50);
    /// ```
    pub fn new<P: Into<PathBuf>>(root: P, max_sessions: usize) -> Self {
        Self {
            root: root.into(),
            max_sessions,
        }
    }

    /// Create a store from the history section of the configuration
    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::new(config.storage_dir.clone(), config.max_sessions)
    }

    /// Directory holding the session records
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of sessions kept by retention eviction
    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    /// Save a session, replacing any record with the same id
    ///
    /// When `title` is absent or blank it is derived from the first user
    /// message. Retention eviction runs after the record is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the id cannot name a file, or if creating the
    /// storage directory or writing the record fails.
    pub fn save(&self, session_id: &str, messages: &[Message], title: Option<&str>) -> Result<()> {
        validate_session_id(session_id)?;

        let title = match title {
            Some(t) if !t.trim().is_empty() => t.to_string(),
            _ => derive_title(messages),
        };

        let session = Session::new(session_id, title, messages.to_vec());
        self.write_record(&session)?;

        tracing::debug!(
            session_id,
            messages = session.messages.len(),
            user_turns = session.message_count,
            "Saved chat session"
        );

        self.enforce_retention();
        Ok(())
    }

    /// Load a session by id
    ///
    /// Missing and unreadable records both yield `None`. Use
    /// [`SessionStore::load_detailed`] to tell them apart.
    pub fn load(&self, session_id: &str) -> Option<Session> {
        match self.load_detailed(session_id) {
            LoadOutcome::Corrupt { reason } => {
                tracing::warn!(session_id, %reason, "Ignoring unreadable chat session");
                None
            }
            outcome => outcome.into_session(),
        }
    }

    /// Load a session by id, reporting corrupt records separately
    pub fn load_detailed(&self, session_id: &str) -> LoadOutcome {
        if validate_session_id(session_id).is_err() {
            return LoadOutcome::Missing;
        }

        match read_record(&self.record_path(session_id)) {
            Ok(session) => LoadOutcome::Found(session),
            Err(RagchatError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                LoadOutcome::Missing
            }
            Err(e) => LoadOutcome::Corrupt {
                reason: e.to_string(),
            },
        }
    }

    /// List stored sessions, newest first
    ///
    /// A record is listed only if [`SessionStore::load`] would return it.
    /// Records that fail to parse are skipped, and a missing storage
    /// directory yields an empty list.
    pub fn list(&self) -> Vec<SessionSummary> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(root = %self.root.display(), error = %e, "Failed to read history directory");
                }
                return Vec::new();
            }
        };

        let mut sessions: Vec<SessionSummary> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| is_record_file(path))
            .filter_map(|path| read_summary(&path))
            .collect();

        sessions.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| a.session_id.cmp(&b.session_id))
        });
        sessions
    }

    /// Delete a session record
    ///
    /// Returns `true` only if a record existed and was removed.
    pub fn delete(&self, session_id: &str) -> bool {
        if validate_session_id(session_id).is_err() {
            return false;
        }

        let path = self.record_path(session_id);
        if !path.exists() {
            return false;
        }

        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(session_id, "Deleted chat session");
                true
            }
            Err(e) => {
                tracing::warn!(session_id, error = %e, "Failed to delete chat session");
                false
            }
        }
    }

    /// Keep the `max_sessions` newest records and delete the rest, oldest first
    ///
    /// Returns the number of sessions removed.
    pub fn enforce_retention(&self) -> usize {
        let sessions = self.list();
        if sessions.len() <= self.max_sessions {
            return 0;
        }

        let evicted = sessions[self.max_sessions..]
            .iter()
            .rev()
            .filter(|s| self.delete(&s.session_id))
            .count();

        tracing::info!(
            evicted,
            kept = self.max_sessions,
            "Evicted old chat sessions"
        );
        evicted
    }

    fn write_record(&self, session: &Session) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create history directory {}", self.root.display()))
            .map_err(|e| RagchatError::Storage(format!("{:#}", e)))?;

        let json = serde_json::to_string_pretty(session)
            .context("Failed to serialize session")
            .map_err(|e| RagchatError::Storage(format!("{:#}", e)))?;

        let temp_path = self.temp_path(&session.session_id);
        let final_path = self.record_path(&session.session_id);
        if let Err(e) = write_atomically(&temp_path, &final_path, &json) {
            let _ = fs::remove_file(&temp_path);
            return Err(RagchatError::Storage(format!(
                "Failed to write session {}: {}",
                session.session_id, e
            ))
            .into());
        }

        Ok(())
    }

    fn record_path(&self, session_id: &str) -> PathBuf {
        self.root.join(format!("{}.{}", session_id, RECORD_EXTENSION))
    }

    /// Unique per write so concurrent saves of one id never share a file
    fn temp_path(&self, session_id: &str) -> PathBuf {
        self.root.join(format!(
            ".{}.{}.{}.tmp",
            session_id,
            RECORD_EXTENSION,
            Uuid::new_v4().simple()
        ))
    }
}

/// Check that a session id can be used as a record file name
pub fn validate_session_id(session_id: &str) -> std::result::Result<(), RagchatError> {
    if session_id.is_empty()
        || session_id == "."
        || session_id == ".."
        || session_id.contains(['/', '\\', '\0'])
    {
        return Err(RagchatError::InvalidSessionId(session_id.to_string()));
    }
    Ok(())
}

fn write_atomically(temp_path: &Path, final_path: &Path, contents: &str) -> io::Result<()> {
    {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(temp_path)?;
        file.write_all(format!("{}\n", contents).as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(temp_path, final_path)
}

fn is_record_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(RECORD_EXTENSION) && path.is_file()
}

fn read_record(path: &Path) -> std::result::Result<Session, RagchatError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn read_summary(path: &Path) -> Option<SessionSummary> {
    match read_record(path) {
        Ok(session) => Some(session.summary()),
        Err(reason) => {
            tracing::debug!(path = %path.display(), %reason, "Skipping unreadable session record");
            None
        }
    }
}
