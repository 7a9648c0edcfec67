use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message in a chat session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Inbound turn typed by the user
    UserMessage,
    /// Outbound response produced by the assistant
    AssistantMessage,
}

/// A single turn in a chat session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Whether the user or the assistant produced this turn
    #[serde(rename = "type")]
    pub kind: MessageKind,
    /// Message text
    #[serde(default)]
    pub content: String,
    /// When the message was produced
    #[serde(with = "iso8601")]
    pub timestamp: DateTime<Utc>,
    /// Display name of the author
    #[serde(default)]
    pub author: String,
}

impl Message {
    /// Create a user message stamped with the current instant
    pub fn user(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(MessageKind::UserMessage, author, content)
    }

    /// Create an assistant message stamped with the current instant
    pub fn assistant(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(MessageKind::AssistantMessage, author, content)
    }

    fn new(kind: MessageKind, author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            timestamp: Utc::now(),
            author: author.into(),
        }
    }

    /// True when this is an inbound user turn
    pub fn is_user(&self) -> bool {
        self.kind == MessageKind::UserMessage
    }
}

/// Number of user turns in a transcript
pub fn count_user_messages(messages: &[Message]) -> usize {
    messages.iter().filter(|m| m.is_user()).count()
}

/// A persisted conversation, exactly as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier and file stem of the record
    pub session_id: String,
    /// User-supplied or derived title
    pub title: String,
    /// When the record was last saved
    #[serde(with = "iso8601")]
    pub timestamp: DateTime<Utc>,
    /// Transcript in the order turns were appended
    pub messages: Vec<Message>,
    /// Number of user turns, computed when the record was saved
    #[serde(default)]
    pub message_count: usize,
}

impl Session {
    /// Build a record stamped with the current instant.
    ///
    /// `message_count` is always derived from `messages`.
    pub fn new(
        session_id: impl Into<String>,
        title: impl Into<String>,
        messages: Vec<Message>,
    ) -> Self {
        let message_count = count_user_messages(&messages);
        Self {
            session_id: session_id.into(),
            title: title.into(),
            timestamp: Utc::now(),
            messages,
            message_count,
        }
    }

    /// Listing projection of this record
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.session_id.clone(),
            title: self.title.clone(),
            timestamp: self.timestamp,
            message_count: self.message_count,
        }
    }
}

/// Lightweight view of a stored session used for listings
///
/// Deserializing a full record into this type skips the message bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Unique identifier for the session
    pub session_id: String,
    /// User-friendly title
    pub title: String,
    /// When the session was last saved
    #[serde(with = "iso8601")]
    pub timestamp: DateTime<Utc>,
    /// Number of user turns in the session
    #[serde(default)]
    pub message_count: usize,
}

/// Result of reading a single record, keeping corrupt and missing apart
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Record exists and parsed
    Found(Session),
    /// No record for the id
    Missing,
    /// A file exists but could not be read or parsed
    Corrupt {
        /// Underlying read or parse failure
        reason: String,
    },
}

impl LoadOutcome {
    /// Collapse to the plain found/not-found view
    pub fn into_session(self) -> Option<Session> {
        match self {
            LoadOutcome::Found(session) => Some(session),
            LoadOutcome::Missing | LoadOutcome::Corrupt { .. } => None,
        }
    }
}

/// Render an instant as fixed-width RFC 3339 (nanoseconds, `Z` suffix).
///
/// Fixed width keeps lexicographic order equal to chronological order.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parse an ISO-8601 instant.
///
/// Values without an offset are taken to be local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Serde adapter for timestamps in session records
pub mod iso8601 {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        ts: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid ISO-8601 timestamp: {}", raw)))
    }
}
