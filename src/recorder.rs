//! In-memory recording of a live chat session
//!
//! A `ChatSession` is created when a chat starts, receives one append per
//! inbound user message and one per outbound assistant response, and is
//! flushed to the [`SessionStore`] once when the chat ends.

use crate::error::Result;
use crate::storage::{count_user_messages, Message, SessionStore};
use uuid::Uuid;

/// Generate a new unique session identifier
///
/// # Examples
///
/// ```
/// use ragchat::recorder::new_session_id;
///
/// let id = new_session_id();
/// assert_eq!(id.len(), 36);
/// ```
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Transcript of a chat that has not been persisted yet
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: String,
    title: Option<String>,
    messages: Vec<Message>,
}

impl ChatSession {
    /// Start a session with a freshly generated id
    ///
    /// # Examples
    ///
    /// ```
    /// use ragchat::recorder::ChatSession;
    ///
    /// let mut session = ChatSession::new();
    /// session.push_user("You", "What does the handbook say about leave?");
    /// assert!(session.has_user_messages());
    /// ```
    pub fn new() -> Self {
        Self::with_id(new_session_id())
    }

    /// Start a session with an id supplied by the caller
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            messages: Vec::new(),
        }
    }

    /// Attach a user-supplied title; otherwise one is derived on save
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Session identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// User-supplied title, if any
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Messages in the order they were appended
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Record an inbound user message
    pub fn push_user(&mut self, author: impl Into<String>, content: impl Into<String>) -> &Message {
        self.push(Message::user(author, content))
    }

    /// Record an outbound assistant response
    pub fn push_assistant(
        &mut self,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> &Message {
        self.push(Message::assistant(author, content))
    }

    fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// Number of user turns recorded so far
    pub fn user_message_count(&self) -> usize {
        count_user_messages(&self.messages)
    }

    /// True once the user has said anything
    pub fn has_user_messages(&self) -> bool {
        self.messages.iter().any(Message::is_user)
    }

    /// Flush the session at chat end
    ///
    /// Pass `None` when history is disabled. Sessions without a user turn are
    /// never written.
    ///
    /// # Returns
    ///
    /// Returns whether a record was written
    ///
    /// # Errors
    ///
    /// Propagates write failures from [`SessionStore::save`]
    pub fn finish(&self, store: Option<&SessionStore>) -> Result<bool> {
        let Some(store) = store else {
            tracing::debug!(session_id = %self.id, "Chat history disabled, not saving session");
            return Ok(false);
        };

        if !self.has_user_messages() {
            tracing::debug!(session_id = %self.id, "Session has no user messages, not saving");
            return Ok(false);
        }

        store.save(&self.id, &self.messages, self.title.as_deref())?;
        Ok(true)
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
