//! Test utilities for ragchat
//!
//! This module provides common test utilities including temporary directory
//! management, test file creation, transcript builders and assertion helpers.

use crate::error::RagchatError;
use crate::storage::{Message, SessionStore};
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Create a session store rooted in a fresh temporary directory
///
/// The returned `TempDir` must outlive the store.
pub fn temp_store(max_sessions: usize) -> (SessionStore, TempDir) {
    let dir = temp_dir();
    let store = SessionStore::new(dir.path().join("chat_history"), max_sessions);
    (store, dir)
}

/// Build an alternating user/assistant transcript, one exchange per question
pub fn sample_transcript(questions: &[&str]) -> Vec<Message> {
    questions
        .iter()
        .flat_map(|q| {
            [
                Message::user("You", *q),
                Message::assistant("Assistant", format!("About {}", q)),
            ]
        })
        .collect()
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: Result<T, RagchatError>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "test.txt", "content");
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "content");
    }

    #[test]
    fn test_temp_store_is_rooted_in_temp_dir() {
        let (store, dir) = temp_store(5);
        assert!(store.root().starts_with(dir.path()));
        assert_eq!(store.max_sessions(), 5);
    }

    #[test]
    fn test_sample_transcript_alternates() {
        let messages = sample_transcript(&["a", "b"]);
        assert_eq!(messages.len(), 4);
        assert!(messages[0].is_user());
        assert!(!messages[1].is_user());
        assert_eq!(messages[2].content, "b");
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: Result<(), RagchatError> =
            Err(RagchatError::Config("test error message".to_string()));
        assert_error_contains(result, "test error");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        let result: Result<(), RagchatError> = Ok(());
        assert_error_contains(result, "error");
    }

    #[test]
    #[should_panic(expected = "does not contain")]
    fn test_assert_error_contains_wrong_message() {
        let result: Result<(), RagchatError> =
            Err(RagchatError::Config("different error".to_string()));
        assert_error_contains(result, "not present");
    }
}
