use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use ragchat::storage::{Message, SessionStore};

#[allow(dead_code)]
pub fn create_temp_store(max_sessions: usize) -> (SessionStore, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let store = SessionStore::new(tmp.path().join("chat_history"), max_sessions);
    (store, tmp)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

#[allow(dead_code)]
pub fn exchange(question: &str, answer: &str) -> Vec<Message> {
    vec![
        Message::user("You", question),
        Message::assistant("Assistant", answer),
    ]
}
