use crate::cli::HistoryCommand;
use crate::config::Config;
use crate::error::{RagchatError, Result};
use crate::storage::{LoadOutcome, MessageKind, Session, SessionStore, SessionSummary};
use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use prettytable::{format, Table};

/// Longest title shown in the list table, in characters
const LIST_TITLE_WIDTH: usize = 40;

/// Handle history commands
///
/// Does nothing beyond a notice when history is disabled in the configuration.
pub fn handle_history(config: &Config, command: HistoryCommand) -> Result<()> {
    let Some(store) = config.history.store() else {
        println!(
            "{}",
            "Chat history is disabled (history.enabled = false).".yellow()
        );
        return Ok(());
    };

    tracing::debug!(root = %store.root().display(), "Using chat history directory");

    match command {
        HistoryCommand::List { json } => list_sessions(&store, json),
        HistoryCommand::Show { id, json } => show_session(&store, &id, json),
        HistoryCommand::Delete { id } => {
            delete_session(&store, &id);
            Ok(())
        }
        HistoryCommand::Prune => {
            let evicted = store.enforce_retention();
            println!(
                "{}",
                format!(
                    "Pruned {} session(s); keeping at most {}.",
                    evicted,
                    store.max_sessions()
                )
                .green()
            );
            Ok(())
        }
    }
}

fn list_sessions(store: &SessionStore, json: bool) -> Result<()> {
    let sessions = store.list();

    if json {
        let json = serde_json::to_string_pretty(&sessions).map_err(RagchatError::from)?;
        println!("{}", json);
        return Ok(());
    }

    if sessions.is_empty() {
        println!("{}", "No chat history found.".yellow());
        return Ok(());
    }

    println!("\nChat History:");
    render_session_table(&sessions).printstd();
    println!();
    println!(
        "Use {} to view a session.",
        "ragchat history show <ID>".cyan()
    );
    println!();
    Ok(())
}

fn show_session(store: &SessionStore, id: &str, json: bool) -> Result<()> {
    let session = match store.load_detailed(id) {
        LoadOutcome::Found(session) => session,
        LoadOutcome::Missing => return Err(RagchatError::SessionNotFound(id.to_string()).into()),
        LoadOutcome::Corrupt { reason } => {
            return Err(RagchatError::Storage(format!(
                "Session {} exists but could not be read: {}",
                id, reason
            ))
            .into())
        }
    };

    if json {
        let json = serde_json::to_string_pretty(&session).map_err(RagchatError::from)?;
        println!("{}", json);
    } else {
        print!("{}", render_transcript(&session));
    }
    Ok(())
}

fn delete_session(store: &SessionStore, id: &str) {
    if store.delete(id) {
        println!("{}", format!("Deleted session {}", id).green());
    } else {
        println!("{}", format!("No session found with id {}", id).yellow());
    }
}

/// Build the table printed by `history list`
pub fn render_session_table(sessions: &[SessionSummary]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "ID".bold(),
        "Title".bold(),
        "Messages".bold(),
        "Saved".bold()
    ]);

    for session in sessions {
        table.add_row(prettytable::row![
            session.session_id.cyan(),
            shorten(&session.title, LIST_TITLE_WIDTH),
            session.message_count,
            local_minutes(&session.timestamp)
        ]);
    }

    table
}

/// Render a stored session as a readable transcript
pub fn render_transcript(session: &Session) -> String {
    let mut out = format!(
        "{}\n{} {}  {} {}  {} {}\n\n",
        session.title.bold(),
        "id:".dimmed(),
        session.session_id,
        "saved:".dimmed(),
        local_minutes(&session.timestamp),
        "questions:".dimmed(),
        session.message_count
    );

    for message in &session.messages {
        let author = match message.kind {
            MessageKind::UserMessage => message.author.cyan(),
            MessageKind::AssistantMessage => message.author.green(),
        };
        out.push_str(&format!(
            "[{}] {}: {}\n",
            local_minutes(&message.timestamp),
            author,
            message.content
        ));
    }

    out
}

fn local_minutes(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn shorten(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let head: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Message;
    use crate::test_utils::{sample_transcript, temp_store};

    #[test]
    fn test_shorten_respects_char_width() {
        assert_eq!(shorten("short", 40), "short");
        let long = "ü".repeat(45);
        let shortened = shorten(&long, 40);
        assert_eq!(shortened.chars().count(), 40);
        assert!(shortened.ends_with("..."));
    }

    #[test]
    fn test_render_transcript_lists_messages_in_order() {
        let session = Session::new(
            "s1",
            "Leave policy",
            vec![
                Message::user("Alice", "How many vacation days?"),
                Message::assistant("Assistant", "Twenty-five."),
            ],
        );

        let text = render_transcript(&session);
        let question = text.find("How many vacation days?").unwrap();
        let answer = text.find("Twenty-five.").unwrap();
        assert!(question < answer);
        assert!(text.contains("Leave policy"));
        assert!(text.contains("Alice"));
    }

    #[test]
    fn test_render_session_table_has_row_per_session() {
        let (store, _dir) = temp_store(10);
        store
            .save("a", &sample_transcript(&["one"]), None)
            .unwrap();
        store
            .save("b", &sample_transcript(&["two"]), None)
            .unwrap();

        let table = render_session_table(&store.list());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_show_missing_session_is_not_found() {
        let (store, _dir) = temp_store(10);
        let err = show_session(&store, "nope", false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RagchatError>(),
            Some(RagchatError::SessionNotFound(_))
        ));
    }

    #[test]
    fn test_show_corrupt_session_is_storage_error() {
        let (store, _dir) = temp_store(10);
        std::fs::create_dir_all(store.root()).unwrap();
        std::fs::write(store.root().join("bad.json"), "nope").unwrap();

        let err = show_session(&store, "bad", true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RagchatError>(),
            Some(RagchatError::Storage(_))
        ));
    }

    #[test]
    fn test_handle_history_disabled_does_not_touch_storage() {
        let (store, _dir) = temp_store(10);
        let mut config = Config::default();
        config.history.enabled = false;
        config.history.storage_dir = store.root().to_path_buf();

        handle_history(&config, HistoryCommand::Prune).unwrap();
        assert!(!store.root().exists());
    }

    #[test]
    fn test_handle_history_prune_applies_configured_cap() {
        let (store, _dir) = temp_store(10);
        for id in ["a", "b", "c"] {
            store.save(id, &sample_transcript(&[id]), None).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(10));
        }

        let mut config = Config::default();
        config.history.storage_dir = store.root().to_path_buf();
        config.history.max_sessions = 1;

        handle_history(&config, HistoryCommand::Prune).unwrap();
        let ids: Vec<String> = store.list().into_iter().map(|s| s.session_id).collect();
        assert_eq!(ids, vec!["c"]);
    }
}
