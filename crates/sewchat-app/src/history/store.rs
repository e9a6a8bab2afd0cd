use anyhow::{Context, Result};
use chrono::{Local, Utc};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use sewchat_models::{Message, SessionRecord};

/// File-backed store of chat sessions, most recent first.
///
/// The whole history lives in one JSON file holding an array of
/// `SessionRecord`. Records are snapshots: re-recording a growing
/// conversation prepends a new record instead of updating the last one.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create history directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot the conversation as a new record at the front of the list.
    pub fn record_session(&self, messages: &[Message]) -> Result<SessionRecord> {
        let mut sessions = self.sessions();

        let record = SessionRecord {
            id: Utc::now().timestamp_millis(),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            messages: messages.to_vec(),
        };

        sessions.insert(0, record.clone());
        self.write(&sessions)?;

        Ok(record)
    }

    /// All persisted records, most recent first.
    ///
    /// A missing file is an empty history; an unreadable or unparsable one
    /// degrades to empty with a warning rather than failing the caller.
    pub fn sessions(&self) -> Vec<SessionRecord> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str(&json) {
            Ok(sessions) => sessions,
            Err(e) => {
                eprintln!(
                    "{} Ignoring corrupt history file {}: {}",
                    "⚠️".yellow(),
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Short summary of a record built from its first two messages, markup
    /// stripped for display only. Stored content keeps the markup.
    pub fn preview(record: &SessionRecord) -> String {
        record
            .messages
            .iter()
            .take(2)
            .map(|msg| {
                format!(
                    "{}: {}",
                    msg.role.display_name(),
                    strip_markup(&msg.content)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Erase all persisted records.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).with_context(|| {
                format!("Failed to delete history file: {}", self.path.display())
            })?;
        }
        Ok(())
    }

    fn write(&self, sessions: &[SessionRecord]) -> Result<()> {
        let json =
            serde_json::to_string_pretty(sessions).context("Failed to serialize chat history")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write chat history to {}", self.path.display()))?;

        Ok(())
    }
}

/// Reduce markup-bearing content to plain text: tags dropped, the common
/// entities decoded. `&amp;` goes last so entity names inside it survive.
pub fn strip_markup(content: &str) -> String {
    let mut text = String::with_capacity(content.len());
    let mut in_tag = false;

    for ch in content.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }

    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}
