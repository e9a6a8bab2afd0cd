// Logging module - request/response logging and display helpers
pub mod request_logger;

use anyhow::{Context, Result};
use std::path::PathBuf;

pub use request_logger::{log_request, log_request_to_file, log_response, log_response_to_file};

/// Safely truncate a string to a maximum number of characters
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        // Reserve space for "..." suffix
        let trunc_chars = if max_chars >= 3 { max_chars - 3 } else { 0 };
        format!("{}...", s.chars().take(trunc_chars).collect::<String>())
    }
}

/// Get or create the base sewchat directory (~/.sewchat)
/// This is shared between logging and the default history location
pub fn get_sewchat_dir() -> Result<PathBuf> {
    let home_dir = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Failed to get home directory")?;

    let sewchat_dir = PathBuf::from(home_dir).join(".sewchat");

    // Create directory if it doesn't exist
    if !sewchat_dir.exists() {
        std::fs::create_dir_all(&sewchat_dir).context("Failed to create sewchat directory")?;
    }

    Ok(sewchat_dir)
}

/// Get or create the logs directory (~/.sewchat/logs)
pub fn get_logs_dir() -> Result<PathBuf> {
    let logs_dir = get_sewchat_dir()?.join("logs");

    // Create directory if it doesn't exist
    if !logs_dir.exists() {
        std::fs::create_dir_all(&logs_dir).context("Failed to create logs directory")?;
    }

    Ok(logs_dir)
}
