use std::io;
use thiserror::Error;

/// Every user-facing error message starts with this sentence.
pub const APOLOGY_PREFIX: &str = "Sorry, I encountered an error. ";

/// Classified failure of one chat request.
///
/// Classification order matters and matches the precedence of the message
/// table: timeout, offline, unreachable, HTTP status, application error,
/// then everything else.
#[derive(Debug, Error)]
pub enum ChatApiError {
    #[error("request timed out")]
    Timeout,
    #[error("no network connectivity")]
    Offline,
    #[error("could not connect to the server")]
    Unreachable,
    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),
    #[error("{0}")]
    Application(String),
    #[error("{0}")]
    Unknown(String),
}

impl ChatApiError {
    /// The full message rendered into the conversation when a request fails.
    pub fn user_message(&self) -> String {
        let suffix = match self {
            Self::Timeout => {
                "The request timed out. Please check if the server is running.".to_string()
            }
            Self::Offline => "Please check your internet connection.".to_string(),
            Self::Unreachable => "Could not connect to the server. Please make sure the server \
                                  is running on the expected port."
                .to_string(),
            Self::HttpStatus(status) => format!("HTTP error! status: {}", status),
            Self::Application(msg) | Self::Unknown(msg) => msg.clone(),
        };
        format!("{}{}", APOLOGY_PREFIX, suffix)
    }
}

impl From<reqwest::Error> for ChatApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout;
        }
        if err.is_connect() {
            if is_offline(&err) {
                return Self::Offline;
            }
            return Self::Unreachable;
        }
        Self::Unknown(err.to_string())
    }
}

/// Walk the error source chain for an OS-level "no network" condition.
fn is_offline(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            return matches!(
                io_err.kind(),
                io::ErrorKind::NetworkUnreachable
                    | io::ErrorKind::HostUnreachable
                    | io::ErrorKind::NetworkDown
            );
        }
        source = cause.source();
    }
    false
}
