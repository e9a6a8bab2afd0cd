//! Sewchat Application Library
//!
//! Conversation controller, history store, and the terminal surfaces
//! around them.

// Re-export workspace crates
pub use sewchat_api::{self as api, ChatApiError, ChatClient};
pub use sewchat_logging::{self as logging, safe_truncate};
pub use sewchat_models::{self as models, Message, Role, SessionRecord};

// Local modules
pub mod app;
pub mod chat;
pub mod cli;
pub mod config;
pub mod history;
pub mod render;

// Re-exports from local modules
pub use app::{run_repl_mode, run_task_mode};
pub use chat::{ChatController, Conversation};
pub use cli::Cli;
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use history::{strip_markup, HistoryStore};
pub use render::{Render, TerminalRender};
