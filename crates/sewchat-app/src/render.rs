use colored::Colorize;
use std::io::Write;

use sewchat_models::{Message, Role};

/// Rendering surface for the conversation log.
///
/// The controller talks to this instead of the terminal directly; tests
/// substitute a recorder.
pub trait Render {
    /// Append one message to the log.
    fn message(&mut self, message: &Message);

    /// Show the transient typing placeholder. Always removed before the
    /// next append.
    fn show_typing(&mut self);

    fn remove_typing(&mut self);

    /// Wipe the log (session load, reset).
    fn clear_log(&mut self);
}

/// Renders the conversation to the terminal.
#[derive(Debug, Default)]
pub struct TerminalRender;

impl Render for TerminalRender {
    fn message(&mut self, message: &Message) {
        match message.role {
            Role::User => {
                println!("{} {}", "You:".bright_green().bold(), message.content)
            }
            Role::Assistant => {
                println!("{} {}", "Assistant:".bright_cyan().bold(), message.content)
            }
        }
    }

    fn show_typing(&mut self) {
        print!("{}", "Assistant is typing...".bright_black());
        let _ = std::io::stdout().flush();
    }

    fn remove_typing(&mut self) {
        // Erase the typing line in place.
        print!("\r\x1b[2K");
        let _ = std::io::stdout().flush();
    }

    fn clear_log(&mut self) {
        print!("\x1b[2J\x1b[H");
        let _ = std::io::stdout().flush();
    }
}
