use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::chat::ChatController;
use crate::config::ClientConfig;
use crate::history::HistoryStore;
use crate::render::{Render, TerminalRender};
use sewchat_api::ChatClient;
use sewchat_logging::safe_truncate;

const PREVIEW_WIDTH: usize = 80;

/// Run interactive REPL mode
pub async fn run_repl_mode(config: ClientConfig) -> Result<()> {
    println!("{}", "🧵 Sewchat - AI Sewing Assistant".bright_cyan().bold());
    println!("{}", format!("Endpoint: {}", config.api_url).bright_black());
    println!(
        "{}",
        "Type 'exit' or 'quit' to exit, or '/help' for history commands\n".bright_black()
    );

    let mut client = ChatClient::new(config.api_url.clone());
    client.set_verbose(config.verbose);

    let history = HistoryStore::new(&config.history_file)?;
    let mut controller = ChatController::new(client);
    let mut render = TerminalRender;

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline(&format!("{} ", "You:".bright_green().bold()));

        match readline {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                if line == "exit" || line == "quit" {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }

                if line == "/help" {
                    print_help();
                    continue;
                }

                if line == "/history" {
                    show_history(&history);
                    continue;
                }

                if let Some(index) = line.strip_prefix("/load ") {
                    load_session(index.trim(), &history, &mut controller, &mut render);
                    continue;
                }

                if line == "/new" {
                    controller.reset(&mut render);
                    println!("{}", "✨ Started a new conversation".bright_cyan());
                    continue;
                }

                if line == "/clear-history" {
                    if let Err(e) = clear_history(&mut rl, &history) {
                        eprintln!("{} Failed to clear history: {}", "❌".bright_red(), e);
                    }
                    continue;
                }

                let _ = rl.add_history_entry(line);

                if let Err(e) = controller.submit(line, &history, &mut render).await {
                    // The reply is already on screen; only the snapshot failed.
                    eprintln!("{} Failed to save chat history: {}", "⚠️".yellow(), e);
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("Input error: {}", err);
                break;
            }
        }
    }

    Ok(())
}

fn print_help() {
    println!("{} History commands:", "📜".bright_cyan());
    println!("  /history            - List saved sessions with previews");
    println!("  /load <n>           - Replace the conversation with session n");
    println!("  /new                - Start a fresh conversation");
    println!("  /clear-history      - Erase all saved sessions (asks first)");
    println!("  /help               - Show this help");
}

fn show_history(history: &HistoryStore) {
    let sessions = history.sessions();

    if sessions.is_empty() {
        println!("{}", "No chat history available".bright_black());
        return;
    }

    println!("{} Chat history (most recent first):", "📜".bright_cyan());
    for (index, session) in sessions.iter().enumerate() {
        println!(
            "{} {}",
            format!("[{}]", index + 1).bright_magenta(),
            session.timestamp.bright_black()
        );
        for line in HistoryStore::preview(session).lines() {
            println!("    {}", safe_truncate(line, PREVIEW_WIDTH));
        }
    }
    println!("{}", "Use '/load <n>' to restore a session".bright_black());
}

fn load_session(
    index: &str,
    history: &HistoryStore,
    controller: &mut ChatController,
    render: &mut dyn Render,
) {
    let sessions = history.sessions();

    let selected = match index.parse::<usize>() {
        Ok(n) if n >= 1 && n <= sessions.len() => &sessions[n - 1],
        _ => {
            eprintln!(
                "{} No such session: '{}'. Use '/history' to list sessions.",
                "❌".bright_red(),
                index
            );
            return;
        }
    };

    controller.load_session(selected, render);
    println!(
        "{}",
        format!("📂 Restored session from {}", selected.timestamp).bright_cyan()
    );
}

fn clear_history(rl: &mut DefaultEditor, history: &HistoryStore) -> Result<()> {
    let answer = rl.readline("Are you sure you want to clear all chat history? [y/N] ")?;

    if answer.trim().eq_ignore_ascii_case("y") {
        history.clear()?;
        println!("{}", "🗑️  Chat history cleared".bright_cyan());
    }

    Ok(())
}
