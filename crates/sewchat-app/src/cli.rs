use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for sewchat
#[derive(Parser, Debug)]
#[command(name = "sewchat")]
#[command(about = "Sewchat - terminal client for the AI sewing assistant chat API")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Chat API endpoint (e.g., http://localhost:5000/api/chat)
    #[arg(long, value_name = "URL", env = "SEWCHAT_API_URL")]
    pub api_url: Option<String>,

    /// Path to the chat history file (default: ~/.sewchat/history.json)
    #[arg(long, value_name = "PATH", env = "SEWCHAT_HISTORY_FILE")]
    pub history_file: Option<PathBuf>,

    /// Send a single message, print the reply, and exit
    #[arg(long, value_name = "TEXT")]
    pub task: Option<String>,

    /// Show HTTP request/response debug output
    #[arg(short, long)]
    pub verbose: bool,
}
