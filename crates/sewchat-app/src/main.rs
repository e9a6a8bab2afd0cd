use anyhow::Result;
use clap::Parser;

use sewchat::app::{run_repl_mode, run_task_mode};
use sewchat::cli::Cli;
use sewchat::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ClientConfig::from_cli(&cli)?;

    if let Some(task_text) = cli.task.clone() {
        return run_task_mode(config, task_text).await;
    }

    run_repl_mode(config).await
}
