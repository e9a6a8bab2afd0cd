use anyhow::Result;
use std::path::PathBuf;

use crate::cli::Cli;

/// Endpoint of the assistant server when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/chat";

/// Resolved runtime configuration: CLI flags win, then environment
/// variables (clap's env fallback), then defaults.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub history_file: PathBuf,
    pub verbose: bool,
}

impl ClientConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let api_url = cli
            .api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let history_file = match &cli.history_file {
            Some(path) => path.clone(),
            None => sewchat_logging::get_sewchat_dir()?.join("history.json"),
        };

        Ok(Self {
            api_url,
            history_file,
            verbose: cli.verbose,
        })
    }
}
