use anyhow::Result;

use crate::chat::ChatController;
use crate::config::ClientConfig;
use crate::history::HistoryStore;
use crate::render::TerminalRender;
use sewchat_api::ChatClient;

/// Send a single message, print the reply, and exit.
///
/// The exchange goes through the same controller as the REPL, so it lands
/// in history like any other completed exchange.
pub async fn run_task_mode(config: ClientConfig, text: String) -> Result<()> {
    let mut client = ChatClient::new(config.api_url.clone());
    client.set_verbose(config.verbose);

    let history = HistoryStore::new(&config.history_file)?;
    let mut controller = ChatController::new(client);
    let mut render = TerminalRender;

    controller.submit(&text, &history, &mut render).await
}
