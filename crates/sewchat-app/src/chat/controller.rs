use anyhow::Result;

use super::Conversation;
use crate::history::HistoryStore;
use crate::render::Render;
use sewchat_api::ChatClient;
use sewchat_models::{Message, Role, SessionRecord};

/// Owns the active conversation and the outbound request lifecycle.
///
/// One request at a time: `submit` borrows the controller mutably for the
/// whole lifecycle, so a second submission cannot start while one is
/// pending.
pub struct ChatController {
    client: ChatClient,
    conversation: Conversation,
}

impl ChatController {
    pub fn new(client: ChatClient) -> Self {
        Self {
            client,
            conversation: Conversation::new(),
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Handle one user submission end to end.
    ///
    /// Empty or whitespace-only input is a no-op: nothing rendered, nothing
    /// sent. Otherwise exactly one user message is appended up front and
    /// exactly one assistant message once the request settles — the reply
    /// text on success, the classified user-facing error string otherwise.
    pub async fn submit(
        &mut self,
        raw: &str,
        history: &HistoryStore,
        render: &mut dyn Render,
    ) -> Result<()> {
        let text = raw.trim().to_string();
        if text.is_empty() {
            return Ok(());
        }

        self.append(Message::user(text.as_str()), history, render)?;

        render.show_typing();
        let reply = self.client.send(&text).await;
        render.remove_typing();

        let content = match reply {
            Ok(text) => text,
            Err(err) => err.user_message(),
        };
        self.append(Message::assistant(content), history, render)?;

        Ok(())
    }

    /// Replace the active conversation with a stored session, re-rendering
    /// its messages in order. Whatever was on screen is discarded without
    /// being persisted first.
    pub fn load_session(&mut self, record: &SessionRecord, render: &mut dyn Render) {
        render.clear_log();
        self.conversation.clear();
        for message in &record.messages {
            render.message(message);
            self.conversation.push(message.clone());
        }
    }

    /// Discard the active conversation and start fresh.
    pub fn reset(&mut self, render: &mut dyn Render) {
        self.conversation.clear();
        render.clear_log();
    }

    /// Append and render one message. Every assistant append snapshots the
    /// full conversation into history as a new record.
    fn append(
        &mut self,
        message: Message,
        history: &HistoryStore,
        render: &mut dyn Render,
    ) -> Result<()> {
        let is_assistant = message.role == Role::Assistant;
        render.message(&message);
        self.conversation.push(message);

        if is_assistant {
            history.record_session(self.conversation.messages())?;
        }

        Ok(())
    }
}
