#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use std::collections::HashSet;

use anyhow::Result;

use super::pagination::PAGE_SIZE;
use crate::domain::models::Gateway;
use crate::domain::models::Message;
use crate::domain::models::SenderType;

/// Ensures a thread exists and fetches the most recent page of history, sorted oldest
/// first. A failure to ensure the thread is logged and otherwise ignored, the history
/// request decides whether the load worked.
pub async fn fetch_history(gateway: &dyn Gateway) -> Result<Vec<Message>> {
    if let Err(err) = gateway.ensure_thread().await {
        tracing::error!(error = ?err, "Failed to get or create assistant thread");
    }

    let mut messages = gateway.list_messages(1).await?;
    messages.sort_by_key(|msg| return msg.created_at);

    return Ok(messages);
}

/// The ordered messages of the active conversation. Messages are kept in
/// non-decreasing `created_at` order and ids are unique.
#[derive(Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
    initialized: bool,
}

impl ConversationStore {
    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn len(&self) -> usize {
        return self.messages.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.messages.is_empty();
    }

    pub fn is_initialized(&self) -> bool {
        return self.initialized;
    }

    pub fn contains(&self, id: &str) -> bool {
        return self.messages.iter().any(|msg| return msg.id == id);
    }

    /// Loads the first page of history through the gateway and applies it. Returns
    /// whether older history may still exist. A failed load is applied like an empty
    /// one, so the store is usable either way, and the error is handed back for the
    /// caller to report.
    pub async fn initialize(&mut self, gateway: &dyn Gateway) -> Result<bool> {
        match fetch_history(gateway).await {
            Ok(messages) => return Ok(self.apply_history(Ok(messages))),
            Err(err) => {
                tracing::error!(error = ?err, "Error loading messages");
                self.apply_history(Ok(vec![]));
                return Err(err);
            }
        }
    }

    /// Applies the outcome of a history load. The first load replaces the contents,
    /// falling back to the welcome message when the server has nothing or the request
    /// failed. Later loads (refreshes) only merge unseen messages and leave the store
    /// untouched on failure.
    ///
    /// Returns `false` when the result proves there is no older history to page in.
    pub fn apply_history(&mut self, res: Result<Vec<Message>>) -> bool {
        if !self.initialized {
            self.initialized = true;

            match res {
                Ok(messages) if !messages.is_empty() => {
                    let has_more = messages.len() >= PAGE_SIZE;
                    self.messages = vec![];
                    self.merge_history(messages);
                    return has_more;
                }
                Ok(_) => {
                    self.messages = vec![Message::welcome()];
                    return false;
                }
                Err(err) => {
                    tracing::error!(error = ?err, "Error loading messages");
                    self.messages = vec![Message::welcome()];
                    return false;
                }
            }
        }

        match res {
            Ok(messages) if !messages.is_empty() => {
                let has_more = messages.len() >= PAGE_SIZE;
                self.merge_history(messages);
                return has_more;
            }
            Ok(_) => return true,
            Err(err) => {
                tracing::error!(error = ?err, "Error refreshing messages");
                return true;
            }
        }
    }

    /// Adds every message whose id isn't in the store yet. Merging the same batch
    /// twice is a no-op. Returns the number of messages added.
    pub fn merge_history(&mut self, messages: Vec<Message>) -> usize {
        let mut seen = self
            .messages
            .iter()
            .map(|msg| return msg.id.to_string())
            .collect::<HashSet<String>>();

        let mut added = 0;
        for msg in messages {
            if !seen.insert(msg.id.to_string()) {
                continue;
            }
            self.insert_ordered(msg);
            added += 1;
        }

        return added;
    }

    /// Adds a message created on this device. Local messages are newer than anything
    /// already shown, so this lands at the tail.
    pub fn append_local(&mut self, msg: Message) {
        if self.contains(&msg.id) {
            tracing::warn!(id = %msg.id, "Dropping local message with duplicate id");
            return;
        }

        self.insert_ordered(msg);
    }

    /// Sends `user_text` to the assistant and appends its reply, or the apology
    /// message if the request failed in any way. Callers must not have another send
    /// in flight.
    pub async fn request_assistant_reply(
        &mut self,
        gateway: &dyn Gateway,
        user_text: &str,
    ) -> &Message {
        let res = gateway.send_message(user_text).await;
        return self.apply_reply(res);
    }

    pub fn apply_reply(&mut self, res: Result<String>) -> &Message {
        let msg = match res {
            Ok(text) => Message::local(SenderType::Assistant, &text),
            Err(err) => {
                tracing::error!(error = ?err, "Error sending message");
                Message::apology()
            }
        };

        // Fresh local ids never collide, so this skips the duplicate check.
        let idx = self.insert_ordered(msg);
        return &self.messages[idx];
    }

    fn insert_ordered(&mut self, msg: Message) -> usize {
        let idx = self
            .messages
            .partition_point(|existing| return existing.created_at <= msg.created_at);
        self.messages.insert(idx, msg);

        return idx;
    }
}
