use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::Message;
use super::TrainingProgram;

pub type GatewayBox = Arc<dyn Gateway>;

/// The remote assistant service. Every method maps to exactly one HTTP request, and
/// failures of any kind (transport, status, payload) are returned as errors for the
/// caller to turn into a safe default.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Makes sure the user owns a conversation thread, creating one server side when
    /// it's missing.
    async fn ensure_thread(&self) -> Result<()>;

    /// Fetches a page of message history. Page 1 is the most recent page, higher pages
    /// reach further back.
    async fn list_messages(&self, page: usize) -> Result<Vec<Message>>;

    /// Sends the user's text and returns the assistant's reply text.
    async fn send_message(&self, content: &str) -> Result<String>;

    /// Returns `None` when the user has no training program yet.
    async fn training_program(&self) -> Result<Option<TrainingProgram>>;
}
