#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use super::conversation::fetch_history;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::GatewayBox;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /program (/p) - Fetches your training program from your coach.
- /more (/m) - Loads older messages from the conversation history.
- /refresh (/r) - Fetches new messages without clearing the conversation.
- /quit /exit (/q) - Exit Coachbot.
- /help (/h) - Provides this help menu.

Anything else you type is sent to your coach. Only one message can be waiting for a reply at a time.
        "#;

    return text.trim().to_string();
}

async fn run_action(gateway: GatewayBox, action: Action) -> Event {
    match action {
        Action::LoadHistory() => {
            return Event::HistoryLoaded(fetch_history(gateway.as_ref()).await);
        }
        Action::LoadOlderHistory(page) => {
            return Event::OlderHistoryLoaded(gateway.list_messages(page).await);
        }
        Action::SendMessage(text) => {
            return Event::AssistantReply(gateway.send_message(&text).await);
        }
        Action::FetchTrainingProgram() => {
            return Event::TrainingProgramLoaded(gateway.training_program().await);
        }
    }
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs every action on its own task and reports the outcome as an event. Tasks are
    /// never aborted, a request in flight always completes. Returns once the action
    /// channel closes.
    pub async fn start(
        gateway: GatewayBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            tracing::debug!(action = ?action, "Dispatching action");

            let worker_tx = tx.clone();
            let worker_gateway = gateway.clone();
            tokio::spawn(async move {
                let event = run_action(worker_gateway, action).await;
                if worker_tx.send(event).is_err() {
                    tracing::warn!("Chat loop stopped before the gateway responded");
                }
            });
        }

        return Ok(());
    }
}
