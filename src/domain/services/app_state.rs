#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use super::actions::help_text;
use super::ConversationStore;
use super::Pagination;
use crate::domain::models::format_training_program;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::SenderType;
use crate::domain::models::SlashCommand;

pub const HISTORY_ALERT: &str = "메시지를 불러오는 중 문제가 발생했습니다.";
pub const OLDER_HISTORY_ALERT: &str = "이전 메시지를 불러오는 중 문제가 발생했습니다.";
pub const TRAINING_PROGRAM_ALERT: &str = "운동 프로그램을 불러오는 중 문제가 발생했습니다.";
pub const BUSY_NOTICE: &str = "AI가 응답을 생성 중입니다...";
pub const NOT_READY_NOTICE: &str = "대화를 불러오는 중입니다...";
pub const NO_MORE_NOTICE: &str = "더 이전 메시지가 없습니다.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// A failure the user should know about. Nothing is blocked by it.
    Alert(String),
    Info(String),
}

/// Everything the chat session owns. Only the chat loop mutates it, gateway calls
/// happen elsewhere and come back as events.
///
/// Guards:
/// - `waiting_for_backend` covers sends and training program fetches.
/// - `loading_history` covers the initial load and refreshes.
/// - `pagination` covers loading older messages.
#[derive(Default)]
pub struct AppState {
    pub store: ConversationStore,
    pub pagination: Pagination,
    pub loading_history: bool,
    pub waiting_for_backend: bool,
    notices: Vec<Notice>,
}

impl AppState {
    pub fn is_busy(&self) -> bool {
        return self.waiting_for_backend || self.loading_history || self.pagination.is_fetching();
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        return std::mem::take(&mut self.notices);
    }

    /// Loads history, used both for the first load and for refreshes. Returns whether
    /// a request was dispatched.
    pub fn load_history(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        if self.loading_history {
            return Ok(false);
        }

        self.loading_history = true;
        tx.send(Action::LoadHistory())?;

        return Ok(true);
    }

    /// Pages in older history. Rejected before the conversation has loaded, the first
    /// load replaces whatever the store holds.
    pub fn load_more(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        if !self.store.is_initialized() {
            self.notices.push(Notice::Info(NOT_READY_NOTICE.to_string()));
            return Ok(false);
        }

        if !self.pagination.has_more() {
            self.notices.push(Notice::Info(NO_MORE_NOTICE.to_string()));
            return Ok(false);
        }

        if let Some(page) = self.pagination.begin() {
            tx.send(Action::LoadOlderHistory(page))?;
            return Ok(true);
        }

        return Ok(false);
    }

    /// Shows the user's text right away and asks the assistant for a reply. Rejected
    /// while another send or program fetch is in flight, or before the conversation
    /// has loaded.
    pub fn submit_prompt(&mut self, text: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        if text.trim().is_empty() {
            return Ok(false);
        }

        if !self.store.is_initialized() {
            self.notices.push(Notice::Info(NOT_READY_NOTICE.to_string()));
            return Ok(false);
        }

        if self.waiting_for_backend {
            self.notices.push(Notice::Info(BUSY_NOTICE.to_string()));
            return Ok(false);
        }

        self.store
            .append_local(Message::local(SenderType::User, text));
        self.waiting_for_backend = true;
        tx.send(Action::SendMessage(text.to_string()))?;

        return Ok(true);
    }

    pub fn request_training_program(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        if !self.store.is_initialized() {
            self.notices.push(Notice::Info(NOT_READY_NOTICE.to_string()));
            return Ok(false);
        }

        if self.waiting_for_backend {
            self.notices.push(Notice::Info(BUSY_NOTICE.to_string()));
            return Ok(false);
        }

        self.waiting_for_backend = true;
        tx.send(Action::FetchTrainingProgram())?;

        return Ok(true);
    }

    /// Returns `(should_break, should_continue)`. `should_continue` means the input was
    /// a command and must not be sent to the assistant.
    pub fn handle_slash_commands(
        &mut self,
        input: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<(bool, bool)> {
        let mut should_break = false;
        let mut should_continue = false;

        if let Some(command) = SlashCommand::parse(input) {
            if command.is_quit() {
                should_break = true;
            } else if command.is_training_program() {
                self.request_training_program(tx)?;
                should_continue = true;
            } else if command.is_load_more() {
                self.load_more(tx)?;
                should_continue = true;
            } else if command.is_refresh() {
                self.load_history(tx)?;
                should_continue = true;
            } else if command.is_help() {
                self.notices.push(Notice::Info(help_text()));
                should_continue = true;
            }
        }

        return Ok((should_break, should_continue));
    }

    /// Applies a gateway outcome. Every outcome clears the guard that dispatched it.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::HistoryLoaded(res) => {
                self.loading_history = false;
                if res.is_err() {
                    self.notices.push(Notice::Alert(HISTORY_ALERT.to_string()));
                }
                if !self.store.apply_history(res) {
                    self.pagination.exhaust();
                }
            }
            Event::OlderHistoryLoaded(res) => match res {
                Ok(messages) => {
                    self.pagination.complete(Some(messages.len()));
                    self.store.merge_history(messages);
                }
                Err(err) => {
                    tracing::error!(error = ?err, "Error loading more messages");
                    self.pagination.complete(None);
                    self.notices
                        .push(Notice::Alert(OLDER_HISTORY_ALERT.to_string()));
                }
            },
            Event::AssistantReply(res) => {
                self.store.apply_reply(res);
                self.waiting_for_backend = false;
            }
            Event::TrainingProgramLoaded(res) => {
                self.waiting_for_backend = false;
                match res {
                    Ok(program) => {
                        let text = format_training_program(program.as_ref());
                        self.store
                            .append_local(Message::local(SenderType::Assistant, &text));
                    }
                    Err(err) => {
                        tracing::error!(error = ?err, "Error getting training program");
                        self.notices
                            .push(Notice::Alert(TRAINING_PROGRAM_ALERT.to_string()));
                    }
                }
            }
            Event::UserInput(_) | Event::UserInputClosed() => {}
        }
    }
}
