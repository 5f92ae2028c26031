use anyhow::Result;

use super::Message;
use super::TrainingProgram;

#[derive(Debug)]
pub enum Event {
    AssistantReply(Result<String>),
    HistoryLoaded(Result<Vec<Message>>),
    OlderHistoryLoaded(Result<Vec<Message>>),
    TrainingProgramLoaded(Result<Option<TrainingProgram>>),
    UserInput(String),
    UserInputClosed(),
}
