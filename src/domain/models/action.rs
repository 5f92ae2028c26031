/// Requests from the chat loop to the worker performing gateway calls.
#[derive(Debug)]
pub enum Action {
    FetchTrainingProgram(),
    LoadHistory(),
    LoadOlderHistory(usize),
    SendMessage(String),
}
