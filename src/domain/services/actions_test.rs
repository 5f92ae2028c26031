use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;

use super::ActionsService;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::GatewayBox;
use crate::domain::services::test_gateway::history_page;
use crate::domain::services::test_gateway::may_first;
use crate::domain::services::test_gateway::TestGateway;

async fn run_single(gateway: TestGateway, action: Action) -> Result<Event> {
    let gateway: GatewayBox = Arc::new(gateway);
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    action_tx.send(action)?;
    drop(action_tx);
    ActionsService::start(gateway, event_tx, &mut action_rx).await?;

    match event_rx.recv().await {
        Some(event) => return Ok(event),
        None => bail!("No event received"),
    }
}

#[tokio::test]
async fn it_loads_history() -> Result<()> {
    let gateway = TestGateway::default().with_history(Ok(history_page("srv", 2, may_first())));

    match run_single(gateway, Action::LoadHistory()).await? {
        Event::HistoryLoaded(Ok(messages)) => assert_eq!(messages.len(), 2),
        _ => bail!("Wrong enum"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_loads_older_history() -> Result<()> {
    let gateway = TestGateway::default().with_history(Ok(history_page("old", 20, may_first())));

    match run_single(gateway, Action::LoadOlderHistory(2)).await? {
        Event::OlderHistoryLoaded(Ok(messages)) => assert_eq!(messages.len(), 20),
        _ => bail!("Wrong enum"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_sends_messages() -> Result<()> {
    let gateway = TestGateway::default().with_reply(Ok("좋아요!".to_string()));

    match run_single(gateway, Action::SendMessage("안녕".to_string())).await? {
        Event::AssistantReply(Ok(text)) => assert_eq!(text, "좋아요!"),
        _ => bail!("Wrong enum"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_reports_send_failures() -> Result<()> {
    let gateway = TestGateway::default();

    match run_single(gateway, Action::SendMessage("안녕".to_string())).await? {
        Event::AssistantReply(res) => assert!(res.is_err()),
        _ => bail!("Wrong enum"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_fetches_training_programs() -> Result<()> {
    let gateway = TestGateway::default();

    match run_single(gateway, Action::FetchTrainingProgram()).await? {
        Event::TrainingProgramLoaded(Ok(program)) => assert!(program.is_none()),
        _ => bail!("Wrong enum"),
    }

    return Ok(());
}
