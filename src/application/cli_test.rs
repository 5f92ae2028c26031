use anyhow::anyhow;
use anyhow::Result;
use test_utils::training_program_fixture;

use super::ask;
use super::build;
use super::open_conversation;
use super::training_program;
use crate::configuration::ConfigKey;
use crate::domain::models::SenderType;
use crate::domain::models::TrainingProgram;
use crate::domain::models::APOLOGY_TEXT;
use crate::domain::models::WELCOME_TEXT;
use crate::domain::services::test_gateway::history_page;
use crate::domain::services::test_gateway::may_first;
use crate::domain::services::test_gateway::TestGateway;
use crate::domain::services::Notice;
use crate::domain::services::HISTORY_ALERT;
use crate::domain::services::TRAINING_PROGRAM_ALERT;

#[test]
fn it_builds_a_valid_command() {
    build().debug_assert();
}

#[test]
fn it_parses_rest_arguments() -> Result<()> {
    let matches =
        build().try_get_matches_from(vec!["coachbot", "rest", "--seconds", "90", "--set", "2"])?;
    let (name, rest_matches) = matches.subcommand().unwrap();

    assert_eq!(name, "rest");
    assert_eq!(rest_matches.get_one::<u64>("seconds"), Some(&90));
    assert_eq!(rest_matches.get_one::<u32>("set"), Some(&2));
    assert_eq!(rest_matches.get_one::<u32>("total-sets"), None);

    return Ok(());
}

#[test]
fn it_rejects_zero_second_rests() {
    let res = build().try_get_matches_from(vec!["coachbot", "rest", "--seconds", "0"]);
    assert!(res.is_err());
}

#[test]
fn it_requires_a_token_to_login() {
    let res = build().try_get_matches_from(vec!["coachbot", "login"]);
    assert!(res.is_err());
}

#[test]
fn it_requires_text_to_ask() {
    let res = build().try_get_matches_from(vec!["coachbot", "ask"]);
    assert!(res.is_err());
}

#[test]
fn it_accepts_global_flags_after_subcommands() -> Result<()> {
    let matches = build().try_get_matches_from(vec![
        "coachbot",
        "ask",
        "오늘 뭐 해?",
        "--api-base-url",
        "http://127.0.0.1:9000",
    ])?;
    let (_, ask_matches) = matches.subcommand().unwrap();

    assert_eq!(
        ask_matches.get_one::<String>(&ConfigKey::ApiBaseURL.to_string()),
        Some(&"http://127.0.0.1:9000".to_string())
    );
    assert_eq!(
        ask_matches.get_one::<String>("text"),
        Some(&"오늘 뭐 해?".to_string())
    );

    return Ok(());
}

#[tokio::test]
async fn it_opens_the_conversation() {
    let gateway = TestGateway::default().with_history(Ok(history_page("srv", 3, may_first())));
    let (store, notice) = open_conversation(&gateway).await;

    assert!(notice.is_none());
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn it_welcomes_and_alerts_when_history_fails() {
    let gateway = TestGateway::default().with_history(Err(anyhow!("502 Bad Gateway")));
    let (store, notice) = open_conversation(&gateway).await;

    assert_eq!(notice, Some(Notice::Alert(HISTORY_ALERT.to_string())));
    assert_eq!(store.len(), 1);
    assert_eq!(store.messages()[0].content, WELCOME_TEXT);
}

#[tokio::test]
async fn it_asks_even_when_history_fails() -> Result<()> {
    let gateway = TestGateway::default()
        .with_history(Err(anyhow!("connection refused")))
        .with_reply(Ok("하루 3세트면 충분해요.".to_string()));

    let (notice, reply) = ask(&gateway, " 몇 세트 할까? ").await?;

    assert_eq!(notice, Some(Notice::Alert(HISTORY_ALERT.to_string())));
    assert_eq!(reply.sender_type, SenderType::Assistant);
    assert_eq!(reply.content, "하루 3세트면 충분해요.");
    assert_eq!(
        gateway.calls(),
        vec!["ensure_thread", "list_messages:1", "send_message:몇 세트 할까?"]
    );

    return Ok(());
}

#[tokio::test]
async fn it_answers_with_an_apology_when_the_reply_fails() -> Result<()> {
    let gateway = TestGateway::default().with_history(Ok(history_page("srv", 2, may_first())));

    let (notice, reply) = ask(&gateway, "hello").await?;

    assert!(notice.is_none());
    assert_eq!(reply.content, APOLOGY_TEXT);

    return Ok(());
}

#[tokio::test]
async fn it_refuses_blank_questions() {
    let gateway = TestGateway::default();

    assert!(ask(&gateway, "   ").await.is_err());
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn it_formats_the_training_program() -> Result<()> {
    let program: TrainingProgram = serde_json::from_str(training_program_fixture())?;
    let gateway = TestGateway::default().with_program(Ok(Some(program.clone())));

    let (notice, text) = training_program(&gateway).await;

    assert!(notice.is_none());
    assert_eq!(text, program.format());

    return Ok(());
}

#[tokio::test]
async fn it_alerts_when_the_training_program_fails() {
    let gateway = TestGateway::default().with_program(Err(anyhow!("401 Unauthorized")));

    let (notice, text) = training_program(&gateway).await;

    assert_eq!(notice, Some(Notice::Alert(TRAINING_PROGRAM_ALERT.to_string())));
    assert!(text.is_empty());
}
