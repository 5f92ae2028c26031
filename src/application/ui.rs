use anyhow::Result;
use owo_colors::OwoColorize;
use owo_colors::Stream;
use tokio::io;
use tokio::sync::mpsc;

use super::render::paint_notice;
use super::render::Transcript;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;

const START_TEXT: &str = "메시지를 입력하세요. /help 로 명령어를 볼 수 있습니다.";

fn print_hint(text: &str) {
    println!(
        "{}",
        text.if_supports_color(Stream::Stdout, |e| return e.dimmed())
    );
}

fn flush(app_state: &mut AppState, transcript: &mut Transcript) {
    for line in transcript.update(app_state.store.messages()) {
        println!("{}", line.paint());
    }

    for notice in app_state.take_notices() {
        println!("{}", paint_notice(&notice));
    }
}

async fn start_loop(
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(io::stdin(), rx);
    let mut transcript = Transcript::default();
    let mut input_closed = false;

    app_state.load_history(&tx)?;
    print_hint(START_TEXT);

    while let Some(event) = events.next().await? {
        let was_waiting = app_state.waiting_for_backend;

        match event {
            Event::UserInput(text) => {
                let input = text.trim();
                if input.is_empty() {
                    continue;
                }

                let (should_break, should_continue) =
                    app_state.handle_slash_commands(input, &tx)?;
                if should_break {
                    break;
                }
                if !should_continue {
                    app_state.submit_prompt(input, &tx)?;
                }
            }
            Event::UserInputClosed() => {
                input_closed = true;
            }
            event => {
                app_state.handle_event(event);
            }
        }

        flush(app_state, &mut transcript);
        if !was_waiting && app_state.waiting_for_backend {
            print_hint("...");
        }

        if input_closed && !app_state.is_busy() {
            break;
        }
    }

    return Ok(());
}

/// Runs the interactive chat until the user quits or stdin closes. Work still in flight
/// when stdin closes is waited for, so piped input gets its replies printed.
pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut app_state = AppState::default();
    start_loop(&mut app_state, tx, rx).await?;

    tracing::debug!(
        messages = app_state.store.len(),
        unsynced = app_state
            .store
            .messages()
            .iter()
            .filter(|msg| return msg.is_local())
            .count(),
        page = app_state.pagination.page(),
        "Chat session ended"
    );

    return Ok(());
}
