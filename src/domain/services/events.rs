#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncRead;
use tokio::io::BufReader;
use tokio::io::Lines;
use tokio::sync::mpsc;

use crate::domain::models::Event;

/// Merges lines typed by the user with gateway outcomes into a single event stream.
pub struct EventsService<R> {
    input: Lines<BufReader<R>>,
    input_closed: bool,
    events: mpsc::UnboundedReceiver<Event>,
}

impl<R: AsyncRead + Unpin> EventsService<R> {
    pub fn new(input: R, events: mpsc::UnboundedReceiver<Event>) -> EventsService<R> {
        return EventsService {
            input: BufReader::new(input).lines(),
            input_closed: false,
            events,
        };
    }

    /// Waits for the next event. `UserInputClosed` is reported once, after that only
    /// gateway events are returned. `None` means both sources are exhausted.
    pub async fn next(&mut self) -> Result<Option<Event>> {
        tokio::select! {
            line = self.input.next_line(), if !self.input_closed => {
                match line? {
                    Some(text) => return Ok(Some(Event::UserInput(text))),
                    None => {
                        self.input_closed = true;
                        return Ok(Some(Event::UserInputClosed()));
                    }
                }
            }
            event = self.events.recv() => {
                return Ok(event);
            }
        }
    }
}
