#[cfg(test)]
#[path = "render_test.rs"]
mod tests;

use std::fmt;

use owo_colors::OwoColorize;
use owo_colors::Stream;

use crate::domain::models::Message;
use crate::domain::models::SenderType;
use crate::domain::services::message_clock_time;
use crate::domain::services::message_date_label;
use crate::domain::services::message_needs_date_separator;
use crate::domain::services::Notice;

pub const REPRINT_TEXT: &str = "이전 메시지를 포함한 전체 대화";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Line {
    Reprint,
    DateSeparator(String),
    Message {
        time: String,
        sender: SenderType,
        text: String,
    },
    Continuation(String),
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Line::Reprint => return write!(f, "\n══ {REPRINT_TEXT} ══"),
            Line::DateSeparator(label) => return write!(f, "── {label} ──"),
            Line::Message { time, sender, text } => {
                return write!(f, "[{time}] {sender}: {text}");
            }
            Line::Continuation(text) => return write!(f, "    {text}"),
        }
    }
}

impl Line {
    /// Same text as `Display`, coloured when stdout supports it.
    pub fn paint(&self) -> String {
        match self {
            Line::Reprint | Line::DateSeparator(_) => {
                let text = self.to_string();
                return text
                    .if_supports_color(Stream::Stdout, |e| return e.dimmed())
                    .to_string();
            }
            Line::Message { time, sender, text } => {
                let time = format!("[{time}]");
                let label = sender.to_string();
                let label = if *sender == SenderType::User {
                    label
                        .if_supports_color(Stream::Stdout, |e| return e.bright_cyan())
                        .to_string()
                } else {
                    label
                        .if_supports_color(Stream::Stdout, |e| return e.bright_green())
                        .to_string()
                };

                return format!(
                    "{} {label}: {text}",
                    time.if_supports_color(Stream::Stdout, |e| return e.dimmed())
                );
            }
            Line::Continuation(_) => return self.to_string(),
        }
    }
}

pub fn paint_notice(notice: &Notice) -> String {
    match notice {
        Notice::Alert(text) => {
            return format!("⚠ {text}")
                .if_supports_color(Stream::Stdout, |e| return e.red())
                .to_string();
        }
        Notice::Info(text) => {
            return text
                .if_supports_color(Stream::Stdout, |e| return e.yellow())
                .to_string();
        }
    }
}

/// Lines for a single message, with a date separator first when it starts a new day.
pub fn message_lines(message: &Message, previous: Option<&Message>) -> Vec<Line> {
    let mut lines = vec![];
    if message_needs_date_separator(message, previous) {
        lines.push(Line::DateSeparator(message_date_label(message)));
    }

    let mut text_lines = message.content.lines();
    lines.push(Line::Message {
        time: message_clock_time(message),
        sender: message.sender_type,
        text: text_lines.next().unwrap_or_default().to_string(),
    });
    for text in text_lines {
        lines.push(Line::Continuation(text.to_string()));
    }

    return lines;
}

/// Tracks what has been printed so only new messages are written. When messages show
/// up above already printed ones the whole conversation is printed again.
#[derive(Default)]
pub struct Transcript {
    printed: Vec<String>,
}

impl Transcript {
    pub fn update(&mut self, messages: &[Message]) -> Vec<Line> {
        let is_append = self.printed.len() <= messages.len()
            && self
                .printed
                .iter()
                .zip(messages)
                .all(|(id, msg)| return id == &msg.id);

        let mut lines = vec![];
        let mut start = self.printed.len();
        if !is_append {
            lines.push(Line::Reprint);
            start = 0;
        }

        for (idx, message) in messages.iter().enumerate().skip(start) {
            let previous = idx.checked_sub(1).map(|prev| return &messages[prev]);
            lines.extend(message_lines(message, previous));
        }

        self.printed = messages.iter().map(|msg| return msg.id.clone()).collect();

        return lines;
    }
}
