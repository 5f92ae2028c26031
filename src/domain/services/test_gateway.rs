use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;

use crate::domain::models::Gateway;
use crate::domain::models::Message;
use crate::domain::models::SenderType;
use crate::domain::models::TrainingProgram;

/// In-memory gateway serving queued responses in order. An empty queue answers with
/// an empty history, an error reply and no program.
#[derive(Default)]
pub struct TestGateway {
    fail_thread: bool,
    history: Mutex<VecDeque<Result<Vec<Message>>>>,
    replies: Mutex<VecDeque<Result<String>>>,
    programs: Mutex<VecDeque<Result<Option<TrainingProgram>>>>,
    calls: Mutex<Vec<String>>,
}

impl TestGateway {
    pub fn with_failing_thread(mut self) -> TestGateway {
        self.fail_thread = true;
        return self;
    }

    pub fn with_history(self, res: Result<Vec<Message>>) -> TestGateway {
        self.history.lock().unwrap().push_back(res);
        return self;
    }

    pub fn with_reply(self, res: Result<String>) -> TestGateway {
        self.replies.lock().unwrap().push_back(res);
        return self;
    }

    pub fn with_program(self, res: Result<Option<TrainingProgram>>) -> TestGateway {
        self.programs.lock().unwrap().push_back(res);
        return self;
    }

    pub fn calls(&self) -> Vec<String> {
        return self.calls.lock().unwrap().clone();
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Gateway for TestGateway {
    #[allow(clippy::implicit_return)]
    async fn ensure_thread(&self) -> Result<()> {
        self.record("ensure_thread".to_string());
        if self.fail_thread {
            bail!("thread lookup failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn list_messages(&self, page: usize) -> Result<Vec<Message>> {
        self.record(format!("list_messages:{page}"));
        return self
            .history
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| return Ok(vec![]));
    }

    #[allow(clippy::implicit_return)]
    async fn send_message(&self, content: &str) -> Result<String> {
        self.record(format!("send_message:{content}"));
        return self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| bail!("no reply queued"));
    }

    #[allow(clippy::implicit_return)]
    async fn training_program(&self) -> Result<Option<TrainingProgram>> {
        self.record("training_program".to_string());
        return self
            .programs
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| return Ok(None));
    }
}

pub fn server_message(id: &str, sender_type: SenderType, created_at: DateTime<Utc>) -> Message {
    return Message {
        id: id.to_string(),
        thread_id: "thread_abc".to_string(),
        sender_type,
        content: format!("message {id}"),
        created_at,
    };
}

/// `count` server messages one minute apart, oldest first, with ids `{prefix}-{n}`.
pub fn history_page(prefix: &str, count: usize, start: DateTime<Utc>) -> Vec<Message> {
    return (0..count)
        .map(|idx| {
            let sender_type = if idx % 2 == 0 {
                SenderType::User
            } else {
                SenderType::Assistant
            };
            return server_message(
                &format!("{prefix}-{idx}"),
                sender_type,
                start + Duration::minutes(idx as i64),
            );
        })
        .collect();
}

pub fn may_first() -> DateTime<Utc> {
    return Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
}
