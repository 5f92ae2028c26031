#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use uuid::Uuid;

use super::wire;
use super::SenderType;

pub const WELCOME_ID: &str = "welcome";
pub const WELCOME_TEXT: &str = "안녕하세요! 운동에 관해 무엇이든 물어보세요.";
pub const APOLOGY_TEXT: &str =
    "죄송합니다. 메시지를 처리하는 중 오류가 발생했습니다. 다시 시도해 주세요.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(deserialize_with = "wire::string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "wire::string_or_number")]
    pub thread_id: String,
    pub sender_type: SenderType,
    pub content: String,
    #[serde(with = "wire::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// A message that only exists on this device until the server hands back its own
    /// copy. Its id never collides with another local id.
    pub fn local(sender_type: SenderType, content: &str) -> Message {
        return Message {
            id: Message::create_local_id(),
            thread_id: "".to_string(),
            sender_type,
            content: content.to_string(),
            created_at: Utc::now(),
        };
    }

    pub fn welcome() -> Message {
        return Message {
            id: WELCOME_ID.to_string(),
            thread_id: "".to_string(),
            sender_type: SenderType::Assistant,
            content: WELCOME_TEXT.to_string(),
            created_at: Utc::now(),
        };
    }

    pub fn apology() -> Message {
        return Message::local(SenderType::Assistant, APOLOGY_TEXT);
    }

    pub fn create_local_id() -> String {
        let suffix = Uuid::new_v4()
            .to_string()
            .split('-')
            .next()
            .unwrap_or_default()
            .to_string();

        return format!("local-{}-{suffix}", Utc::now().timestamp_millis());
    }

    pub fn is_local(&self) -> bool {
        return self.id.starts_with("local-") || self.id == WELCOME_ID;
    }
}
