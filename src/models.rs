// src/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Represents a message in the conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub content: String,
    pub sender: Sender,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Message {
            content: content.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Message {
            content: content.into(),
            sender: Sender::Bot,
            timestamp: Utc::now(),
        }
    }
}

/// Logs details of each outbound webhook call.
#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors_set_sender() {
        let user = Message::user("hi");
        assert_eq!(user.sender, Sender::User);
        assert_eq!(user.content, "hi");

        let bot = Message::bot("hello");
        assert_eq!(bot.sender, Sender::Bot);
        assert_eq!(bot.content, "hello");
    }
}
