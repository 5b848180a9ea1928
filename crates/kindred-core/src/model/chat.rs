use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a chat session, derived from `session_end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatState {
    Open,
    Closed,
}

/// A logged conversation with the support assistant
///
/// `log_content` and `ai_summary` are opaque to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: i64,
    pub user_id: i64,
    pub topic: Option<String>,
    pub session_start: DateTime<Utc>,
    pub session_end: Option<DateTime<Utc>>,
    pub log_content: String,
    pub ai_summary: Option<String>,
}

impl ChatSession {
    pub fn state(&self) -> ChatState {
        match self.session_end {
            None => ChatState::Open,
            Some(_) => ChatState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state() == ChatState::Open
    }
}

/// Insert payload for `chat_sessions`; sessions always start open
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChatSession {
    pub user_id: i64,
    pub topic: Option<String>,
    pub log_content: String,
}

impl NewChatSession {
    pub fn new(user_id: i64, log_content: impl Into<String>) -> Self {
        Self {
            user_id,
            topic: None,
            log_content: log_content.into(),
        }
    }

    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }
}
