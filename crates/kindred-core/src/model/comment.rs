use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reply to a post; anonymity has the same display-only meaning as on posts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    pub is_anonymous: bool,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn display_author<'a>(&self, author: &'a str) -> Option<&'a str> {
        (!self.is_anonymous).then_some(author)
    }
}

/// Insert payload for `comments`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComment {
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    #[serde(default)]
    pub is_anonymous: bool,
}

impl NewComment {
    pub fn new(post_id: i64, user_id: i64, content: impl Into<String>) -> Self {
        Self {
            post_id,
            user_id,
            content: content.into(),
            is_anonymous: false,
        }
    }

    pub fn anonymous(mut self) -> Self {
        self.is_anonymous = true;
        self
    }
}
