use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A community forum post
///
/// `user_id` always holds the real author. `is_anonymous` only changes how
/// the author is displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub is_anonymous: bool,
    pub created_at: DateTime<Utc>,

    /// Refreshed by the store on every row update
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Author name to show to other users, or `None` when posted anonymously
    pub fn display_author<'a>(&self, author: &'a str) -> Option<&'a str> {
        (!self.is_anonymous).then_some(author)
    }
}

/// Insert payload for `posts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    pub user_id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub is_anonymous: bool,
}

impl NewPost {
    pub fn new(user_id: i64, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            content: content.into(),
            is_anonymous: false,
        }
    }

    pub fn anonymous(mut self) -> Self {
        self.is_anonymous = true;
        self
    }
}

/// Column changes for an existing post; `None` leaves a column untouched
///
/// An empty change set is still a valid update and refreshes `updated_at`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_anonymous: Option<bool>,
}

impl PostChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn anonymous(mut self, is_anonymous: bool) -> Self {
        self.is_anonymous = Some(is_anonymous);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.is_anonymous.is_none()
    }
}
