use chrono::{DateTime, Utc};
use kindred_core_types::Sensitive;
use serde::Serialize;

/// A registered account
///
/// `password_hash` is an opaque credential string (e.g. an Argon2 PHC
/// string). It is never serialized and redacts itself in `Debug`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,

    /// Unique across all users
    pub username: String,

    /// Unique across all users
    pub email: String,

    #[serde(skip_serializing)]
    pub password_hash: Sensitive<String>,

    pub created_at: DateTime<Utc>,

    /// Marks the placeholder identity used for anonymous content
    pub is_default_anonymous: bool,
}

/// Insert payload for `users`
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: Sensitive<String>,
    pub is_default_anonymous: bool,
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password_hash: Sensitive::new(password_hash.into()),
            is_default_anonymous: false,
        }
    }

    /// Mark this account as the default anonymous placeholder
    pub fn default_anonymous(mut self) -> Self {
        self.is_default_anonymous = true;
        self
    }
}
