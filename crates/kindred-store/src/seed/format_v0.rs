//! Seed Format v0 schema
//!
//! Defines the YAML structure for seed import. Rows refer to each other by
//! seed-local keys; database ids are assigned at import time.

use kindred_core::model::{NewComment, NewPost, NewResource, NewUser};
use serde::{Deserialize, Serialize};

/// Top-level seed file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    #[serde(default)]
    pub users: Vec<SeedUser>,

    #[serde(default)]
    pub posts: Vec<SeedPost>,

    #[serde(default)]
    pub comments: Vec<SeedComment>,

    #[serde(default)]
    pub resources: Vec<NewResource>,
}

/// User definition in seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedUser {
    /// Seed-local key referenced by `author`
    pub key: String,
    pub username: String,
    pub email: String,
    /// Stored as-is; seeds never carry plaintext passwords
    pub password_hash: String,
    #[serde(default)]
    pub default_anonymous: bool,
}

/// Post definition in seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedPost {
    /// Seed-local key referenced by comments
    pub key: String,
    /// Key of the authoring user
    pub author: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub anonymous: bool,
}

/// Comment definition in seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedComment {
    /// Key of the post being commented on
    pub post: String,
    /// Key of the authoring user
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub anonymous: bool,
}

impl SeedUser {
    pub fn to_new_user(&self) -> NewUser {
        let user = NewUser::new(&self.username, &self.email, &self.password_hash);
        if self.default_anonymous {
            user.default_anonymous()
        } else {
            user
        }
    }
}

impl SeedPost {
    pub fn to_new_post(&self, user_id: i64) -> NewPost {
        NewPost {
            user_id,
            title: self.title.clone(),
            content: self.content.clone(),
            is_anonymous: self.anonymous,
        }
    }
}

impl SeedComment {
    pub fn to_new_comment(&self, post_id: i64, user_id: i64) -> NewComment {
        NewComment {
            post_id,
            user_id,
            content: self.content.clone(),
            is_anonymous: self.anonymous,
        }
    }
}
