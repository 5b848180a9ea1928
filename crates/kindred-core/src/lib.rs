//! Kindred Core - domain records, error facility and logging facility
//!
//! This crate provides:
//! - Records and insert/update payloads for users, posts, comments,
//!   mood entries, chat sessions and support resources
//! - The canonical error facility (`ExError`, `ExErrorKind`, `KindredError`)
//! - Front-door validation rules mirroring the schema's constraints
//! - The structured logging facility and its test capture mode

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rules;

#[doc(hidden)]
pub use kindred_core_types as core_types;
#[doc(hidden)]
pub use tracing as __tracing;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, KindredError, Result};
pub use model::{
    ChatSession, ChatState, Comment, MoodEntry, MoodUpdate, NewChatSession, NewComment,
    NewMoodEntry, NewPost, NewResource, NewUser, Post, PostChanges, Resource, User,
};
