pub mod chat;
pub mod comment;
pub mod mood;
pub mod post;
pub mod resource;
pub mod user;

pub use chat::{ChatSession, ChatState, NewChatSession};
pub use comment::{Comment, NewComment};
pub use mood::{MoodEntry, MoodUpdate, NewMoodEntry, MOOD_SCORE_MAX, MOOD_SCORE_MIN};
pub use post::{NewPost, Post, PostChanges};
pub use resource::{NewResource, Resource};
pub use user::{NewUser, User};
