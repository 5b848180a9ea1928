use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lowest accepted mood score ("very low")
pub const MOOD_SCORE_MIN: i64 = 1;
/// Highest accepted mood score ("very high")
pub const MOOD_SCORE_MAX: i64 = 10;

/// One day's mood log for a user; at most one per (user, entry_date)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: i64,
    pub user_id: i64,
    pub mood_score: i64,
    pub notes: Option<String>,
    pub entry_date: NaiveDate,
}

/// Insert payload for `mood_entries`
///
/// When `entry_date` is `None` the store assigns the current UTC date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMoodEntry {
    pub user_id: i64,
    pub mood_score: i64,
    pub notes: Option<String>,
    pub entry_date: Option<NaiveDate>,
}

impl NewMoodEntry {
    pub fn new(user_id: i64, mood_score: i64) -> Self {
        Self {
            user_id,
            mood_score,
            notes: None,
            entry_date: None,
        }
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.entry_date = Some(date);
        self
    }
}

/// Replacement values for an existing entry (the "update instead" path
/// after a same-day insert is rejected)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodUpdate {
    pub mood_score: i64,
    pub notes: Option<String>,
}
