//! Row hydration
//!
//! Column lists and `Row` -> record mappers shared by every query in
//! `SqliteRepo`. Each mapper reads columns in the order of its list.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use kindred_core::model::{ChatSession, Comment, MoodEntry, Post, Resource, User};
use kindred_core_types::Sensitive;
use rusqlite::types::Type;
use rusqlite::Row;

/// Layout written by `strftime('%Y-%m-%d %H:%M:%f', 'now')`
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const DATE_FORMAT: &str = "%Y-%m-%d";

pub const USER_COLUMNS: &str =
    "id, username, email, password_hash, created_at, is_default_anonymous";

pub const POST_COLUMNS: &str =
    "id, user_id, title, content, is_anonymous, created_at, updated_at";

pub const COMMENT_COLUMNS: &str = "id, post_id, user_id, content, is_anonymous, created_at";

pub const MOOD_COLUMNS: &str = "id, user_id, mood_score, notes, entry_date";

pub const CHAT_COLUMNS: &str =
    "id, user_id, topic, session_start, session_end, log_content, ai_summary";

pub const RESOURCE_COLUMNS: &str =
    "id, name, resource_type, contact_info, website_url, description, is_verified";

pub fn user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password_hash: Sensitive::new(row.get(3)?),
        created_at: timestamp(row, 4)?,
        is_default_anonymous: row.get(5)?,
    })
}

pub fn post(row: &Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        is_anonymous: row.get(4)?,
        created_at: timestamp(row, 5)?,
        updated_at: timestamp(row, 6)?,
    })
}

pub fn comment(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        post_id: row.get(1)?,
        user_id: row.get(2)?,
        content: row.get(3)?,
        is_anonymous: row.get(4)?,
        created_at: timestamp(row, 5)?,
    })
}

pub fn mood_entry(row: &Row<'_>) -> rusqlite::Result<MoodEntry> {
    Ok(MoodEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        mood_score: row.get(2)?,
        notes: row.get(3)?,
        entry_date: date(row, 4)?,
    })
}

pub fn chat_session(row: &Row<'_>) -> rusqlite::Result<ChatSession> {
    Ok(ChatSession {
        id: row.get(0)?,
        user_id: row.get(1)?,
        topic: row.get(2)?,
        session_start: timestamp(row, 3)?,
        session_end: optional_timestamp(row, 4)?,
        log_content: row.get(5)?,
        ai_summary: row.get(6)?,
    })
}

pub fn resource(row: &Row<'_>) -> rusqlite::Result<Resource> {
    Ok(Resource {
        id: row.get(0)?,
        name: row.get(1)?,
        resource_type: row.get(2)?,
        contact_info: row.get(3)?,
        website_url: row.get(4)?,
        description: row.get(5)?,
        is_verified: row.get(6)?,
    })
}

/// Render a date the way `entry_date` stores it
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    parse_timestamp(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn optional_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| {
        parse_timestamp(&s)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    })
    .transpose()
}

fn date(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    NaiveDate::parse_from_str(&raw, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_sqlite_timestamp_with_millis() {
        let ts = parse_timestamp("2026-10-18 09:15:30.250").unwrap();
        assert_eq!(ts.hour(), 9);
        assert_eq!(ts.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_parse_timestamp_without_fraction() {
        let ts = parse_timestamp("2026-10-18 09:15:30").unwrap();
        assert_eq!(ts.second(), 30);
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(format_date(date), "2026-01-05");
        assert_eq!(date.day(), 5);
    }
}
