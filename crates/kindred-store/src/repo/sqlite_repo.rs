//! SQLite repository implementation
//!
//! Every write goes through a single statement or a single transaction.
//! Constraint enforcement (uniqueness, foreign keys, mood score range,
//! one-way chat close, `updated_at` refresh) lives in the schema; this
//! layer maps the engine's verdict into `ExError` without altering it.

use std::time::Instant;

use crate::errors::{sql_err, Result};
use crate::repo::rows::{
    self, CHAT_COLUMNS, COMMENT_COLUMNS, MOOD_COLUMNS, POST_COLUMNS, RESOURCE_COLUMNS,
    USER_COLUMNS,
};
use kindred_core::errors::{ExError, KindredError};
use kindred_core::model::{
    ChatSession, Comment, MoodEntry, MoodUpdate, NewChatSession, NewComment, NewMoodEntry,
    NewPost, NewResource, NewUser, Post, PostChanges, Resource, User,
};
use kindred_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

/// Rows removed by a cascading user delete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserDeletion {
    pub user_id: i64,
    pub posts: usize,
    pub comments: usize,
    pub mood_entries: usize,
    pub chat_sessions: usize,
}

/// SQLite repository for the community schema
pub struct SqliteRepo;

impl SqliteRepo {
    // ===== Users =====

    /// Insert a user
    ///
    /// # Errors
    /// `UniquenessViolation` if the username or email is already taken.
    pub fn create_user(conn: &Connection, user: &NewUser) -> Result<User> {
        let started = Instant::now();
        log_op_start!("create_user", username = %user.username);
        finish("create_user", started, insert_user(conn, user))
    }

    pub fn get_user(conn: &Connection, user_id: i64) -> Result<Option<User>> {
        conn.query_row(
            &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
            [user_id],
            rows::user,
        )
        .optional()
        .map_err(sql_err("get_user"))
    }

    pub fn get_user_by_username(conn: &Connection, username: &str) -> Result<Option<User>> {
        conn.query_row(
            &format!("SELECT {} FROM users WHERE username = ?1", USER_COLUMNS),
            [username],
            rows::user,
        )
        .optional()
        .map_err(sql_err("get_user_by_username"))
    }

    /// The placeholder account for anonymous content (lowest id if several are flagged)
    pub fn default_anonymous_user(conn: &Connection) -> Result<Option<User>> {
        conn.query_row(
            &format!(
                "SELECT {} FROM users WHERE is_default_anonymous = 1 ORDER BY id LIMIT 1",
                USER_COLUMNS
            ),
            [],
            rows::user,
        )
        .optional()
        .map_err(sql_err("default_anonymous_user"))
    }

    /// Delete a user and, by cascade, all of their posts, comments, mood
    /// entries and chat sessions
    ///
    /// Runs in one immediate transaction: either everything goes or nothing
    /// does. Returns `None` when no such user exists.
    pub fn delete_user(conn: &mut Connection, user_id: i64) -> Result<Option<UserDeletion>> {
        let started = Instant::now();
        log_op_start!("delete_user", user_id = user_id);
        finish("delete_user", started, delete_user_tx(conn, user_id))
    }

    // ===== Posts =====

    /// Insert a post
    ///
    /// # Errors
    /// `ForeignKeyViolation` if `user_id` does not reference a user.
    pub fn create_post(conn: &Connection, post: &NewPost) -> Result<Post> {
        let started = Instant::now();
        log_op_start!("create_post", user_id = post.user_id, anonymous = post.is_anonymous);
        finish("create_post", started, insert_post(conn, post))
    }

    pub fn get_post(conn: &Connection, post_id: i64) -> Result<Option<Post>> {
        conn.query_row(
            &format!("SELECT {} FROM posts WHERE id = ?1", POST_COLUMNS),
            [post_id],
            rows::post,
        )
        .optional()
        .map_err(sql_err("get_post"))
    }

    /// Apply changes to a post
    ///
    /// `updated_at` is set by the schema trigger on every update, including
    /// an empty change set.
    ///
    /// # Errors
    /// `NotFound` if the post does not exist.
    pub fn update_post(conn: &Connection, post_id: i64, changes: &PostChanges) -> Result<Post> {
        let started = Instant::now();
        log_op_start!("update_post", post_id = post_id);
        finish("update_post", started, apply_post_changes(conn, post_id, changes))
    }

    /// Delete a post and its comments; the author and other posts stay
    pub fn delete_post(conn: &Connection, post_id: i64) -> Result<bool> {
        let started = Instant::now();
        log_op_start!("delete_post", post_id = post_id);
        let result = conn
            .execute("DELETE FROM posts WHERE id = ?1", [post_id])
            .map(|n| n > 0)
            .map_err(sql_err("delete_post"));
        finish("delete_post", started, result)
    }

    /// All posts, newest first
    pub fn list_posts(conn: &Connection) -> Result<Vec<Post>> {
        query_all(
            conn,
            "list_posts",
            &format!(
                "SELECT {} FROM posts ORDER BY created_at DESC, id DESC",
                POST_COLUMNS
            ),
            [],
            rows::post,
        )
    }

    // ===== Comments =====

    /// Insert a comment
    ///
    /// # Errors
    /// `ForeignKeyViolation` if the post or the user does not exist.
    pub fn create_comment(conn: &Connection, comment: &NewComment) -> Result<Comment> {
        let started = Instant::now();
        log_op_start!(
            "create_comment",
            post_id = comment.post_id,
            user_id = comment.user_id
        );
        finish("create_comment", started, insert_comment(conn, comment))
    }

    pub fn get_comment(conn: &Connection, comment_id: i64) -> Result<Option<Comment>> {
        conn.query_row(
            &format!("SELECT {} FROM comments WHERE id = ?1", COMMENT_COLUMNS),
            [comment_id],
            rows::comment,
        )
        .optional()
        .map_err(sql_err("get_comment"))
    }

    /// Comments on a post, oldest first
    pub fn list_comments_for_post(conn: &Connection, post_id: i64) -> Result<Vec<Comment>> {
        query_all(
            conn,
            "list_comments_for_post",
            &format!(
                "SELECT {} FROM comments WHERE post_id = ?1 ORDER BY created_at, id",
                COMMENT_COLUMNS
            ),
            [post_id],
            rows::comment,
        )
    }

    // ===== Mood entries =====

    /// Record a user's mood for a day (today, UTC, unless a date is given)
    ///
    /// There is no implicit upsert: a second entry for the same day fails
    /// and the caller decides whether to `update_mood_entry` instead.
    ///
    /// # Errors
    /// - `UniquenessViolation` if the user already has an entry for that day
    /// - `ConstraintViolation` if the score is outside 1..=10
    /// - `ForeignKeyViolation` if the user does not exist
    pub fn log_mood(conn: &Connection, entry: &NewMoodEntry) -> Result<MoodEntry> {
        let started = Instant::now();
        log_op_start!("log_mood", user_id = entry.user_id);
        finish("log_mood", started, insert_mood_entry(conn, entry))
    }

    pub fn get_mood_entry(conn: &Connection, entry_id: i64) -> Result<Option<MoodEntry>> {
        conn.query_row(
            &format!("SELECT {} FROM mood_entries WHERE id = ?1", MOOD_COLUMNS),
            [entry_id],
            rows::mood_entry,
        )
        .optional()
        .map_err(sql_err("get_mood_entry"))
    }

    /// Replace score and notes of an existing entry
    ///
    /// # Errors
    /// `NotFound` for an unknown entry; `ConstraintViolation` for a score
    /// outside 1..=10.
    pub fn update_mood_entry(
        conn: &Connection,
        entry_id: i64,
        update: &MoodUpdate,
    ) -> Result<MoodEntry> {
        let started = Instant::now();
        log_op_start!("update_mood_entry", mood_entry_id = entry_id);
        let result = rewrite_mood_entry(conn, entry_id, update);
        finish("update_mood_entry", started, result)
    }

    /// A user's entries, most recent day first
    pub fn mood_history(conn: &Connection, user_id: i64) -> Result<Vec<MoodEntry>> {
        query_all(
            conn,
            "mood_history",
            &format!(
                "SELECT {} FROM mood_entries WHERE user_id = ?1 ORDER BY entry_date DESC",
                MOOD_COLUMNS
            ),
            [user_id],
            rows::mood_entry,
        )
    }

    // ===== Chat sessions =====

    /// Start a session; it is open until `close_chat_session`
    ///
    /// # Errors
    /// `ForeignKeyViolation` if the user does not exist.
    pub fn open_chat_session(conn: &Connection, session: &NewChatSession) -> Result<ChatSession> {
        let started = Instant::now();
        log_op_start!("open_chat_session", user_id = session.user_id);
        finish("open_chat_session", started, insert_chat_session(conn, session))
    }

    pub fn get_chat_session(conn: &Connection, session_id: i64) -> Result<Option<ChatSession>> {
        conn.query_row(
            &format!("SELECT {} FROM chat_sessions WHERE id = ?1", CHAT_COLUMNS),
            [session_id],
            rows::chat_session,
        )
        .optional()
        .map_err(sql_err("get_chat_session"))
    }

    /// Close a session by stamping `session_end`
    ///
    /// # Errors
    /// - `NotFound` for an unknown session
    /// - `ConstraintViolation` if the session is already closed (raised by
    ///   the schema; closing is one-way)
    pub fn close_chat_session(conn: &Connection, session_id: i64) -> Result<ChatSession> {
        let started = Instant::now();
        log_op_start!("close_chat_session", session_id = session_id);
        let result = stamp_session_end(conn, session_id);
        finish("close_chat_session", started, result)
    }

    /// Replace the stored transcript; allowed in either state
    pub fn record_chat_transcript(
        conn: &Connection,
        session_id: i64,
        log_content: &str,
    ) -> Result<ChatSession> {
        let started = Instant::now();
        log_op_start!("record_chat_transcript", session_id = session_id);
        let result = Self::update_chat_column(
            conn,
            "record_chat_transcript",
            "UPDATE chat_sessions SET log_content = ?1 WHERE id = ?2",
            log_content,
            session_id,
        );
        finish("record_chat_transcript", started, result)
    }

    /// Store the AI-generated summary for a session
    pub fn set_chat_summary(conn: &Connection, session_id: i64, summary: &str) -> Result<ChatSession> {
        let started = Instant::now();
        log_op_start!("set_chat_summary", session_id = session_id);
        let result = Self::update_chat_column(
            conn,
            "set_chat_summary",
            "UPDATE chat_sessions SET ai_summary = ?1 WHERE id = ?2",
            summary,
            session_id,
        );
        finish("set_chat_summary", started, result)
    }

    fn update_chat_column(
        conn: &Connection,
        op: &'static str,
        sql: &str,
        value: &str,
        session_id: i64,
    ) -> Result<ChatSession> {
        let changed = conn
            .execute(sql, params![value, session_id])
            .map_err(sql_err(op))?;
        if changed == 0 {
            return Err(KindredError::ChatSessionNotFound { session_id }.into());
        }
        Self::require_chat_session(conn, session_id)
    }

    fn require_chat_session(conn: &Connection, session_id: i64) -> Result<ChatSession> {
        Self::get_chat_session(conn, session_id)?
            .ok_or_else(|| KindredError::ChatSessionNotFound { session_id }.into())
    }

    // ===== Resources =====

    pub fn create_resource(conn: &Connection, resource: &NewResource) -> Result<Resource> {
        let started = Instant::now();
        log_op_start!("create_resource", resource_type = %resource.resource_type);
        finish("create_resource", started, insert_resource(conn, resource))
    }

    pub fn get_resource(conn: &Connection, resource_id: i64) -> Result<Option<Resource>> {
        conn.query_row(
            &format!("SELECT {} FROM resources WHERE id = ?1", RESOURCE_COLUMNS),
            [resource_id],
            rows::resource,
        )
        .optional()
        .map_err(sql_err("get_resource"))
    }

    /// Mark a directory entry as verified (or withdraw verification)
    pub fn set_resource_verified(
        conn: &Connection,
        resource_id: i64,
        verified: bool,
    ) -> Result<Resource> {
        let started = Instant::now();
        log_op_start!("set_resource_verified", resource_id = resource_id, verified = verified);
        let result = mark_verified(conn, resource_id, verified);
        finish("set_resource_verified", started, result)
    }

    /// Verified resources only, by name
    pub fn list_verified_resources(conn: &Connection) -> Result<Vec<Resource>> {
        query_all(
            conn,
            "list_verified_resources",
            &format!(
                "SELECT {} FROM resources WHERE is_verified = 1 ORDER BY name, id",
                RESOURCE_COLUMNS
            ),
            [],
            rows::resource,
        )
    }

    pub fn delete_resource(conn: &Connection, resource_id: i64) -> Result<bool> {
        let started = Instant::now();
        log_op_start!("delete_resource", resource_id = resource_id);
        let result = conn
            .execute("DELETE FROM resources WHERE id = ?1", [resource_id])
            .map(|n| n > 0)
            .map_err(sql_err("delete_resource"));
        finish("delete_resource", started, result)
    }
}

// ===== Statement bodies =====

fn insert_user(conn: &Connection, user: &NewUser) -> Result<User> {
    conn.query_row(
        &format!(
            "INSERT INTO users (username, email, password_hash, is_default_anonymous)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {}",
            USER_COLUMNS
        ),
        params![
            user.username,
            user.email,
            user.password_hash.expose(),
            user.is_default_anonymous
        ],
        rows::user,
    )
    .map_err(sql_err("create_user"))
}

fn insert_post(conn: &Connection, post: &NewPost) -> Result<Post> {
    conn.query_row(
        &format!(
            "INSERT INTO posts (user_id, title, content, is_anonymous)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {}",
            POST_COLUMNS
        ),
        params![post.user_id, post.title, post.content, post.is_anonymous],
        rows::post,
    )
    .map_err(sql_err("create_post"))
}

/// `COALESCE` keeps columns the caller did not touch; the statement always
/// updates the row so that the trigger fires.
fn apply_post_changes(conn: &Connection, post_id: i64, changes: &PostChanges) -> Result<Post> {
    let changed = conn
        .execute(
            "UPDATE posts
                SET title = COALESCE(?1, title),
                    content = COALESCE(?2, content),
                    is_anonymous = COALESCE(?3, is_anonymous)
              WHERE id = ?4",
            params![changes.title, changes.content, changes.is_anonymous, post_id],
        )
        .map_err(|e| sql_err("update_post")(e).with_entity_id(post_id))?;
    if changed == 0 {
        return Err(KindredError::PostNotFound { post_id }.into());
    }
    SqliteRepo::get_post(conn, post_id)?.ok_or_else(|| KindredError::PostNotFound { post_id }.into())
}

fn insert_comment(conn: &Connection, comment: &NewComment) -> Result<Comment> {
    conn.query_row(
        &format!(
            "INSERT INTO comments (post_id, user_id, content, is_anonymous)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {}",
            COMMENT_COLUMNS
        ),
        params![
            comment.post_id,
            comment.user_id,
            comment.content,
            comment.is_anonymous
        ],
        rows::comment,
    )
    .map_err(sql_err("create_comment"))
}

fn insert_mood_entry(conn: &Connection, entry: &NewMoodEntry) -> Result<MoodEntry> {
    let entry_date = entry.entry_date.map(rows::format_date);
    conn.query_row(
        &format!(
            "INSERT INTO mood_entries (user_id, mood_score, notes, entry_date)
             VALUES (?1, ?2, ?3, COALESCE(?4, date('now')))
             RETURNING {}",
            MOOD_COLUMNS
        ),
        params![entry.user_id, entry.mood_score, entry.notes, entry_date],
        rows::mood_entry,
    )
    .map_err(sql_err("log_mood"))
}

fn rewrite_mood_entry(conn: &Connection, entry_id: i64, update: &MoodUpdate) -> Result<MoodEntry> {
    let changed = conn
        .execute(
            "UPDATE mood_entries SET mood_score = ?1, notes = ?2 WHERE id = ?3",
            params![update.mood_score, update.notes, entry_id],
        )
        .map_err(|e| sql_err("update_mood_entry")(e).with_entity_id(entry_id))?;
    if changed == 0 {
        return Err(KindredError::MoodEntryNotFound { entry_id }.into());
    }
    SqliteRepo::get_mood_entry(conn, entry_id)?
        .ok_or_else(|| KindredError::MoodEntryNotFound { entry_id }.into())
}

/// The close-once trigger aborts the statement when `session_end` is
/// already set.
fn stamp_session_end(conn: &Connection, session_id: i64) -> Result<ChatSession> {
    let changed = conn
        .execute(
            "UPDATE chat_sessions
                SET session_end = strftime('%Y-%m-%d %H:%M:%f', 'now')
              WHERE id = ?1",
            [session_id],
        )
        .map_err(|e| sql_err("close_chat_session")(e).with_entity_id(session_id))?;
    if changed == 0 {
        return Err(KindredError::ChatSessionNotFound { session_id }.into());
    }
    SqliteRepo::require_chat_session(conn, session_id)
}

fn insert_chat_session(conn: &Connection, session: &NewChatSession) -> Result<ChatSession> {
    conn.query_row(
        &format!(
            "INSERT INTO chat_sessions (user_id, topic, log_content)
             VALUES (?1, ?2, ?3)
             RETURNING {}",
            CHAT_COLUMNS
        ),
        params![session.user_id, session.topic, session.log_content],
        rows::chat_session,
    )
    .map_err(sql_err("open_chat_session"))
}

fn insert_resource(conn: &Connection, resource: &NewResource) -> Result<Resource> {
    conn.query_row(
        &format!(
            "INSERT INTO resources
                (name, resource_type, contact_info, website_url, description, is_verified)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING {}",
            RESOURCE_COLUMNS
        ),
        params![
            resource.name,
            resource.resource_type,
            resource.contact_info,
            resource.website_url,
            resource.description,
            resource.is_verified
        ],
        rows::resource,
    )
    .map_err(sql_err("create_resource"))
}

fn mark_verified(conn: &Connection, resource_id: i64, verified: bool) -> Result<Resource> {
    let changed = conn
        .execute(
            "UPDATE resources SET is_verified = ?1 WHERE id = ?2",
            params![verified, resource_id],
        )
        .map_err(sql_err("set_resource_verified"))?;
    if changed == 0 {
        return Err(KindredError::ResourceNotFound { resource_id }.into());
    }
    SqliteRepo::get_resource(conn, resource_id)?
        .ok_or_else(|| KindredError::ResourceNotFound { resource_id }.into())
}

fn delete_user_tx(conn: &mut Connection, user_id: i64) -> Result<Option<UserDeletion>> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(sql_err("delete_user"))?;

    let count = |sql: &str| -> Result<usize> {
        tx.query_row(sql, [user_id], |row| row.get::<_, i64>(0))
            .map(|n| n as usize)
            .map_err(sql_err("delete_user"))
    };

    let summary = UserDeletion {
        user_id,
        posts: count("SELECT COUNT(*) FROM posts WHERE user_id = ?1")?,
        // Own comments plus everyone's comments on the user's posts
        comments: count(
            "SELECT COUNT(*) FROM comments
              WHERE user_id = ?1
                 OR post_id IN (SELECT id FROM posts WHERE user_id = ?1)",
        )?,
        mood_entries: count("SELECT COUNT(*) FROM mood_entries WHERE user_id = ?1")?,
        chat_sessions: count("SELECT COUNT(*) FROM chat_sessions WHERE user_id = ?1")?,
    };

    let deleted = tx
        .execute("DELETE FROM users WHERE id = ?1", [user_id])
        .map_err(|e| sql_err("delete_user")(e).with_entity_id(user_id))?;

    // Dropping `tx` without commit rolls back on every error path above.
    tx.commit().map_err(sql_err("delete_user"))?;

    Ok((deleted > 0).then_some(summary))
}

fn query_all<T, P, F>(conn: &Connection, op: &'static str, sql: &str, params: P, map: F) -> Result<Vec<T>>
where
    P: rusqlite::Params,
    F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare(sql).map_err(sql_err(op))?;
    let rows = stmt
        .query_map(params, map)
        .map_err(sql_err(op))?
        .collect::<rusqlite::Result<Vec<T>>>()
        .map_err(sql_err(op))?;
    Ok(rows)
}

// ===== Operation logging =====

/// Entity id reported in the end event of a write operation
trait Logged {
    fn logged_id(&self) -> Option<i64>;
}

macro_rules! logged_by_id {
    ($($ty:ty),*) => {
        $(impl Logged for $ty {
            fn logged_id(&self) -> Option<i64> {
                Some(self.id)
            }
        })*
    };
}

logged_by_id!(User, Post, Comment, MoodEntry, ChatSession, Resource);

impl Logged for bool {
    fn logged_id(&self) -> Option<i64> {
        None
    }
}

impl Logged for Option<UserDeletion> {
    fn logged_id(&self) -> Option<i64> {
        self.map(|d| d.user_id)
    }
}

fn finish<T: Logged>(op: &'static str, started: Instant, result: Result<T>) -> Result<T> {
    let duration_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(value) => match value.logged_id() {
            Some(id) => log_op_end!(op, duration_ms = duration_ms, entity_id = id),
            None => log_op_end!(op, duration_ms = duration_ms),
        },
        Err(err) => log_op_error!(op, ExError::clone(err), duration_ms = duration_ms),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory_configured;
    use kindred_core::errors::ExErrorKind;

    fn setup() -> Connection {
        open_in_memory_configured().unwrap()
    }

    #[test]
    fn test_get_missing_rows_is_none() {
        let conn = setup();
        assert!(SqliteRepo::get_user(&conn, 1).unwrap().is_none());
        assert!(SqliteRepo::get_post(&conn, 1).unwrap().is_none());
        assert!(SqliteRepo::get_chat_session(&conn, 1).unwrap().is_none());
        assert!(SqliteRepo::default_anonymous_user(&conn).unwrap().is_none());
    }

    #[test]
    fn test_create_user_round_trip() {
        let conn = setup();
        let user = SqliteRepo::create_user(&conn, &NewUser::new("sam", "sam@example.org", "h"))
            .unwrap();
        let loaded = SqliteRepo::get_user_by_username(&conn, "sam")
            .unwrap()
            .unwrap();
        assert_eq!(loaded.id, user.id);
        assert_eq!(loaded.password_hash.expose(), "h");
        assert!(!loaded.is_default_anonymous);
    }

    #[test]
    fn test_empty_post_changes_still_touch_row() {
        let conn = setup();
        let user = SqliteRepo::create_user(&conn, &NewUser::new("a", "a@x.io", "h")).unwrap();
        let post = SqliteRepo::create_post(&conn, &NewPost::new(user.id, "t", "c")).unwrap();
        let updated = SqliteRepo::update_post(&conn, post.id, &PostChanges::new()).unwrap();
        assert_eq!(updated.title, "t");
        assert!(updated.updated_at >= post.updated_at);
    }

    #[test]
    fn test_update_missing_post_is_not_found() {
        let conn = setup();
        let err = SqliteRepo::update_post(&conn, 42, &PostChanges::new().title("x")).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert_eq!(err.entity_id(), Some("42"));
    }

    #[test]
    fn test_delete_missing_user_returns_none() {
        let mut conn = setup();
        assert_eq!(SqliteRepo::delete_user(&mut conn, 7).unwrap(), None);
    }

    #[test]
    fn test_logged_id_for_deletion_summary() {
        let summary = UserDeletion {
            user_id: 3,
            ..Default::default()
        };
        assert_eq!(Some(summary).logged_id(), Some(3));
        assert_eq!(None::<UserDeletion>.logged_id(), None);
        assert_eq!(true.logged_id(), None);
    }
}
