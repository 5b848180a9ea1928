#![allow(dead_code)]

use kindred_core::model::{NewPost, NewUser, Post, User};
use kindred_store::db::open_in_memory_configured;
use kindred_store::SqliteRepo;
use rusqlite::Connection;

/// In-memory database with foreign keys on and the full schema applied
pub fn setup_test_db() -> Connection {
    open_in_memory_configured().expect("open in-memory database")
}

pub fn create_user(conn: &Connection, username: &str) -> User {
    SqliteRepo::create_user(
        conn,
        &NewUser::new(username, format!("{}@example.org", username), "$argon2id$test"),
    )
    .expect("create user")
}

pub fn create_post(conn: &Connection, user_id: i64, title: &str) -> Post {
    SqliteRepo::create_post(conn, &NewPost::new(user_id, title, "body"))
        .expect("create post")
}

pub fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })
    .expect("count rows")
}
