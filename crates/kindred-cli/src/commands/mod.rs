//! Command implementations

pub mod chat;
pub mod db;
pub mod seed;
pub mod user;

use crate::config::Settings;
use rusqlite::Connection;

/// Open the configured database, creating its directory and applying any
/// pending migrations
pub fn open_db(settings: &Settings) -> Result<Connection, Box<dyn std::error::Error>> {
    if let Some(parent) = settings.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(kindred_store::db::open_configured(&settings.database_path)?)
}
