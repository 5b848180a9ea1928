//! Schema commands
//!
//! Usage: kindred db migrate

use crate::commands::open_db;
use crate::config::Settings;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct DbArgs {
    #[command(subcommand)]
    pub command: DbCommand,
}

#[derive(Debug, Subcommand)]
pub enum DbCommand {
    /// Create or upgrade the schema
    Migrate,
}

pub fn execute(args: DbArgs, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        DbCommand::Migrate => {
            // Opening applies pending migrations
            let conn = open_db(settings)?;
            let applied: i64 =
                conn.query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))?;
            println!(
                "✓ {} is at schema version {}",
                settings.database_path.display(),
                applied
            );
            Ok(())
        }
    }
}
