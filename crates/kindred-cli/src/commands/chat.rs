//! Chat session commands
//!
//! Usage: kindred chat close <ID>

use crate::commands::open_db;
use crate::config::Settings;
use clap::{Args, Subcommand};
use kindred_store::SqliteRepo;

#[derive(Debug, Args)]
pub struct ChatArgs {
    #[command(subcommand)]
    pub command: ChatCommand,
}

#[derive(Debug, Subcommand)]
pub enum ChatCommand {
    /// Close an open chat session
    Close {
        /// Chat session id
        id: i64,
    },
}

pub fn execute(args: ChatArgs, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        ChatCommand::Close { id } => {
            let conn = open_db(settings)?;
            let session = SqliteRepo::close_chat_session(&conn, id)?;
            if let Some(end) = session.session_end {
                println!("✓ Closed chat session {} at {}", session.id, end);
            }
            Ok(())
        }
    }
}
