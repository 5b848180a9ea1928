//! Kindred CLI
//!
//! Operator tool for a Kindred community database

use clap::{Parser, Subcommand};
use kindred_core::logging_facility;
use kindred_core_types::RequestContext;
use std::path::PathBuf;

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "kindred")]
#[command(about = "Kindred - community support database administration", long_about = None)]
struct Cli {
    /// Database file (overrides KINDRED_DATABASE_PATH and kindred.toml)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log output: dev (human-readable) or json
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Schema operations
    Db(commands::db::DbArgs),
    /// Seed import operations
    Seed(commands::seed::SeedArgs),
    /// User account operations
    User(commands::user::UserArgs),
    /// Chat session operations
    Chat(commands::chat::ChatArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let settings = config::Settings::load(&cwd)?.with_overrides(cli.db, cli.log_format);
    logging_facility::init(settings.profile()?);

    let ctx = RequestContext::new();
    let span = tracing::info_span!("kindred", request_id = %ctx.request_id);
    let _guard = span.enter();

    match cli.command {
        Commands::Db(args) => commands::db::execute(args, &settings),
        Commands::Seed(args) => commands::seed::execute(args, &settings),
        Commands::User(args) => commands::user::execute(args, &settings),
        Commands::Chat(args) => commands::chat::execute(args, &settings),
    }
}
