//! Seed import command
//!
//! Usage: kindred seed import [PATH]

use crate::commands::open_db;
use crate::config::Settings;
use clap::{Args, Subcommand};
use kindred_store::seed::{import_default_seed, import_seed, SeedReport};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Import a seed file (or the built-in default seed) into the database
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to a seed YAML file; omit for the built-in default seed
    pub path: Option<PathBuf>,
}

pub fn execute(args: SeedArgs, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        SeedCommand::Import(import_args) => execute_import(import_args, settings),
    }
}

fn execute_import(args: ImportArgs, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = open_db(settings)?;

    let report = match &args.path {
        Some(path) => {
            println!("Importing {}...", path.display());
            import_seed(path, &mut conn)?
        }
        None => {
            println!("Importing built-in default seed...");
            import_default_seed(&mut conn)?
        }
    };

    print_report(&report);
    Ok(())
}

fn print_report(report: &SeedReport) {
    println!(
        "✓ Imported {} users, {} posts, {} comments, {} resources (digest: {})",
        report.users, report.posts, report.comments, report.resources, report.digest
    );
}
