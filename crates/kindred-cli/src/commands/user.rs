//! User account commands
//!
//! Usage: kindred user add --username U --email E [--password P] [--anonymous-default]

use crate::commands::open_db;
use crate::config::Settings;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;
use clap::{Args, Subcommand};
use kindred_core::model::NewUser;
use kindred_core::rules::validation::validate_new_user;
use kindred_core_types::Sensitive;
use kindred_store::SqliteRepo;

/// Stored for accounts created without a password; no Argon2 hash matches it
pub const LOCKED_PASSWORD_HASH: &str = "!locked";

#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Register a user account
    Add(AddArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub email: String,

    /// Plaintext password; hashed with Argon2id before storage
    #[arg(long, env = "KINDRED_USER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Mark this account as the placeholder for anonymous content
    #[arg(long)]
    pub anonymous_default: bool,
}

pub fn execute(args: UserArgs, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        UserCommand::Add(add_args) => execute_add(add_args, settings),
    }
}

fn execute_add(args: AddArgs, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let password_hash = match args.password.map(Sensitive::new) {
        Some(password) => hash_password(&password)?,
        None => LOCKED_PASSWORD_HASH.to_string(),
    };

    let mut new_user = NewUser::new(args.username, args.email, password_hash);
    if args.anonymous_default {
        new_user = new_user.default_anonymous();
    }
    validate_new_user(&new_user)?;

    let conn = open_db(settings)?;
    let user = SqliteRepo::create_user(&conn, &new_user)?;
    println!("✓ Created user {} (id: {})", user.username, user.id);
    Ok(())
}

/// Hash a plaintext password into an Argon2id PHC string
pub fn hash_password(password: &Sensitive<String>) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.expose().as_bytes(), &salt)?;
    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted_phc_string() {
        let password = Sensitive::new("correct horse".to_string());

        let first = hash_password(&password).unwrap();
        let second = hash_password(&password).unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(!first.contains("correct horse"));
    }

    #[test]
    fn test_locked_hash_is_not_phc() {
        assert!(!LOCKED_PASSWORD_HASH.starts_with('$'));
    }
}
