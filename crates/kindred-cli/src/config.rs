//! Layered CLI configuration
//!
//! Precedence, lowest first: built-in defaults, `kindred.toml` in the
//! working directory, `.env`, `KINDRED_*` environment variables, flags.

use config::{Config, ConfigError, Environment, File, FileFormat};
use kindred_core::errors::{ExError, ExErrorKind};
use kindred_core::logging_facility::Profile;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_PATH: &str = ".kindred/store.db";
pub const CONFIG_FILE: &str = "kindred.toml";
const ENV_PREFIX: &str = "KINDRED";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub database_path: PathBuf,
    pub log_profile: String,
}

impl Settings {
    /// Load settings from `dir`, reading `.env` into the process
    /// environment first
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        match dotenvy::from_path(dir.join(".env")) {
            Ok(()) => {}
            Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(ConfigError::Foreign(Box::new(e))),
        }
        Self::from_sources(&dir.join(CONFIG_FILE), None)
    }

    /// `env` replaces the process environment when given (tests)
    pub fn from_sources(
        config_file: &Path,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("database_path", DEFAULT_DB_PATH)?
            .set_default("log_profile", "development")?
            .add_source(
                File::from(config_file)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix(ENV_PREFIX).source(env))
            .build()?
            .try_deserialize()
    }

    /// Apply command-line flags on top of the loaded layers
    pub fn with_overrides(mut self, db: Option<PathBuf>, log_format: Option<String>) -> Self {
        if let Some(db) = db {
            self.database_path = db;
        }
        if let Some(log_format) = log_format {
            self.log_profile = log_format;
        }
        self
    }

    pub fn profile(&self) -> Result<Profile, ExError> {
        self.log_profile.parse().map_err(|reason: String| {
            ExError::new(ExErrorKind::Config)
                .with_op("log_profile")
                .with_message(reason)
        })
    }
}
