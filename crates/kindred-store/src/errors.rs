//! Error handling for kindred-store
//!
//! Translates SQLite failures into the canonical `ExError` taxonomy.
//! Constraint failures keep the engine's own message and are never retried.

use kindred_core::errors::{ExError, ExErrorKind};
use rusqlite::{ffi, ErrorCode};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Classify a rusqlite error by its SQLite extended result code
pub fn classify(err: &rusqlite::Error) -> ExErrorKind {
    match err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
            match e.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    ExErrorKind::UniquenessViolation
                }
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => ExErrorKind::ForeignKeyViolation,
                // CHECK, NOT NULL, RAISE() from triggers, ...
                _ => ExErrorKind::ConstraintViolation,
            }
        }
        rusqlite::Error::QueryReturnedNoRows => ExErrorKind::NotFound,
        rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::IntegralValueOutOfRange(..) => ExErrorKind::Serialization,
        _ => ExErrorKind::Persistence,
    }
}

/// Create a store error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(classify(&err))
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// `map_err` adapter that tags the error with the failing operation
pub fn sql_err(op: &'static str) -> impl Fn(rusqlite::Error) -> ExError {
    move |err| from_rusqlite(err).with_op(op)
}

/// Create a migration error
pub fn migration_error(migration_id: &str, err: rusqlite::Error) -> ExError {
    let kind = classify(&err);
    ExError::new(if kind.is_constraint() {
        kind
    } else {
        ExErrorKind::Persistence
    })
    .with_op("migration")
    .with_message(format!("Migration {} failed: {}", migration_id, err))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::ConstraintViolation)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: recorded {}, embedded {}",
            migration_id, expected, actual
        ))
}

/// Create a seed validation error
pub fn seed_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("seed_parse")
        .with_message(reason.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
