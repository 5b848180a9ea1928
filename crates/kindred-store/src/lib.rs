//! Kindred Store - SQLite persistence for the community schema
//!
//! Provides:
//! - Connection management with foreign keys enforced
//! - Embedded, checksummed schema migrations (tables, indexes, triggers)
//! - `SqliteRepo`, the data-access layer for every entity
//! - Mapping of storage-engine constraint failures into `ExErrorKind`
//! - Seed Format v0 parser and transactional importer

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod seed;

// Re-export key types
pub use errors::Result;
pub use repo::{SqliteRepo, UserDeletion};
