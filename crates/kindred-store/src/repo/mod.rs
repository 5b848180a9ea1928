//! Repository layer over the community schema
//!
//! `SqliteRepo` exposes one associated function per data-access operation;
//! `rows` holds the column lists and row mappers they share.

mod rows;
pub mod sqlite_repo;

pub use rows::format_date;
pub use sqlite_repo::{SqliteRepo, UserDeletion};
