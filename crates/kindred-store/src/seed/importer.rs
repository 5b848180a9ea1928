//! Seed importer orchestration
//!
//! Imports a validated seed through `SqliteRepo` inside one transaction.
//! Any failure, including an engine constraint on a row already present,
//! rolls the whole import back.

use crate::errors::{sql_err, Result};
use crate::repo::SqliteRepo;
use crate::seed::format_v0::SeedV0;
use crate::seed::{compute_seed_digest, parse_seed_file, parse_seed_str};
use kindred_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::{Connection, TransactionBehavior};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

/// The built-in initialization data: the default anonymous account, a demo
/// user, two posts, a comment and two support resources
pub const DEFAULT_SEED: &str = include_str!("../../seeds/default.yaml");

/// Rows written by a successful import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub digest: String,
    pub users: usize,
    pub posts: usize,
    pub comments: usize,
    pub resources: usize,
}

/// Import a seed file into the database
///
/// Parses and validates the YAML, computes the digest, then inserts every
/// row in a single transaction.
pub fn import_seed(path: &Path, conn: &mut Connection) -> Result<SeedReport> {
    let seed = parse_seed_file(path)?;
    import_parsed(&seed, conn)
}

/// Import a seed held in memory
pub fn import_seed_str(content: &str, conn: &mut Connection) -> Result<SeedReport> {
    let seed = parse_seed_str(content)?;
    import_parsed(&seed, conn)
}

/// Import `DEFAULT_SEED`
pub fn import_default_seed(conn: &mut Connection) -> Result<SeedReport> {
    import_seed_str(DEFAULT_SEED, conn)
}

fn import_parsed(seed: &SeedV0, conn: &mut Connection) -> Result<SeedReport> {
    let started = Instant::now();
    let digest = compute_seed_digest(seed)?;
    log_op_start!("seed_import", seed_digest = %digest);

    match apply_seed(seed, conn, digest) {
        Ok(report) => {
            log_op_end!(
                "seed_import",
                duration_ms = started.elapsed().as_millis() as u64,
                users = report.users,
                posts = report.posts,
            );
            Ok(report)
        }
        Err(err) => {
            log_op_error!(
                "seed_import",
                err.clone(),
                duration_ms = started.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

fn apply_seed(seed: &SeedV0, conn: &mut Connection, digest: String) -> Result<SeedReport> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(sql_err("seed_import"))?;

    let mut user_ids: HashMap<&str, i64> = HashMap::new();
    for seed_user in &seed.users {
        let user = SqliteRepo::create_user(&tx, &seed_user.to_new_user())?;
        user_ids.insert(seed_user.key.as_str(), user.id);
    }

    let mut post_ids: HashMap<&str, i64> = HashMap::new();
    for seed_post in &seed.posts {
        let author = resolve(&user_ids, &seed_post.author)?;
        let post = SqliteRepo::create_post(&tx, &seed_post.to_new_post(author))?;
        post_ids.insert(seed_post.key.as_str(), post.id);
    }

    for seed_comment in &seed.comments {
        let post_id = resolve(&post_ids, &seed_comment.post)?;
        let author = resolve(&user_ids, &seed_comment.author)?;
        SqliteRepo::create_comment(&tx, &seed_comment.to_new_comment(post_id, author))?;
    }

    for resource in &seed.resources {
        SqliteRepo::create_resource(&tx, resource)?;
    }

    tx.commit().map_err(sql_err("seed_import"))?;

    Ok(SeedReport {
        digest,
        users: seed.users.len(),
        posts: seed.posts.len(),
        comments: seed.comments.len(),
        resources: seed.resources.len(),
    })
}

/// Keys were checked by the parser; a miss here means the seed changed shape
/// between parse and import.
fn resolve(ids: &HashMap<&str, i64>, key: &str) -> Result<i64> {
    ids.get(key).copied().ok_or_else(|| {
        crate::errors::seed_validation(&format!("Unresolved seed key: {}", key))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory_configured;
    use kindred_core::errors::ExErrorKind;

    fn setup_test_db() -> Connection {
        open_in_memory_configured().unwrap()
    }

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })
        .unwrap()
    }

    #[test]
    fn test_import_default_seed() {
        let mut conn = setup_test_db();

        let report = import_default_seed(&mut conn).unwrap();
        assert_eq!(report.users, 2);
        assert_eq!(report.posts, 2);
        assert_eq!(report.comments, 1);
        assert_eq!(report.resources, 2);

        assert_eq!(count(&conn, "users"), 2);
        assert_eq!(count(&conn, "posts"), 2);
        assert_eq!(count(&conn, "comments"), 1);
        assert_eq!(count(&conn, "resources"), 2);

        let anonymous = SqliteRepo::default_anonymous_user(&conn).unwrap();
        assert!(anonymous.is_some());
    }

    #[test]
    fn test_reimport_fails_without_partial_writes() {
        let mut conn = setup_test_db();
        import_default_seed(&mut conn).unwrap();

        let err = import_default_seed(&mut conn).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::UniquenessViolation);

        assert_eq!(count(&conn, "users"), 2);
        assert_eq!(count(&conn, "posts"), 2);
        assert_eq!(count(&conn, "resources"), 2);
    }

    #[test]
    fn test_digest_reported() {
        let mut conn = setup_test_db();
        let report = import_default_seed(&mut conn).unwrap();
        let expected = compute_seed_digest(&parse_seed_str(DEFAULT_SEED).unwrap()).unwrap();
        assert_eq!(report.digest, expected);
    }
}
