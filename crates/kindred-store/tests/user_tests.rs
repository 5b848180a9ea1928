// Users: uniqueness, lookup and credential redaction

mod common;

use common::{create_user, setup_test_db};
use kindred_core::errors::ExErrorKind;
use kindred_core::model::NewUser;
use kindred_store::SqliteRepo;

#[test]
fn test_duplicate_username_is_uniqueness_violation() {
    let conn = setup_test_db();
    create_user(&conn, "river");

    let err = SqliteRepo::create_user(&conn, &NewUser::new("river", "other@example.org", "h"))
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::UniquenessViolation);
    assert_eq!(err.op(), Some("create_user"));
    assert!(err.message().contains("users.username"));
}

#[test]
fn test_duplicate_email_is_uniqueness_violation() {
    let conn = setup_test_db();
    create_user(&conn, "river");

    let err = SqliteRepo::create_user(&conn, &NewUser::new("lake", "river@example.org", "h"))
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::UniquenessViolation);
    assert!(err.message().contains("users.email"));
}

#[test]
fn test_failed_insert_leaves_table_unchanged() {
    let conn = setup_test_db();
    create_user(&conn, "river");

    let _ = SqliteRepo::create_user(&conn, &NewUser::new("river", "x@example.org", "h"));

    assert_eq!(common::count_rows(&conn, "users"), 1);
}

#[test]
fn test_overlong_username_rejected_by_engine() {
    let conn = setup_test_db();
    let name = "x".repeat(51);

    let err = SqliteRepo::create_user(&conn, &NewUser::new(name, "long@example.org", "h"))
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);
}

#[test]
fn test_default_anonymous_user_lookup() {
    let conn = setup_test_db();
    create_user(&conn, "river");
    let anon = SqliteRepo::create_user(
        &conn,
        &NewUser::new("anonymous", "anon@example.org", "!locked").default_anonymous(),
    )
    .unwrap();

    let found = SqliteRepo::default_anonymous_user(&conn).unwrap().unwrap();
    assert_eq!(found.id, anon.id);
    assert!(found.is_default_anonymous);
}

#[test]
fn test_user_debug_and_json_never_leak_hash() {
    let conn = setup_test_db();
    let user = SqliteRepo::create_user(
        &conn,
        &NewUser::new("river", "river@example.org", "$argon2id$v=19$secret"),
    )
    .unwrap();

    let debug = format!("{:?}", user);
    assert!(!debug.contains("argon2id"));
    assert!(debug.contains("***REDACTED***"));

    let json = serde_json::to_string(&user).unwrap();
    assert!(!json.contains("password_hash"));
    assert!(!json.contains("argon2id"));
}
