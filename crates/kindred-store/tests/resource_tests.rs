// Support resources directory

mod common;

use common::setup_test_db;
use kindred_core::errors::ExErrorKind;
use kindred_core::model::NewResource;
use kindred_store::SqliteRepo;

fn hotline(name: &str) -> NewResource {
    NewResource {
        contact_info: Some("14416".to_string()),
        ..NewResource::new(name, "Hotline")
    }
}

#[test]
fn test_only_verified_resources_listed() {
    let conn = setup_test_db();
    let unverified = SqliteRepo::create_resource(&conn, &hotline("Beta line")).unwrap();
    SqliteRepo::create_resource(
        &conn,
        &NewResource {
            is_verified: true,
            ..hotline("Alpha line")
        },
    )
    .unwrap();

    let listed = SqliteRepo::list_verified_resources(&conn).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Alpha line");

    let verified = SqliteRepo::set_resource_verified(&conn, unverified.id, true).unwrap();
    assert!(verified.is_verified);

    let names: Vec<String> = SqliteRepo::list_verified_resources(&conn)
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["Alpha line".to_string(), "Beta line".to_string()]);
}

#[test]
fn test_resource_type_length_enforced() {
    let conn = setup_test_db();

    let err = SqliteRepo::create_resource(&conn, &NewResource::new("Clinic", "t".repeat(51)))
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);
}

#[test]
fn test_verify_and_delete_unknown_resource() {
    let conn = setup_test_db();

    let err = SqliteRepo::set_resource_verified(&conn, 3, true).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert!(!SqliteRepo::delete_resource(&conn, 3).unwrap());
}

#[test]
fn test_round_trip_optional_fields() {
    let conn = setup_test_db();
    let created = SqliteRepo::create_resource(
        &conn,
        &NewResource {
            website_url: Some("https://icallhelpline.org".to_string()),
            description: Some("Counselling".to_string()),
            ..hotline("iCall")
        },
    )
    .unwrap();

    let loaded = SqliteRepo::get_resource(&conn, created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
    assert!(SqliteRepo::delete_resource(&conn, created.id).unwrap());
    assert!(SqliteRepo::get_resource(&conn, created.id).unwrap().is_none());
}
