use kindred_core::errors::{ExError, ExErrorKind, KindredError};
use kindred_core_types::RequestId;

#[test]
fn test_not_found_verifiable_by_kind() {
    let ex_err: ExError = KindredError::PostNotFound { post_id: 17 }.into();

    assert_eq!(ex_err.kind(), ExErrorKind::NotFound);
    assert_eq!(ex_err.code(), "ERR_NOT_FOUND");
    assert_eq!(ex_err.entity_id(), Some("17"));
}

#[test]
fn test_mood_score_out_of_range_maps_to_constraint_violation() {
    let ex_err: ExError = KindredError::MoodScoreOutOfRange { score: 11 }.into();

    assert_eq!(ex_err.kind(), ExErrorKind::ConstraintViolation);
    assert!(ex_err.message().contains("11"));
}

#[test]
fn test_invalid_input_keeps_reason() {
    let ex_err: ExError = KindredError::InvalidInput {
        reason: "title must not be empty".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(ex_err.message(), "title must not be empty");
}

#[test]
fn test_error_kind_codes_are_unique() {
    let kinds = [
        ExErrorKind::UniquenessViolation,
        ExErrorKind::ForeignKeyViolation,
        ExErrorKind::ConstraintViolation,
        ExErrorKind::NotFound,
        ExErrorKind::InvalidInput,
        ExErrorKind::Io,
        ExErrorKind::Serialization,
        ExErrorKind::Persistence,
        ExErrorKind::Config,
    ];
    let codes: std::collections::HashSet<_> = kinds.iter().map(|k| k.code()).collect();
    assert_eq!(codes.len(), kinds.len());
    assert!(codes.iter().all(|c| c.starts_with("ERR_")));
}

#[test]
fn test_request_id_appears_in_display() {
    let request_id = RequestId::from_string("req-7".to_string());
    let err = ExError::new(ExErrorKind::Persistence)
        .with_message("database is locked")
        .with_request_id(request_id.clone());

    assert_eq!(err.request_id(), Some(&request_id));
    assert!(err.to_string().contains("req-7"));
}

#[test]
fn test_serde_json_error_converts() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: KindredError = parse_err.into();
    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::Serialization);
}
