#![allow(clippy::unwrap_used, clippy::expect_used)]

use kindred_core::errors::KindredError;
use kindred_core::logging_facility::test_capture::init_test_capture;
use kindred_core::{log_op_end, log_op_error, log_op_start};
use kindred_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_USER_ID,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    assert_eq!(capture.find(op_name, EVENT_START).len(), 1);
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events = capture.find(op_name, EVENT_END);
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = KindredError::UserNotFound { user_id: 5 };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events = capture.find(op_name, EVENT_END_ERROR);
    assert_eq!(error_events.len(), 1);
    assert_eq!(error_events[0].field(FIELD_ERR_CODE), Some("ERR_NOT_FOUND"));
    assert_eq!(error_events[0].level, tracing::Level::WARN);
}

#[test]
fn test_entity_fields_are_captured() {
    let capture = init_test_capture();
    let op_name = "test_entity_fields_unique_4";

    log_op_start!(op_name, user_id = 7_i64, anonymous = true);

    let start = capture
        .find(op_name, EVENT_START)
        .pop()
        .expect("Should have start event");
    assert_eq!(start.field(FIELD_USER_ID), Some("7"));
    assert_eq!(start.field("anonymous"), Some("true"));
    assert!(start
        .component
        .as_deref()
        .is_some_and(|c| c.contains("logging_facility_tests")));
}

#[test]
fn test_sensitive_values_are_redacted_in_fields() {
    let capture = init_test_capture();
    let op_name = "test_sensitive_redaction_unique_5";
    let hash = kindred_core_types::Sensitive::new("$argon2id$do-not-log".to_string());

    log_op_start!(op_name, password_hash = %hash);

    let start = capture.find(op_name, EVENT_START).pop().unwrap();
    let rendered = start.field("password_hash").unwrap();
    assert!(!rendered.contains("do-not-log"));
    assert!(rendered.contains("REDACTED"));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_assert_event_exists_fails_for_unknown_op() {
    let capture = init_test_capture();
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_count_events() {
    let capture = init_test_capture();
    let op1 = "test_count_events_op1_unique_6";
    let op2 = "test_count_events_op2_unique_6";

    log_op_start!(op1);
    log_op_start!(op2);
    log_op_end!(op1, duration_ms = 1);

    let starts = capture.count_events(|e| {
        e.event.as_deref() == Some(EVENT_START)
            && (e.op.as_deref() == Some(op1) || e.op.as_deref() == Some(op2))
    });
    assert_eq!(starts, 2);
    assert_eq!(capture.find(op1, EVENT_END).len(), 1);
}
