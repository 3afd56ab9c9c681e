#![allow(clippy::unwrap_used, clippy::expect_used)]

use stallmap_core::errors::StallError;
use stallmap_core::logging_facility::test_capture::init_test_capture;
use stallmap_core::model::StallId;
use stallmap_core::{log_op_end, log_op_error, log_op_start};
use stallmap_core_types::schema::{
    EVENT_END, EVENT_START, FIELD_COMPONENT, FIELD_ERR_KIND, FIELD_PRODUCT_COUNT, FIELD_STALL_COUNT,
};

#[test]
fn test_start_records_stall_and_extra_fields() {
    let capture = init_test_capture();
    let op = "logging_start_with_stall";

    let _started = log_op_start!(op, stall = StallId(5), product_count = 3);

    let start = capture
        .events_for_stall(op, 5)
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_START))
        .expect("start event captured");
    assert_eq!(start.field(FIELD_PRODUCT_COUNT), Some("3"));
    assert!(start.field(FIELD_COMPONENT).unwrap().contains("logging_facility_tests"));
}

#[test]
fn test_end_derives_duration_from_start() {
    let capture = init_test_capture();
    let op = "logging_end_duration";

    let started = log_op_start!(op);
    log_op_end!(op, started, stall_count = 2);

    capture.assert_completed(op);
    let end = capture.outcome(op).unwrap();
    assert_eq!(end.event.as_deref(), Some(EVENT_END));
    assert_eq!(end.stall_id, None);
    assert_eq!(end.field(FIELD_STALL_COUNT), Some("2"));
}

#[test]
fn test_error_records_code_kind_and_stall() {
    let capture = init_test_capture();
    let op = "logging_error_code";

    let started = log_op_start!(op, stall = StallId(9));
    log_op_error!(op, started, StallError::StallNotFound { stall_id: 9 }, stall = StallId(9));

    capture.assert_failed(op, "ERR_NOT_FOUND");
    let failure = capture.outcome(op).unwrap();
    assert_eq!(failure.stall_id, Some(9));
    assert_eq!(failure.field(FIELD_ERR_KIND), Some("NotFound"));
    assert!(failure.duration_ms.is_some());
}

#[test]
#[should_panic(expected = "did not complete")]
fn test_assert_completed_rejects_failed_op() {
    let capture = init_test_capture();
    let op = "logging_failed_not_completed";

    let started = log_op_start!(op);
    log_op_error!(op, started, StallError::EmptyProductList);

    capture.assert_completed(op);
}
