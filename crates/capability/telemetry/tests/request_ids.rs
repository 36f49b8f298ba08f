use triage_telemetry::{metrics, new_request_ids, record_query_latency_ms, record_report_deleted};

#[test]
fn request_ids_are_distinct() {
    let first = new_request_ids();
    let second = new_request_ids();
    assert!(!first.request_id.is_empty());
    assert!(!first.trace_id.is_empty());
    assert_ne!(first.request_id, first.trace_id);
    assert_ne!(first.request_id, second.request_id);
}

#[test]
fn counters_only_grow() {
    let before = metrics().snapshot();
    record_report_deleted();
    record_query_latency_ms(12);
    let after = metrics().snapshot();
    assert!(after.reports_deleted > before.reports_deleted);
    assert!(after.query_latency_ms_total >= before.query_latency_ms_total + 12);
    assert!(after.query_latency_ms_count > before.query_latency_ms_count);
}
