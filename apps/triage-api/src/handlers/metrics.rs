//! 计数器快照
//!
//! - GET /metrics

use api_contract::{ApiResponse, MetricsSnapshotDto};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use triage_telemetry::metrics;

pub async fn get_metrics() -> Response {
    let snapshot = metrics().snapshot();
    let query_latency_ms_avg = snapshot
        .query_latency_ms_total
        .checked_div(snapshot.query_latency_ms_count);
    (
        StatusCode::OK,
        Json(ApiResponse::success(MetricsSnapshotDto {
            queries_issued: snapshot.queries_issued,
            query_failures: snapshot.query_failures,
            stale_responses_discarded: snapshot.stale_responses_discarded,
            query_latency_ms_avg,
            reports_completed: snapshot.reports_completed,
            reports_deleted: snapshot.reports_deleted,
            mutation_failures: snapshot.mutation_failures,
        })),
    )
        .into_response()
}
