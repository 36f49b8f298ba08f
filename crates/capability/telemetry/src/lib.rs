//! 追踪、请求 ID 与进程级计数器。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 计数器快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub queries_issued: u64,
    pub query_failures: u64,
    pub stale_responses_discarded: u64,
    pub query_latency_ms_total: u64,
    pub query_latency_ms_count: u64,
    pub reports_completed: u64,
    pub reports_deleted: u64,
    pub mutation_failures: u64,
}

/// 进程级计数器。
pub struct TelemetryMetrics {
    queries_issued: AtomicU64,
    query_failures: AtomicU64,
    stale_responses_discarded: AtomicU64,
    query_latency_ms_total: AtomicU64,
    query_latency_ms_count: AtomicU64,
    reports_completed: AtomicU64,
    reports_deleted: AtomicU64,
    mutation_failures: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            queries_issued: AtomicU64::new(0),
            query_failures: AtomicU64::new(0),
            stale_responses_discarded: AtomicU64::new(0),
            query_latency_ms_total: AtomicU64::new(0),
            query_latency_ms_count: AtomicU64::new(0),
            reports_completed: AtomicU64::new(0),
            reports_deleted: AtomicU64::new(0),
            mutation_failures: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_issued: self.queries_issued.load(Ordering::Relaxed),
            query_failures: self.query_failures.load(Ordering::Relaxed),
            stale_responses_discarded: self.stale_responses_discarded.load(Ordering::Relaxed),
            query_latency_ms_total: self.query_latency_ms_total.load(Ordering::Relaxed),
            query_latency_ms_count: self.query_latency_ms_count.load(Ordering::Relaxed),
            reports_completed: self.reports_completed.load(Ordering::Relaxed),
            reports_deleted: self.reports_deleted.load(Ordering::Relaxed),
            mutation_failures: self.mutation_failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局计数器实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录报修单查询次数。
pub fn record_query_issued() {
    metrics().queries_issued.fetch_add(1, Ordering::Relaxed);
}

/// 记录查询失败次数。
pub fn record_query_failure() {
    metrics().query_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录被丢弃的过期查询结果。
pub fn record_stale_response() {
    metrics()
        .stale_responses_discarded
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录查询耗时（毫秒）。
pub fn record_query_latency_ms(latency_ms: u64) {
    let metrics = metrics();
    metrics
        .query_latency_ms_total
        .fetch_add(latency_ms, Ordering::Relaxed);
    metrics
        .query_latency_ms_count
        .fetch_add(1, Ordering::Relaxed);
}

pub fn record_report_completed() {
    metrics().reports_completed.fetch_add(1, Ordering::Relaxed);
}

pub fn record_report_deleted() {
    metrics().reports_deleted.fetch_add(1, Ordering::Relaxed);
}

/// 记录完成/删除操作的存储失败。
pub fn record_mutation_failure() {
    metrics().mutation_failures.fetch_add(1, Ordering::Relaxed);
}
