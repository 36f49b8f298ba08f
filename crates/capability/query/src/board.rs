//! 过期响应丢弃
//!
//! 新发出的查询取代旧查询：每次查询领取单调递增的 [`QueryTicket`]，
//! 晚于新查询返回的旧响应会被丢弃，不会覆盖较新的列表。

use crate::mode::{SortMode, sort_reports};
use domain::{ReportChange, ReportView, TriageError};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// 查询序号。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryTicket(u64);

impl QueryTicket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// 序号发放器，可在多个任务间共享。
#[derive(Debug, Default)]
pub struct QuerySequencer {
    last: AtomicU64,
}

impl QuerySequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> QueryTicket {
        QueryTicket(self.last.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// 最近一次发放的序号。
    pub fn latest(&self) -> QueryTicket {
        QueryTicket(self.last.load(Ordering::Relaxed))
    }

    /// 只有最新发放的序号才算当前查询。
    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        ticket >= self.latest()
    }
}

/// 调用方持有的报修单列表。
///
/// 查询失败时展示错误并清空列表；生命周期操作成功后用 [`ReportChange`] 同步。
#[derive(Debug, Default)]
pub struct ReportBoard {
    sequencer: QuerySequencer,
    mode: SortMode,
    reports: Vec<ReportView>,
    error: Option<TriageError>,
}

impl ReportBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 发起新查询，之前未返回的查询全部作废。
    pub fn begin(&mut self, mode: SortMode) -> QueryTicket {
        self.mode = mode;
        self.sequencer.issue()
    }

    /// 接收查询结果，过期结果返回 `false` 且不改变列表。
    pub fn accept(
        &mut self,
        ticket: QueryTicket,
        outcome: Result<Vec<ReportView>, TriageError>,
    ) -> bool {
        if !self.sequencer.is_current(ticket) {
            triage_telemetry::record_stale_response();
            debug!(
                target: "triage.query",
                ticket = ticket.value(),
                latest = self.sequencer.latest().value(),
                "stale_response_discarded"
            );
            return false;
        }
        match outcome {
            Ok(reports) => {
                self.reports = reports;
                self.error = None;
            }
            Err(err) => {
                self.reports.clear();
                self.error = Some(err);
            }
        }
        true
    }

    /// 同步一次成功的生命周期变更，返回是否命中列表中的报修单。
    pub fn apply_change(&mut self, change: &ReportChange) -> bool {
        let hit = change.apply(&mut self.reports);
        if hit {
            sort_reports(&mut self.reports, self.mode);
        }
        hit
    }

    pub fn reports(&self) -> &[ReportView] {
        &self.reports
    }

    pub fn error(&self) -> Option<&TriageError> {
        self.error.as_ref()
    }

    pub fn mode(&self) -> SortMode {
        self.mode
    }
}
