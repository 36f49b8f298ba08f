//! 查询组合：筛选条件 → 存储读请求 → 排好序的报修单列表。

use crate::decode::decode_report;
use crate::mode::{SortMode, sort_reports};
use domain::{DayZone, FilterCriteria, ReportStatus, ReportView, TriageError};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use triage_storage::{ColumnRef, JoinSpec, Predicate, RecordStore, Relation, SelectRequest, Table};

const CREATED_AT: ColumnRef = ColumnRef::new(Table::Reports, "created_at");

/// 一次报修单查询。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportQuery {
    pub criteria: FilterCriteria,
    /// `None` 表示全部状态
    pub status: Option<ReportStatus>,
    pub mode: SortMode,
}

impl ReportQuery {
    pub fn new(criteria: FilterCriteria, mode: SortMode) -> Self {
        Self {
            criteria,
            status: None,
            mode,
        }
    }

    pub fn with_status(mut self, status: ReportStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// 报修单 → 房间 → 楼层 → 楼宇 的固定关联链。
pub fn report_location_join() -> JoinSpec {
    JoinSpec::chain(vec![
        Relation {
            table: Table::Rooms,
            foreign_key: "room_id",
            embed_as: "room",
        },
        Relation {
            table: Table::Floors,
            foreign_key: "floor_id",
            embed_as: "floor",
        },
        Relation {
            table: Table::Buildings,
            foreign_key: "building_id",
            embed_as: "building",
        },
    ])
}

/// 查询组合器。
///
/// 不持有任何列表状态，每次调用对应一次存储读请求。
#[derive(Clone)]
pub struct ReportQueryComposer {
    store: Arc<dyn RecordStore>,
    zone: DayZone,
}

impl ReportQueryComposer {
    /// `zone` 决定“本地自然日”的含义，每个日期按各自的偏移解析。
    pub fn new(store: Arc<dyn RecordStore>, zone: DayZone) -> Self {
        Self { store, zone }
    }

    pub fn zone(&self) -> DayZone {
        self.zone
    }

    /// 构造读请求：各条件之间为 AND，未设置的条件不施加约束。
    pub fn compose(&self, query: &ReportQuery) -> Result<SelectRequest, TriageError> {
        let criteria = &query.criteria;
        let mut request = SelectRequest::from_table(Table::Reports).join(report_location_join());

        if let Some(date) = criteria.date {
            let window = self.zone.window(date)?;
            request = request
                .filter(Predicate::Gte {
                    column: CREATED_AT,
                    value: window.start,
                })
                .filter(Predicate::Lte {
                    column: CREATED_AT,
                    value: window.end,
                });
        }
        if let Some(building_id) = &criteria.building_id {
            request = request.filter(Predicate::Eq {
                column: ColumnRef::new(Table::Floors, "building_id"),
                value: building_id.clone(),
            });
        }
        if let Some(floor_id) = &criteria.floor_id {
            request = request.filter(Predicate::Eq {
                column: ColumnRef::new(Table::Rooms, "floor_id"),
                value: floor_id.clone(),
            });
        }
        if let Some(room_id) = &criteria.room_id {
            request = request.filter(Predicate::Eq {
                column: ColumnRef::new(Table::Reports, "room_id"),
                value: room_id.clone(),
            });
        }
        if let Some(status) = query.status {
            request = request.filter(Predicate::Eq {
                column: ColumnRef::new(Table::Reports, "status"),
                value: status.as_str().to_string(),
            });
        }
        Ok(request.order_by(CREATED_AT, true))
    }

    /// 执行查询。存储失败返回 `QueryFailed`，不会返回部分结果。
    pub async fn fetch(&self, query: &ReportQuery) -> Result<Vec<ReportView>, TriageError> {
        let request = self.compose(query)?;
        triage_telemetry::record_query_issued();
        let started = Instant::now();
        let rows = self.store.select(&request).await;
        triage_telemetry::record_query_latency_ms(started.elapsed().as_millis() as u64);

        let rows = match rows {
            Ok(rows) => rows,
            Err(err) => {
                triage_telemetry::record_query_failure();
                warn!(
                    target: "triage.query",
                    mode = %query.mode,
                    timed_out = err.is_timeout(),
                    error = %err,
                    "report_query_failed"
                );
                return Err(TriageError::QueryFailed(err.to_string()));
            }
        };

        let mut reports = rows
            .into_iter()
            .map(decode_report)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|_| triage_telemetry::record_query_failure())?;
        sort_reports(&mut reports, query.mode);
        debug!(
            target: "triage.query",
            mode = %query.mode,
            rows = reports.len(),
            "report_query_completed"
        );
        Ok(reports)
    }

    /// 今天（本地时区）的报修单。
    pub async fn today(&self, mode: SortMode) -> Result<Vec<ReportView>, TriageError> {
        let query = ReportQuery::new(FilterCriteria::today(self.zone), mode);
        self.fetch(&query).await
    }
}
