//! 报修单 handlers
//!
//! - GET /reports/today - 今日报修单（默认分诊排序）
//! - GET /reports - 按日期/楼宇/楼层/房间/状态筛选（默认时间倒序，空参数不施加约束）
//! - POST /reports/{id}/complete - 标记完成（可附处理说明）
//! - DELETE /reports/{id}?confirm=true - 删除
//!
//! 完成与删除都要求请求中显式确认。

use crate::AppState;
use crate::utils::response::{bad_request_error, triage_error};
use crate::utils::{
    change_to_dto, normalize_optional, parse_date, parse_mode, parse_status, report_to_dto,
};
use api_contract::{
    ApiResponse, CompleteReportRequest, DeleteReportQuery, ReportDto, ReportListDto,
    ReportsQuery, TodayReportsQuery,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::FilterCriteria;
use triage_lifecycle::{COMPLETE_WARNING, Confirmation, DELETE_WARNING};
use triage_query::ReportQuery;

#[derive(serde::Deserialize)]
pub struct ReportPath {
    report_id: String,
}

/// 今日报修单
pub async fn list_today_reports(
    State(state): State<AppState>,
    Query(query): Query<TodayReportsQuery>,
) -> Response {
    let mode = match parse_mode(query.mode, state.today_sort) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let criteria = FilterCriteria::today(state.composer.zone());
    run_query(&state, ReportQuery::new(criteria, mode)).await
}

/// 筛选报修单
pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ReportsQuery>,
) -> Response {
    let mode = match parse_mode(query.mode, state.history_sort) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let date = match parse_date(query.date) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let status = match parse_status(query.status) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let criteria = FilterCriteria {
        date,
        building_id: normalize_optional(query.building_id),
        floor_id: normalize_optional(query.floor_id),
        room_id: normalize_optional(query.room_id),
    };

    let mut report_query = ReportQuery::new(criteria, mode);
    report_query.status = status;
    run_query(&state, report_query).await
}

async fn run_query(state: &AppState, query: ReportQuery) -> Response {
    match state.composer.fetch(&query).await {
        Ok(reports) => {
            let items: Vec<ReportDto> = reports.into_iter().map(report_to_dto).collect();
            let data = ReportListDto {
                mode: query.mode.to_string(),
                date: query.criteria.date.map(|date| date.to_string()),
                items,
            };
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => triage_error(err),
    }
}

/// 标记完成
pub async fn complete_report(
    State(state): State<AppState>,
    Path(path): Path<ReportPath>,
    Json(req): Json<CompleteReportRequest>,
) -> Response {
    let confirmation = match Confirmation::from_user(req.confirm) {
        Ok(value) => value,
        Err(_) => {
            return bad_request_error(format!("confirmation required: {COMPLETE_WARNING}"));
        }
    };
    match state
        .lifecycle
        .mark_completed(&path.report_id, req.action_taken, confirmation)
        .await
    {
        Ok(change) => (
            StatusCode::OK,
            Json(ApiResponse::success(change_to_dto(change))),
        )
            .into_response(),
        Err(err) => triage_error(err),
    }
}

/// 删除报修单
pub async fn delete_report(
    State(state): State<AppState>,
    Path(path): Path<ReportPath>,
    Query(query): Query<DeleteReportQuery>,
) -> Response {
    let confirmation = match Confirmation::from_user(query.confirm) {
        Ok(value) => value,
        Err(_) => return bad_request_error(format!("confirmation required: {DELETE_WARNING}")),
    };
    match state.lifecycle.delete(&path.report_id, confirmation).await {
        Ok(change) => (
            StatusCode::OK,
            Json(ApiResponse::success(change_to_dto(change))),
        )
            .into_response(),
        Err(err) => triage_error(err),
    }
}
