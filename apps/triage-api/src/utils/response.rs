//! HTTP 响应辅助函数和 DTO 转换
//!
//! - 错误响应：bad_request_error, not_found_error, triage_error
//! - DTO 转换：report_to_dto, change_to_dto, building_to_dto, floor_to_dto, room_to_dto
//!
//! 错误分类与状态码：
//! - Validation → 400 INVALID.REQUEST
//! - NotFound → 404 RESOURCE.NOT_FOUND
//! - QueryFailed → 502 QUERY.FAILED
//! - StoreFailure → 502 STORE.FAILURE

use api_contract::{ApiResponse, BuildingDto, FloorDto, ReportChangeDto, ReportDto, RoomDto};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::SecondsFormat;
use domain::{Building, Floor, ReportChange, ReportView, Room, TriageError};
use tracing::warn;

fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<()>::error(code, message.into()))).into_response()
}

/// 错误请求响应
pub fn bad_request_error(message: impl Into<String>) -> Response {
    error_response(StatusCode::BAD_REQUEST, "INVALID.REQUEST", message)
}

/// 资源未找到错误响应
pub fn not_found_error(message: impl Into<String>) -> Response {
    error_response(StatusCode::NOT_FOUND, "RESOURCE.NOT_FOUND", message)
}

/// 领域错误响应
pub fn triage_error(err: TriageError) -> Response {
    let message = err.to_string();
    match err {
        TriageError::Validation(_) => bad_request_error(message),
        TriageError::NotFound(_) => not_found_error(message),
        TriageError::QueryFailed(_) => {
            warn!(target: "triage.api", error = %message, "query_failed");
            error_response(StatusCode::BAD_GATEWAY, "QUERY.FAILED", message)
        }
        TriageError::StoreFailure(_) => {
            warn!(target: "triage.api", error = %message, "store_failure");
            error_response(StatusCode::BAD_GATEWAY, "STORE.FAILURE", message)
        }
    }
}

/// ReportView 转 ReportDto
pub fn report_to_dto(view: ReportView) -> ReportDto {
    let building_name = view.location.building_name().map(str::to_string);
    let floor_name = view.location.floor_name().map(str::to_string);
    let room_name = view.location.room_name().map(str::to_string);
    let report = view.report;
    ReportDto {
        report_id: report.id,
        name: report.name,
        equipment: report.equipment,
        description: report.description,
        action_taken: report.action_taken,
        created_at: report
            .created_at
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        status: report.status.to_string(),
        room_id: report.room_id,
        building_name,
        floor_name,
        room_name,
    }
}

/// ReportChange 转 ReportChangeDto
pub fn change_to_dto(change: ReportChange) -> ReportChangeDto {
    match change {
        ReportChange::Updated {
            report_id,
            status,
            action_taken,
        } => ReportChangeDto {
            report_id,
            change: "updated".to_string(),
            status: Some(status.to_string()),
            action_taken,
        },
        ReportChange::Removed { report_id } => ReportChangeDto {
            report_id,
            change: "removed".to_string(),
            status: None,
            action_taken: None,
        },
    }
}

pub fn building_to_dto(building: &Building) -> BuildingDto {
    BuildingDto {
        building_id: building.id.clone(),
        name: building.name.clone(),
    }
}

pub fn floor_to_dto(floor: &Floor) -> FloorDto {
    FloorDto {
        floor_id: floor.id.clone(),
        building_id: floor.building_id.clone(),
        floor_name: floor.floor_name.clone(),
    }
}

pub fn room_to_dto(room: &Room) -> RoomDto {
    RoomDto {
        room_id: room.id.clone(),
        floor_id: room.floor_id.clone(),
        room_name: room.room_name.clone(),
    }
}
