//! 稳定的 DTO 与 API 响应契约。

use serde::{Deserialize, Serialize};

/// 标准 API 响应封装。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

/// 报修单返回结构（含解析出的层级名称，关联缺失时为 null）。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDto {
    pub report_id: String,
    pub name: String,
    pub equipment: String,
    pub description: String,
    pub action_taken: Option<String>,
    /// RFC 3339（毫秒，UTC）
    pub created_at: String,
    pub status: String,
    pub room_id: String,
    pub building_name: Option<String>,
    pub floor_name: Option<String>,
    pub room_name: Option<String>,
}

/// 报修单列表。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportListDto {
    pub mode: String,
    /// 生效的日期筛选（YYYY-MM-DD）
    pub date: Option<String>,
    pub items: Vec<ReportDto>,
}

/// 今日列表查询参数。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayReportsQuery {
    pub mode: Option<String>,
}

/// 报修单列表查询参数。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportsQuery {
    pub date: Option<String>,
    pub building_id: Option<String>,
    pub floor_id: Option<String>,
    pub room_id: Option<String>,
    pub status: Option<String>,
    pub mode: Option<String>,
}

/// 标记完成请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteReportRequest {
    #[serde(alias = "action_taken")]
    pub action_taken: Option<String>,
    #[serde(default)]
    pub confirm: bool,
}

/// 删除请求参数。
#[derive(Debug, Default, Deserialize)]
pub struct DeleteReportQuery {
    #[serde(default)]
    pub confirm: bool,
}

/// 生命周期操作结果：本次精确改动的内容。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportChangeDto {
    pub report_id: String,
    /// `updated` | `removed`
    pub change: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_taken: Option<String>,
}

/// 楼宇返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingDto {
    pub building_id: String,
    pub name: String,
}

/// 楼层返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorDto {
    pub floor_id: String,
    pub building_id: String,
    pub floor_name: String,
}

/// 房间返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDto {
    pub room_id: String,
    pub floor_id: String,
    pub room_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorsQuery {
    pub building_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomsQuery {
    pub floor_id: Option<String>,
}

/// 下拉联动选择参数。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionQuery {
    pub building_id: Option<String>,
    pub floor_id: Option<String>,
    pub room_id: Option<String>,
}

/// 规范化后的下拉选择及各级可选项。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSelectionDto {
    pub building_id: Option<String>,
    pub floor_id: Option<String>,
    pub room_id: Option<String>,
    pub buildings: Vec<BuildingDto>,
    pub floors: Vec<FloorDto>,
    pub rooms: Vec<RoomDto>,
}

/// 计数器快照。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshotDto {
    pub queries_issued: u64,
    pub query_failures: u64,
    pub stale_responses_discarded: u64,
    pub query_latency_ms_avg: Option<u64>,
    pub reports_completed: u64,
    pub reports_deleted: u64,
    pub mutation_failures: u64,
}
