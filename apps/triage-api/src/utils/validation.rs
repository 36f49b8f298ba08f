//! 输入验证辅助函数
//!
//! - normalize_optional：可选查询参数去除空格，空值视为未提供
//! - parse_mode / parse_date / parse_status：查询参数解析
//!
//! 清空的输入框或“全部”下拉项会提交空值，与不提交同义，不施加约束。
//! 解析失败返回 bad_request_error 响应

use crate::utils::response::triage_error;
use axum::response::Response;
use chrono::NaiveDate;
use domain::{ReportStatus, parse_calendar_date};
use triage_query::SortMode;

/// 可选查询参数：去除空格，空值视为未提供
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// 排序方式，未提供时使用默认值
pub fn parse_mode(value: Option<String>, default: SortMode) -> Result<SortMode, Response> {
    match normalize_optional(value) {
        Some(value) => value.parse().map_err(triage_error),
        None => Ok(default),
    }
}

/// YYYY-MM-DD 日期
pub fn parse_date(value: Option<String>) -> Result<Option<NaiveDate>, Response> {
    normalize_optional(value)
        .map(|value| parse_calendar_date(&value).map_err(triage_error))
        .transpose()
}

pub fn parse_status(value: Option<String>) -> Result<Option<ReportStatus>, Response> {
    normalize_optional(value)
        .map(|value| value.parse::<ReportStatus>().map_err(triage_error))
        .transpose()
}
