//! 报修单实体与状态。

use crate::error::TriageError;
use crate::location::LocationPath;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 报修单状态。
///
/// `Pending` 为创建时的初始状态；`Completed` 可重复进入（用于修改处理说明），
/// 不存在回到 `Pending` 的流转。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Completed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Completed => "completed",
        }
    }

    /// 分诊排序中的分区序号：未处理在前。
    pub fn triage_rank(&self) -> u8 {
        match self {
            ReportStatus::Pending => 0,
            ReportStatus::Completed => 1,
        }
    }
}

impl FromStr for ReportStatus {
    type Err = TriageError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ReportStatus::Pending),
            "completed" => Ok(ReportStatus::Completed),
            other => Err(TriageError::Validation(format!(
                "status must be pending|completed, got {other:?}"
            ))),
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 报修单记录（`room_id` 为唯一外键）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    /// 报修人
    pub name: String,
    pub equipment: String,
    pub description: String,
    /// 处理说明，处理后才有值
    #[serde(default)]
    pub action_taken: Option<String>,
    pub created_at: DateTime<Utc>,
    pub status: ReportStatus,
    pub room_id: String,
}

/// 列表展示用的报修单：记录本身 + 解析出的层级路径。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportView {
    pub report: Report,
    pub location: LocationPath,
}

impl ReportView {
    pub fn id(&self) -> &str {
        &self.report.id
    }

    pub fn status(&self) -> ReportStatus {
        self.report.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.report.created_at
    }
}
