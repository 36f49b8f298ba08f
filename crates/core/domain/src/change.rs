//! 状态变更通知：告知调用方本次操作精确改动了哪些字段。
//!
//! 调用方据此同步内存中的列表，无需整表重新拉取。

use crate::report::{ReportStatus, ReportView};

/// 一次成功的生命周期操作产生的变更。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportChange {
    /// 状态与处理说明被更新（`action_taken` 为操作后的值）。
    Updated {
        report_id: String,
        status: ReportStatus,
        action_taken: Option<String>,
    },
    /// 报修单被物理删除。
    Removed { report_id: String },
}

impl ReportChange {
    pub fn report_id(&self) -> &str {
        match self {
            ReportChange::Updated { report_id, .. } | ReportChange::Removed { report_id } => {
                report_id
            }
        }
    }

    /// 将变更应用到调用方持有的列表，返回是否命中。
    pub fn apply(&self, reports: &mut Vec<ReportView>) -> bool {
        match self {
            ReportChange::Updated {
                report_id,
                status,
                action_taken,
            } => match reports.iter_mut().find(|view| view.report.id == *report_id) {
                Some(view) => {
                    view.report.status = *status;
                    view.report.action_taken = action_taken.clone();
                    true
                }
                None => false,
            },
            ReportChange::Removed { report_id } => {
                let before = reports.len();
                reports.retain(|view| view.report.id != *report_id);
                reports.len() != before
            }
        }
    }
}
