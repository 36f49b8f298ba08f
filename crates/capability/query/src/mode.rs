//! 列表排序方式。

use domain::{ReportView, TriageError};
use std::cmp::Reverse;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortMode {
    /// 创建时间倒序
    #[default]
    Recency,
    /// 未处理在前，分区内创建时间倒序
    Triage,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Recency => "recency",
            SortMode::Triage => "triage",
        }
    }
}

impl FromStr for SortMode {
    type Err = TriageError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "recency" => Ok(SortMode::Recency),
            "triage" => Ok(SortMode::Triage),
            other => Err(TriageError::Validation(format!(
                "mode must be recency|triage, got {other:?}"
            ))),
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 按排序方式原地排序（稳定排序，键相同保持原有顺序）。
pub fn sort_reports(reports: &mut [ReportView], mode: SortMode) {
    match mode {
        SortMode::Recency => reports.sort_by_key(|view| Reverse(view.created_at())),
        SortMode::Triage => {
            reports.sort_by_key(|view| (view.status().triage_rank(), Reverse(view.created_at())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(" Triage ".parse::<SortMode>().expect("mode"), SortMode::Triage);
        assert_eq!("RECENCY".parse::<SortMode>().expect("mode"), SortMode::Recency);
        assert!(matches!(
            "oldest".parse::<SortMode>(),
            Err(TriageError::Validation(_))
        ));
    }
}
