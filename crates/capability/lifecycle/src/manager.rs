use crate::confirmation::Confirmation;
use domain::{ReportChange, ReportStatus, TriageError};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};
use triage_storage::{FieldSet, RecordStore, StorageError, Table};

/// 报修单生命周期操作，每次操作对应一次存储写请求。
#[derive(Clone)]
pub struct LifecycleManager {
    store: Arc<dyn RecordStore>,
}

impl LifecycleManager {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// 标记为已处理。
    ///
    /// 给出处理说明时覆盖 `action_taken`，未给出时保留原值；
    /// 对已处理的报修单可重复调用，同一说明重复调用结果不变。
    pub async fn mark_completed(
        &self,
        report_id: &str,
        action_note: Option<String>,
        _confirmation: Confirmation,
    ) -> Result<ReportChange, TriageError> {
        let report_id = required_id(report_id)?;
        let mut fields = FieldSet::new().text("status", ReportStatus::Completed.as_str());
        if let Some(note) = action_note {
            let note = note.trim();
            if note.is_empty() {
                return Err(TriageError::Validation(
                    "action note must not be blank".to_string(),
                ));
            }
            fields = fields.text("action_taken", note);
        }

        let row = match self.store.update(Table::Reports, report_id, &fields).await {
            Ok(Some(row)) => row,
            Ok(None) => return Err(not_found(report_id)),
            Err(err) => return Err(store_failure("complete", report_id, err)),
        };

        let action_taken = row
            .get("action_taken")
            .and_then(Value::as_str)
            .map(str::to_string);
        triage_telemetry::record_report_completed();
        info!(
            target: "triage.lifecycle",
            report_id = %report_id,
            has_action = action_taken.is_some(),
            "report_completed"
        );
        Ok(ReportChange::Updated {
            report_id: report_id.to_string(),
            status: ReportStatus::Completed,
            action_taken,
        })
    }

    /// 物理删除，与当前状态无关。
    pub async fn delete(
        &self,
        report_id: &str,
        _confirmation: Confirmation,
    ) -> Result<ReportChange, TriageError> {
        let report_id = required_id(report_id)?;
        match self.store.delete(Table::Reports, report_id).await {
            Ok(true) => {
                triage_telemetry::record_report_deleted();
                info!(target: "triage.lifecycle", report_id = %report_id, "report_deleted");
                Ok(ReportChange::Removed {
                    report_id: report_id.to_string(),
                })
            }
            Ok(false) => Err(not_found(report_id)),
            Err(err) => Err(store_failure("delete", report_id, err)),
        }
    }
}

fn required_id(report_id: &str) -> Result<&str, TriageError> {
    let trimmed = report_id.trim();
    if trimmed.is_empty() {
        return Err(TriageError::Validation("report_id required".to_string()));
    }
    Ok(trimmed)
}

fn not_found(report_id: &str) -> TriageError {
    warn!(target: "triage.lifecycle", report_id = %report_id, "report_not_found");
    TriageError::NotFound(report_id.to_string())
}

fn store_failure(operation: &str, report_id: &str, err: StorageError) -> TriageError {
    triage_telemetry::record_mutation_failure();
    warn!(
        target: "triage.lifecycle",
        operation,
        report_id = %report_id,
        timed_out = err.is_timeout(),
        error = %err,
        "report_mutation_failed"
    );
    TriageError::StoreFailure(err.to_string())
}
