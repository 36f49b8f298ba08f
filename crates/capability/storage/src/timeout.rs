//! 请求超时包装
//!
//! 为任意存储适配器加上单次请求的时间预算。超出预算视为存储失败，
//! 与其他存储错误走同一条返回路径。

use crate::error::StorageError;
use crate::models::{Row, Table};
use crate::request::{FieldSet, SelectRequest};
use crate::traits::RecordStore;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// 带超时的存储适配器。
pub struct TimeoutStore {
    inner: Arc<dyn RecordStore>,
    budget: Duration,
}

impl TimeoutStore {
    pub fn new(inner: Arc<dyn RecordStore>, budget: Duration) -> Self {
        Self { inner, budget }
    }
}

async fn within<T>(
    budget: Duration,
    operation: &str,
    future: impl Future<Output = Result<T, StorageError>>,
) -> Result<T, StorageError> {
    match tokio::time::timeout(budget, future).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                target: "triage.storage",
                operation,
                budget_ms = budget.as_millis() as u64,
                "store_request_timed_out"
            );
            Err(StorageError::timed_out(format!(
                "{operation} timed out after {}ms",
                budget.as_millis()
            )))
        }
    }
}

#[async_trait::async_trait]
impl RecordStore for TimeoutStore {
    async fn select(&self, request: &SelectRequest) -> Result<Vec<Row>, StorageError> {
        within(self.budget, "select", self.inner.select(request)).await
    }

    async fn update(
        &self,
        table: Table,
        id: &str,
        fields: &FieldSet,
    ) -> Result<Option<Row>, StorageError> {
        within(self.budget, "update", self.inner.update(table, id, fields)).await
    }

    async fn delete(&self, table: Table, id: &str) -> Result<bool, StorageError> {
        within(self.budget, "delete", self.inner.delete(table, id)).await
    }
}
