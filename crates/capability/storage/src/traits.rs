//! 存储适配器 Trait 定义
//!
//! 核心只依赖这一窄接口，而不依赖任何具体存储的查询语言：
//! - select：表 + join 链 + 谓词 + 排序 → 行列表
//! - update：表 + 行 ID + 部分字段 → 更新后的行（不存在为 None）
//! - delete：表 + 行 ID → 是否删除
//!
//! 每次调用对应一次原子请求，不做批量或流水线。

use crate::error::StorageError;
use crate::models::{Row, Table};
use crate::request::{FieldSet, SelectRequest};
use async_trait::async_trait;

/// 存储适配器接口
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// 读取满足条件的行
    async fn select(&self, request: &SelectRequest) -> Result<Vec<Row>, StorageError>;

    /// 按主键更新部分字段
    async fn update(
        &self,
        table: Table,
        id: &str,
        fields: &FieldSet,
    ) -> Result<Option<Row>, StorageError>;

    /// 按主键物理删除
    async fn delete(&self, table: Table, id: &str) -> Result<bool, StorageError>;
}
