//! 通用内存存储实现
//!
//! 仅用于本地演示和测试。
//!
//! 功能：
//! - 按表保存 JSON 行，保持插入顺序
//! - 按 join 链逐层嵌入关联行（缺失时嵌入 null）
//! - 谓词求值与排序（空值排最后）

use crate::error::StorageError;
use crate::models::{ColumnKind, PRIMARY_KEY, Row, Table};
use crate::request::{FieldSet, FieldValue, OrderBy, Predicate, Relation, SelectRequest};
use crate::traits::RecordStore;
use crate::validation::{ensure_fields, ensure_select};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::RwLock;

/// 内存存储
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储。
pub struct InMemoryRecordStore {
    tables: RwLock<HashMap<Table, Vec<Row>>>,
}

impl InMemoryRecordStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// 插入一条记录（序列化为 JSON 对象）
    pub fn insert<T: Serialize>(&self, table: Table, record: &T) -> Result<(), StorageError> {
        let Value::Object(row) = serde_json::to_value(record)? else {
            return Err(StorageError::new("record must serialize to an object"));
        };
        let id = row
            .get(PRIMARY_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| StorageError::new("record id required"))?
            .to_string();
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let rows = tables.entry(table).or_default();
        if rows.iter().any(|item| row_id(item) == Some(id.as_str())) {
            return Err(StorageError::new(format!("{table} {id} exists")));
        }
        rows.push(row);
        Ok(())
    }

    /// 当前表内行数（用于测试）
    pub fn len(&self, table: Table) -> usize {
        self.tables
            .read()
            .map(|tables| tables.get(&table).map(Vec::len).unwrap_or(0))
            .unwrap_or(0)
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

fn row_id(row: &Row) -> Option<&str> {
    row.get(PRIMARY_KEY).and_then(Value::as_str)
}

fn embed(tables: &HashMap<Table, Vec<Row>>, parent: &mut Row, chain: &[Relation]) {
    let Some((relation, rest)) = chain.split_first() else {
        return;
    };
    let child = parent
        .get(relation.foreign_key)
        .and_then(Value::as_str)
        .and_then(|key| {
            tables
                .get(&relation.table)
                .and_then(|rows| rows.iter().find(|row| row_id(row) == Some(key)))
        })
        .cloned();
    let value = match child {
        Some(mut child) => {
            embed(tables, &mut child, rest);
            Value::Object(child)
        }
        None => Value::Null,
    };
    parent.insert(relation.embed_as.to_string(), value);
}

fn lookup<'a>(row: &'a Row, path: &[&str], name: &str) -> Option<&'a Value> {
    let mut current = row;
    for segment in path {
        current = current.get(*segment)?.as_object()?;
    }
    current.get(name).filter(|value| !value.is_null())
}

fn parse_ts(value: &Value) -> Option<DateTime<Utc>> {
    value
        .as_str()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|ts| ts.with_timezone(&Utc))
}

fn matches(request: &SelectRequest, row: &Row, predicate: &Predicate) -> bool {
    let column = predicate.column();
    let Some(path) = request.join.path_to(request.table, column.table) else {
        return false;
    };
    let Some(value) = lookup(row, &path, column.name) else {
        return false;
    };
    match predicate {
        Predicate::Eq { value: expected, .. } => value.as_str() == Some(expected.as_str()),
        Predicate::Gte { value: bound, .. } => parse_ts(value).is_some_and(|ts| ts >= *bound),
        Predicate::Lte { value: bound, .. } => parse_ts(value).is_some_and(|ts| ts <= *bound),
    }
}

fn compare(request: &SelectRequest, order: &OrderBy, a: &Row, b: &Row) -> Ordering {
    let column = order.column;
    let path = request
        .join
        .path_to(request.table, column.table)
        .unwrap_or_default();
    let kind = column
        .table
        .column(column.name)
        .map(|def| def.kind)
        .unwrap_or(ColumnKind::Text);
    let left = lookup(a, &path, column.name);
    let right = lookup(b, &path, column.name);
    let ordering = match (left, right) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(left), Some(right)) => match kind {
            ColumnKind::Timestamp => parse_ts(left).cmp(&parse_ts(right)),
            _ => left.as_str().cmp(&right.as_str()),
        },
    };
    if order.descending {
        ordering.reverse()
    } else {
        ordering
    }
}

#[async_trait::async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn select(&self, request: &SelectRequest) -> Result<Vec<Row>, StorageError> {
        ensure_select(request)?;
        let tables = self
            .tables
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        let mut selected = Vec::new();
        for row in tables.get(&request.table).into_iter().flatten() {
            let mut joined = row.clone();
            embed(&tables, &mut joined, &request.join.chain);
            if request
                .predicates
                .iter()
                .all(|predicate| matches(request, &joined, predicate))
            {
                selected.push(joined);
            }
        }
        // 稳定排序：同序键保持插入顺序
        selected.sort_by(|a, b| {
            request
                .order
                .iter()
                .map(|order| compare(request, order, a, b))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });
        Ok(selected)
    }

    async fn update(
        &self,
        table: Table,
        id: &str,
        fields: &FieldSet,
    ) -> Result<Option<Row>, StorageError> {
        ensure_fields(table, fields)?;
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let row = match tables
            .get_mut(&table)
            .and_then(|rows| rows.iter_mut().find(|row| row_id(row) == Some(id)))
        {
            Some(row) => row,
            None => return Ok(None),
        };
        for (name, value) in fields.iter() {
            let value = match value {
                FieldValue::Text(text) => Value::String(text.clone()),
                FieldValue::Null => Value::Null,
            };
            row.insert(name.to_string(), value);
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, table: Table, id: &str) -> Result<bool, StorageError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let Some(rows) = tables.get_mut(&table) else {
            return Ok(false);
        };
        match rows.iter().position(|row| row_id(row) == Some(id)) {
            Some(index) => {
                rows.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
