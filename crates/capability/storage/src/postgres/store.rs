//! Postgres 通用存储实现
//!
//! 把读请求翻译成一条 `select ... left join ... where ... order by ...`，
//! 每层关联表的列以 `t{n}__{column}` 别名取回后还原为嵌套对象。

use crate::connection::PoolSettings;
use crate::error::StorageError;
use crate::models::{ColumnKind, Row, Table};
use crate::request::{FieldSet, FieldValue, Predicate, SelectRequest};
use crate::traits::RecordStore;
use crate::validation::{ensure_fields, ensure_select};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row as _};

pub struct PgRecordStore {
    pub pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, settings: PoolSettings) -> Result<Self, StorageError> {
        let pool = crate::connection::connect_pool(database_url, settings).await?;
        Ok(Self { pool })
    }
}

/// 结果中每一层表（根表为第 0 层）。
fn levels(request: &SelectRequest) -> Vec<Table> {
    std::iter::once(request.table)
        .chain(request.join.chain.iter().map(|relation| relation.table))
        .collect()
}

fn level_of(levels: &[Table], table: Table) -> usize {
    levels.iter().position(|item| *item == table).unwrap_or(0)
}

fn select_sql(request: &SelectRequest) -> String {
    let levels = levels(request);
    let mut columns = Vec::new();
    for (level, table) in levels.iter().enumerate() {
        for column in table.columns() {
            columns.push(format!("t{level}.{name} as t{level}__{name}", name = column.name));
        }
    }
    let mut sql = format!("select {} from {} t0", columns.join(", "), request.table.name());
    for (index, relation) in request.join.chain.iter().enumerate() {
        let child = index + 1;
        sql.push_str(&format!(
            " left join {table} t{child} on t{child}.id = t{index}.{key}",
            table = relation.table.name(),
            key = relation.foreign_key
        ));
    }
    let clauses: Vec<String> = request
        .predicates
        .iter()
        .enumerate()
        .map(|(index, predicate)| {
            let column = predicate.column();
            let op = match predicate {
                Predicate::Eq { .. } => "=",
                Predicate::Gte { .. } => ">=",
                Predicate::Lte { .. } => "<=",
            };
            format!(
                "t{}.{} {op} ${}",
                level_of(&levels, column.table),
                column.name,
                index + 1
            )
        })
        .collect();
    if !clauses.is_empty() {
        sql.push_str(" where ");
        sql.push_str(&clauses.join(" and "));
    }
    let order: Vec<String> = request
        .order
        .iter()
        .map(|order| {
            format!(
                "t{}.{} {} nulls last",
                level_of(&levels, order.column.table),
                order.column.name,
                if order.descending { "desc" } else { "asc" }
            )
        })
        .collect();
    if !order.is_empty() {
        sql.push_str(" order by ");
        sql.push_str(&order.join(", "));
    }
    sql
}

/// 读取某一层的列；主键为空（left join 未命中）时返回 None。
fn decode_level(row: &PgRow, table: Table, prefix: &str) -> Result<Option<Row>, StorageError> {
    let id: Option<String> = row.try_get(format!("{prefix}id").as_str())?;
    if id.is_none() {
        return Ok(None);
    }
    let mut object = Row::new();
    for column in table.columns() {
        let key = format!("{prefix}{}", column.name);
        let value = match column.kind {
            ColumnKind::Text | ColumnKind::OptionalText => row
                .try_get::<Option<String>, _>(key.as_str())?
                .map(Value::String),
            ColumnKind::Timestamp => row
                .try_get::<Option<DateTime<Utc>>, _>(key.as_str())?
                .map(|ts| Value::String(ts.to_rfc3339_opts(SecondsFormat::Millis, true))),
        };
        object.insert(column.name.to_string(), value.unwrap_or(Value::Null));
    }
    Ok(Some(object))
}

fn decode_joined(request: &SelectRequest, row: &PgRow) -> Result<Row, StorageError> {
    let levels = levels(request);
    let mut nested = Value::Null;
    for level in (1..levels.len()).rev() {
        nested = match decode_level(row, levels[level], &format!("t{level}__"))? {
            Some(mut object) => {
                if let Some(relation) = request.join.chain.get(level) {
                    object.insert(relation.embed_as.to_string(), nested);
                }
                Value::Object(object)
            }
            None => Value::Null,
        };
    }
    let mut root = decode_level(row, request.table, "t0__")?
        .ok_or_else(|| StorageError::new(format!("{} row without id", request.table)))?;
    if let Some(relation) = request.join.chain.first() {
        root.insert(relation.embed_as.to_string(), nested);
    }
    Ok(root)
}

#[async_trait::async_trait]
impl RecordStore for PgRecordStore {
    async fn select(&self, request: &SelectRequest) -> Result<Vec<Row>, StorageError> {
        ensure_select(request)?;
        let sql = select_sql(request);
        let mut query = sqlx::query(&sql);
        for predicate in &request.predicates {
            query = match predicate {
                Predicate::Eq { value, .. } => query.bind(value.clone()),
                Predicate::Gte { value, .. } | Predicate::Lte { value, .. } => query.bind(*value),
            };
        }
        let rows = query.fetch_all(&self.pool).await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(decode_joined(request, &row)?);
        }
        Ok(items)
    }

    async fn update(
        &self,
        table: Table,
        id: &str,
        fields: &FieldSet,
    ) -> Result<Option<Row>, StorageError> {
        ensure_fields(table, fields)?;
        let assignments: Vec<String> = fields
            .iter()
            .enumerate()
            .map(|(index, (name, _))| format!("{name} = ${}", index + 1))
            .collect();
        let returning: Vec<&str> = table.columns().iter().map(|column| column.name).collect();
        let sql = format!(
            "update {} set {} where id = ${} returning {}",
            table.name(),
            assignments.join(", "),
            assignments.len() + 1,
            returning.join(", ")
        );
        let mut query = sqlx::query(&sql);
        for (_, value) in fields.iter() {
            query = match value {
                FieldValue::Text(text) => query.bind(Some(text.clone())),
                FieldValue::Null => query.bind(None::<String>),
            };
        }
        let row = query.bind(id).fetch_optional(&self.pool).await?;
        let Some(row) = row else {
            return Ok(None);
        };
        decode_level(&row, table, "")
    }

    async fn delete(&self, table: Table, id: &str) -> Result<bool, StorageError> {
        let sql = format!("delete from {} where id = $1", table.name());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
