//! 验证辅助函数
//!
//! 所有适配器在执行前统一校验请求：
//! - ensure_select：join 链、谓词列、排序列都在表目录内且可达
//! - ensure_fields：更新字段存在、非主键、类型匹配
//!
//! Postgres 适配器会把列名拼进 SQL，列名只能来自静态表目录。

use crate::error::StorageError;
use crate::models::{ColumnDef, ColumnKind, PRIMARY_KEY, Table};
use crate::request::{ColumnRef, FieldSet, FieldValue, JoinSpec, Predicate, SelectRequest};

/// 验证列存在于所属表
pub fn ensure_column(column: &ColumnRef) -> Result<&'static ColumnDef, StorageError> {
    column
        .table
        .column(column.name)
        .ok_or_else(|| StorageError::new(format!("unknown column {column}")))
}

/// 验证 join 链：每一环的外键都是上一层表的列，且同一表不重复出现
pub fn ensure_join(root: Table, join: &JoinSpec) -> Result<(), StorageError> {
    let mut parent = root;
    let mut seen = vec![root];
    for relation in &join.chain {
        if parent.column(relation.foreign_key).is_none() {
            return Err(StorageError::new(format!(
                "unknown join key {}.{}",
                parent, relation.foreign_key
            )));
        }
        if seen.contains(&relation.table) {
            return Err(StorageError::new(format!(
                "table {} joined twice",
                relation.table
            )));
        }
        seen.push(relation.table);
        parent = relation.table;
    }
    Ok(())
}

/// 验证读请求
pub fn ensure_select(request: &SelectRequest) -> Result<(), StorageError> {
    ensure_join(request.table, &request.join)?;
    for predicate in &request.predicates {
        let column = predicate.column();
        let def = ensure_reachable(request, column)?;
        let is_range = matches!(predicate, Predicate::Gte { .. } | Predicate::Lte { .. });
        if is_range != (def.kind == ColumnKind::Timestamp) {
            return Err(StorageError::new(format!(
                "filter type does not match column {column}"
            )));
        }
    }
    for order in &request.order {
        ensure_reachable(request, &order.column)?;
    }
    Ok(())
}

fn ensure_reachable(
    request: &SelectRequest,
    column: &ColumnRef,
) -> Result<&'static ColumnDef, StorageError> {
    let def = ensure_column(column)?;
    if request.join.path_to(request.table, column.table).is_none() {
        return Err(StorageError::new(format!(
            "column {column} not reachable from {}",
            request.table
        )));
    }
    Ok(def)
}

/// 验证更新字段
pub fn ensure_fields(table: Table, fields: &FieldSet) -> Result<(), StorageError> {
    if fields.is_empty() {
        return Err(StorageError::new("empty update"));
    }
    for (name, value) in fields.iter() {
        if name == PRIMARY_KEY {
            return Err(StorageError::new("primary key is immutable"));
        }
        let def = table
            .column(name)
            .ok_or_else(|| StorageError::new(format!("unknown column {table}.{name}")))?;
        match (def.kind, value) {
            (ColumnKind::Timestamp, _) => {
                return Err(StorageError::new(format!("column {table}.{name} is read-only")));
            }
            (ColumnKind::Text, FieldValue::Null) => {
                return Err(StorageError::new(format!("column {table}.{name} is not nullable")));
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Relation;

    #[test]
    fn join_rejects_unknown_foreign_key() {
        let join = JoinSpec::chain(vec![Relation {
            table: Table::Floors,
            foreign_key: "floor_id",
            embed_as: "floor",
        }]);
        let err = ensure_join(Table::Reports, &join).expect_err("reports has no floor_id");
        assert_eq!(err.to_string(), "unknown join key reports.floor_id");
    }

    #[test]
    fn range_filter_requires_timestamp() {
        let request = SelectRequest::from_table(Table::Reports).filter(Predicate::Gte {
            column: ColumnRef::new(Table::Reports, "status"),
            value: chrono::Utc::now(),
        });
        assert!(ensure_select(&request).is_err());
    }

    #[test]
    fn unreachable_column_is_rejected() {
        let request = SelectRequest::from_table(Table::Reports).filter(Predicate::Eq {
            column: ColumnRef::new(Table::Buildings, "id"),
            value: "b-1".to_string(),
        });
        let err = ensure_select(&request).expect_err("no join");
        assert_eq!(err.to_string(), "column buildings.id not reachable from reports");
    }

    #[test]
    fn status_cannot_be_nulled() {
        let fields = FieldSet::new().set("status", FieldValue::Null);
        assert!(ensure_fields(Table::Reports, &fields).is_err());
        let fields = FieldSet::new().set("action_taken", FieldValue::Null);
        assert!(ensure_fields(Table::Reports, &fields).is_ok());
    }
}
