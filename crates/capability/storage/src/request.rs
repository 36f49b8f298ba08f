//! 存储请求
//!
//! 读请求 = 表 + 关联 join 链 + 谓词列表 + 排序指令；
//! 写请求 = 表 + 行 ID + 部分字段集合。

use crate::models::Table;
use chrono::{DateTime, Utc};

/// 列引用，可指向根表或 join 链中的任一表。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef {
    pub table: Table,
    pub name: &'static str,
}

impl ColumnRef {
    pub const fn new(table: Table, name: &'static str) -> Self {
        Self { table, name }
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table, self.name)
    }
}

/// join 链中的一环：用上一层对象的 `foreign_key` 关联 `table.id`，
/// 并把关联到的行嵌入到 `embed_as` 字段下。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub table: Table,
    pub foreign_key: &'static str,
    pub embed_as: &'static str,
}

/// 关联 join 链（逐层嵌套）。
///
/// 关联缺失时嵌入 `null`（left join）；引用缺失关联列的谓词不成立。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinSpec {
    pub chain: Vec<Relation>,
}

impl JoinSpec {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn chain(chain: Vec<Relation>) -> Self {
        Self { chain }
    }

    /// 某表在结果行中的嵌套路径；根表为空路径，不可达为 `None`。
    pub fn path_to(&self, root: Table, table: Table) -> Option<Vec<&'static str>> {
        if table == root {
            return Some(Vec::new());
        }
        let position = self
            .chain
            .iter()
            .position(|relation| relation.table == table)?;
        Some(
            self.chain[..=position]
                .iter()
                .map(|relation| relation.embed_as)
                .collect(),
        )
    }
}

/// 过滤谓词（多个谓词之间为 AND）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Eq { column: ColumnRef, value: String },
    Gte { column: ColumnRef, value: DateTime<Utc> },
    Lte { column: ColumnRef, value: DateTime<Utc> },
}

impl Predicate {
    pub fn column(&self) -> &ColumnRef {
        match self {
            Predicate::Eq { column, .. }
            | Predicate::Gte { column, .. }
            | Predicate::Lte { column, .. } => column,
        }
    }
}

/// 排序指令（空值总是排在最后）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: ColumnRef,
    pub descending: bool,
}

/// 读请求。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectRequest {
    pub table: Table,
    pub join: JoinSpec,
    pub predicates: Vec<Predicate>,
    pub order: Vec<OrderBy>,
}

impl SelectRequest {
    pub fn from_table(table: Table) -> Self {
        Self {
            table,
            join: JoinSpec::none(),
            predicates: Vec::new(),
            order: Vec::new(),
        }
    }

    pub fn join(mut self, join: JoinSpec) -> Self {
        self.join = join;
        self
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn order_by(mut self, column: ColumnRef, descending: bool) -> Self {
        self.order.push(OrderBy { column, descending });
        self
    }
}

/// 写入字段值。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Null,
}

/// 部分字段集合（更新时只改动其中列出的列）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    values: Vec<(&'static str, FieldValue)>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置列值；同一列重复设置时以最后一次为准。
    pub fn set(mut self, column: &'static str, value: FieldValue) -> Self {
        self.values.retain(|(name, _)| *name != column);
        self.values.push((column, value));
        self
    }

    pub fn text(self, column: &'static str, value: impl Into<String>) -> Self {
        self.set(column, FieldValue::Text(value.into()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }
}
