//! 数据模型
//!
//! 定义存储适配器可见的表目录：
//! - 表：buildings, floors, rooms, reports
//! - 列：名称与类型（文本、可空文本、时间戳）
//! - 行：JSON 对象，join 进来的关联表以嵌套对象出现

use serde_json::{Map, Value};

/// 存储返回的一行（JSON 对象）。
pub type Row = Map<String, Value>;

/// 所有表的主键列名。
pub const PRIMARY_KEY: &str = "id";

/// 列类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    OptionalText,
    Timestamp,
}

/// 列定义。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn text(name: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        kind: ColumnKind::Text,
    }
}

const BUILDING_COLUMNS: &[ColumnDef] = &[text("id"), text("name")];

const FLOOR_COLUMNS: &[ColumnDef] = &[text("id"), text("floor_name"), text("building_id")];

const ROOM_COLUMNS: &[ColumnDef] = &[text("id"), text("room_name"), text("floor_id")];

const REPORT_COLUMNS: &[ColumnDef] = &[
    text("id"),
    text("name"),
    text("equipment"),
    text("description"),
    ColumnDef {
        name: "action_taken",
        kind: ColumnKind::OptionalText,
    },
    ColumnDef {
        name: "created_at",
        kind: ColumnKind::Timestamp,
    },
    text("status"),
    text("room_id"),
];

/// 存储中的表。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Buildings,
    Floors,
    Rooms,
    Reports,
}

impl Table {
    /// 表名（同时是 Postgres 中的表名）。
    pub fn name(&self) -> &'static str {
        match self {
            Table::Buildings => "buildings",
            Table::Floors => "floors",
            Table::Rooms => "rooms",
            Table::Reports => "reports",
        }
    }

    pub fn columns(&self) -> &'static [ColumnDef] {
        match self {
            Table::Buildings => BUILDING_COLUMNS,
            Table::Floors => FLOOR_COLUMNS,
            Table::Rooms => ROOM_COLUMNS,
            Table::Reports => REPORT_COLUMNS,
        }
    }

    pub fn column(&self, name: &str) -> Option<&'static ColumnDef> {
        self.columns().iter().find(|column| column.name == name)
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
