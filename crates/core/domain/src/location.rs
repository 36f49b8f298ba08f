//! 楼宇层级实体（楼宇 → 楼层 → 房间）。
//!
//! 层级数据由外部管理流程维护，在核心内只读。

use serde::{Deserialize, Serialize};

/// 楼宇。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub name: String,
}

/// 楼层，`building_id` 指向所属楼宇。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    pub id: String,
    pub floor_name: String,
    pub building_id: String,
}

/// 房间，`floor_id` 指向所属楼层。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub room_name: String,
    pub floor_id: String,
}

/// 报修单解析出的层级路径。
///
/// 关联缺失（外键悬空）时对应字段为 `None`，展示层渲染为缺省值。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationPath {
    pub building: Option<Building>,
    pub floor: Option<Floor>,
    pub room: Option<Room>,
}

impl LocationPath {
    pub fn building_name(&self) -> Option<&str> {
        self.building.as_ref().map(|building| building.name.as_str())
    }

    pub fn floor_name(&self) -> Option<&str> {
        self.floor.as_ref().map(|floor| floor.floor_name.as_str())
    }

    pub fn room_name(&self) -> Option<&str> {
        self.room.as_ref().map(|room| room.room_name.as_str())
    }
}
