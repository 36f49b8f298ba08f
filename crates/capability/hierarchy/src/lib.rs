//! 楼宇层级索引
//!
//! 持有全部楼宇、楼层、房间，回答包含关系查询：
//! - `floors_of`：某楼宇下的楼层（未指定楼宇时返回全部）
//! - `rooms_of`：某楼层下的房间（未指定楼层时返回全部）
//!
//! 结果保持全集的原始顺序；未知 ID 返回空列表而不是错误。
//! 父级选择变化时重置子级选择由调用方负责，索引只提供查询。

use domain::{Building, Floor, LocationPath, Room, TriageError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use triage_storage::{ColumnRef, RecordStore, SelectRequest, Table};

/// 层级索引（只读快照）。
#[derive(Debug, Clone, Default)]
pub struct LocationIndex {
    buildings: Vec<Building>,
    floors: Vec<Floor>,
    rooms: Vec<Room>,
}

impl LocationIndex {
    pub fn new(buildings: Vec<Building>, floors: Vec<Floor>, rooms: Vec<Room>) -> Self {
        Self {
            buildings,
            floors,
            rooms,
        }
    }

    /// 从存储加载全部层级数据，各表按名称升序。
    pub async fn load(store: &dyn RecordStore) -> Result<Self, TriageError> {
        let buildings: Vec<Building> = load_table(store, Table::Buildings, "name").await?;
        let floors: Vec<Floor> = load_table(store, Table::Floors, "floor_name").await?;
        let rooms: Vec<Room> = load_table(store, Table::Rooms, "room_name").await?;
        debug!(
            target: "triage.hierarchy",
            buildings = buildings.len(),
            floors = floors.len(),
            rooms = rooms.len(),
            "location_index_loaded"
        );
        Ok(Self::new(buildings, floors, rooms))
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    /// 楼宇下的楼层；`None` 表示不限定楼宇。
    pub fn floors_of(&self, building_id: Option<&str>) -> Vec<&Floor> {
        self.floors
            .iter()
            .filter(|floor| building_id.is_none_or(|id| floor.building_id == id))
            .collect()
    }

    /// 楼层下的房间；`None` 表示不限定楼层。
    pub fn rooms_of(&self, floor_id: Option<&str>) -> Vec<&Room> {
        self.rooms
            .iter()
            .filter(|room| floor_id.is_none_or(|id| room.floor_id == id))
            .collect()
    }

    pub fn building(&self, building_id: &str) -> Option<&Building> {
        self.buildings
            .iter()
            .find(|building| building.id == building_id)
    }

    pub fn floor(&self, floor_id: &str) -> Option<&Floor> {
        self.floors.iter().find(|floor| floor.id == floor_id)
    }

    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == room_id)
    }

    /// 沿 房间 → 楼层 → 楼宇 解析路径，断链处之后均为 `None`。
    pub fn resolve_room(&self, room_id: &str) -> LocationPath {
        let room = self.room(room_id).cloned();
        let floor = room
            .as_ref()
            .and_then(|room| self.floor(&room.floor_id))
            .cloned();
        let building = floor
            .as_ref()
            .and_then(|floor| self.building(&floor.building_id))
            .cloned();
        LocationPath {
            building,
            floor,
            room,
        }
    }
}

async fn load_table<T: DeserializeOwned>(
    store: &dyn RecordStore,
    table: Table,
    order_column: &'static str,
) -> Result<Vec<T>, TriageError> {
    let request =
        SelectRequest::from_table(table).order_by(ColumnRef::new(table, order_column), false);
    let rows = store.select(&request).await.map_err(|err| {
        warn!(target: "triage.hierarchy", table = %table, error = %err, "location_load_failed");
        TriageError::QueryFailed(err.to_string())
    })?;
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(Value::Object(row))
                .map_err(|err| TriageError::QueryFailed(format!("malformed {table} row: {err}")))
        })
        .collect()
}
