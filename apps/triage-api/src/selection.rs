//! 下拉联动选择
//!
//! 楼宇变化时清空楼层与房间；楼层变化时清空房间。
//! 不一致的组合（楼层不属于所选楼宇、房间不属于所选楼层）在规范化时清空子级。

use domain::{Floor, Room};
use triage_hierarchy::LocationIndex;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub building_id: Option<String>,
    pub floor_id: Option<String>,
    pub room_id: Option<String>,
}

impl FilterSelection {
    pub fn select_building(&mut self, building_id: Option<String>) {
        if self.building_id != building_id {
            self.building_id = building_id;
            self.floor_id = None;
            self.room_id = None;
        }
    }

    pub fn select_floor(&mut self, floor_id: Option<String>) {
        if self.floor_id != floor_id {
            self.floor_id = floor_id;
            self.room_id = None;
        }
    }

    pub fn select_room(&mut self, room_id: Option<String>) {
        self.room_id = room_id;
    }

    /// 按层级索引清除不存在或不一致的选择。
    pub fn normalize(mut self, index: &LocationIndex) -> Self {
        if let Some(building_id) = &self.building_id
            && index.building(building_id).is_none()
        {
            self.select_building(None);
        }
        if let Some(floor_id) = &self.floor_id
            && !self
                .floor_options(index)
                .iter()
                .any(|floor| floor.id == *floor_id)
        {
            self.select_floor(None);
        }
        if let Some(room_id) = &self.room_id
            && !self
                .room_options(index)
                .iter()
                .any(|room| room.id == *room_id)
        {
            self.select_room(None);
        }
        self
    }

    /// 当前楼宇下可选的楼层。
    pub fn floor_options<'a>(&self, index: &'a LocationIndex) -> Vec<&'a Floor> {
        index.floors_of(self.building_id.as_deref())
    }

    /// 当前楼层下可选的房间；只选了楼宇时为该楼宇下的全部房间。
    pub fn room_options<'a>(&self, index: &'a LocationIndex) -> Vec<&'a Room> {
        if self.floor_id.is_some() || self.building_id.is_none() {
            return index.rooms_of(self.floor_id.as_deref());
        }
        let floors = self.floor_options(index);
        index
            .rooms_of(None)
            .into_iter()
            .filter(|room| floors.iter().any(|floor| floor.id == room.floor_id))
            .collect()
    }
}
