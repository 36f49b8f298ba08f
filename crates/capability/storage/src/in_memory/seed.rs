//! 演示数据
//!
//! 未配置数据库时，API 使用带演示数据的内存存储启动：
//! 两栋楼、每栋两层、每层两间房，以及当天的若干报修单。

use crate::error::StorageError;
use crate::in_memory::store::InMemoryRecordStore;
use crate::models::Table;
use chrono::{DateTime, Duration, Utc};
use domain::{Building, Floor, Report, ReportStatus, Room};

/// 写入演示用的楼宇层级与报修单。
pub fn seed_demo(store: &InMemoryRecordStore, now: DateTime<Utc>) -> Result<(), StorageError> {
    for (building_idx, building_name) in ["Blok A", "Blok B"].iter().enumerate() {
        let building_id = format!("building-{}", building_idx + 1);
        store.insert(
            Table::Buildings,
            &Building {
                id: building_id.clone(),
                name: building_name.to_string(),
            },
        )?;
        for level in 1..=2 {
            let floor_id = format!("{building_id}-floor-{level}");
            store.insert(
                Table::Floors,
                &Floor {
                    id: floor_id.clone(),
                    floor_name: format!("Aras {level}"),
                    building_id: building_id.clone(),
                },
            )?;
            for unit in 1..=2 {
                store.insert(
                    Table::Rooms,
                    &Room {
                        id: format!("{floor_id}-room-{unit}"),
                        room_name: format!("Bilik {level}0{unit}"),
                        floor_id: floor_id.clone(),
                    },
                )?;
            }
        }
    }

    let reports = [
        ("Aminah", "Projector", "No signal from HDMI port", 1, "building-1-floor-1-room-1", ReportStatus::Pending, None),
        ("Farid", "Air conditioner", "Leaking water onto the floor", 3, "building-1-floor-2-room-2", ReportStatus::Completed, Some("Cleared drain pipe")),
        ("Siti", "Ceiling light", "Flickering tube", 5, "building-2-floor-1-room-1", ReportStatus::Pending, None),
        ("Kumar", "Whiteboard", "Loose mounting bracket", 30, "building-2-floor-2-room-2", ReportStatus::Pending, None),
    ];
    for (index, (name, equipment, description, hours_ago, room_id, status, action_taken)) in
        reports.into_iter().enumerate()
    {
        store.insert(
            Table::Reports,
            &Report {
                id: format!("report-{}", index + 1),
                name: name.to_string(),
                equipment: equipment.to_string(),
                description: description.to_string(),
                action_taken: action_taken.map(str::to_string),
                created_at: now - Duration::hours(hours_ago),
                status,
                room_id: room_id.to_string(),
            },
        )?;
    }
    Ok(())
}
