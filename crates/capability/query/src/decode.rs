//! 结果行解码：`report` + 嵌套的 `room.floor.building`。

use domain::{Building, Floor, LocationPath, Report, ReportView, Room, TriageError};
use serde::Deserialize;
use serde_json::Value;
use triage_storage::Row;

#[derive(Deserialize)]
struct ReportRow {
    #[serde(flatten)]
    report: Report,
    #[serde(default)]
    room: Option<RoomRow>,
}

#[derive(Deserialize)]
struct RoomRow {
    #[serde(flatten)]
    room: Room,
    #[serde(default)]
    floor: Option<FloorRow>,
}

#[derive(Deserialize)]
struct FloorRow {
    #[serde(flatten)]
    floor: Floor,
    #[serde(default)]
    building: Option<Building>,
}

pub(crate) fn decode_report(row: Row) -> Result<ReportView, TriageError> {
    let decoded: ReportRow = serde_json::from_value(Value::Object(row))
        .map_err(|err| TriageError::QueryFailed(format!("malformed report row: {err}")))?;

    let mut location = LocationPath::default();
    if let Some(room_row) = decoded.room {
        if let Some(floor_row) = room_row.floor {
            location.building = floor_row.building;
            location.floor = Some(floor_row.floor);
        }
        location.room = Some(room_row.room);
    }
    Ok(ReportView {
        report: decoded.report,
        location,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("object expected"),
        }
    }

    #[test]
    fn decodes_full_chain() {
        let view = decode_report(row(json!({
            "id": "r1", "name": "Aminah", "equipment": "Lamp", "description": "Dim",
            "action_taken": null, "created_at": "2024-05-01T02:00:00.000Z",
            "status": "pending", "room_id": "room-1",
            "room": { "id": "room-1", "room_name": "Bilik 101", "floor_id": "f1",
                "floor": { "id": "f1", "floor_name": "Aras 1", "building_id": "b1",
                    "building": { "id": "b1", "name": "Blok A" } } }
        })))
        .expect("decode");
        assert_eq!(view.location.building_name(), Some("Blok A"));
        assert_eq!(view.location.floor_name(), Some("Aras 1"));
        assert_eq!(view.location.room_name(), Some("Bilik 101"));
        assert!(view.report.action_taken.is_none());
    }

    #[test]
    fn missing_relation_is_absent() {
        let view = decode_report(row(json!({
            "id": "r2", "name": "Farid", "equipment": "Fan", "description": "Noisy",
            "created_at": "2024-05-01T02:00:00Z", "status": "completed",
            "room_id": "room-x", "room": null
        })))
        .expect("decode");
        assert_eq!(view.location, LocationPath::default());
    }

    #[test]
    fn malformed_row_is_query_failure() {
        let err = decode_report(row(json!({ "id": "r3" }))).expect_err("missing fields");
        assert!(matches!(err, TriageError::QueryFailed(_)));
    }
}
