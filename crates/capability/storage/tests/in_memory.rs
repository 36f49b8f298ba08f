use chrono::{TimeZone, Utc};
use domain::{Building, Floor, Report, ReportStatus, Room};
use serde_json::Value;
use triage_storage::{
    ColumnRef, FieldSet, FieldValue, InMemoryRecordStore, JoinSpec, Predicate, RecordStore,
    Relation, SelectRequest, Table,
};

fn report(id: &str, room_id: &str, hour: u32) -> Report {
    Report {
        id: id.to_string(),
        name: "Aminah".to_string(),
        equipment: "Fan".to_string(),
        description: "Noisy".to_string(),
        action_taken: None,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap(),
        status: ReportStatus::Pending,
        room_id: room_id.to_string(),
    }
}

fn store() -> InMemoryRecordStore {
    let store = InMemoryRecordStore::new();
    store
        .insert(Table::Buildings, &Building { id: "b-1".into(), name: "Blok A".into() })
        .expect("building");
    store
        .insert(
            Table::Floors,
            &Floor { id: "f-1".into(), floor_name: "Aras 1".into(), building_id: "b-1".into() },
        )
        .expect("floor");
    store
        .insert(
            Table::Rooms,
            &Room { id: "r-1".into(), room_name: "Bilik 101".into(), floor_id: "f-1".into() },
        )
        .expect("room");
    store.insert(Table::Reports, &report("rep-1", "r-1", 1)).expect("report");
    store.insert(Table::Reports, &report("rep-2", "r-missing", 3)).expect("report");
    store
}

fn report_join() -> JoinSpec {
    JoinSpec::chain(vec![
        Relation { table: Table::Rooms, foreign_key: "room_id", embed_as: "room" },
        Relation { table: Table::Floors, foreign_key: "floor_id", embed_as: "floor" },
        Relation { table: Table::Buildings, foreign_key: "building_id", embed_as: "building" },
    ])
}

#[tokio::test]
async fn select_embeds_nested_relations() {
    let store = store();
    let request = SelectRequest::from_table(Table::Reports)
        .join(report_join())
        .order_by(ColumnRef::new(Table::Reports, "created_at"), false);
    let rows = store.select(&request).await.expect("select");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["room"]["floor"]["building"]["name"], Value::from("Blok A"));
    // 悬空外键：关联层为 null，行本身仍然返回
    assert_eq!(rows[1]["id"], Value::from("rep-2"));
    assert!(rows[1]["room"].is_null());
}

#[tokio::test]
async fn filter_on_joined_column_excludes_dangling_rows() {
    let store = store();
    let request = SelectRequest::from_table(Table::Reports)
        .join(report_join())
        .filter(Predicate::Eq {
            column: ColumnRef::new(Table::Floors, "building_id"),
            value: "b-1".to_string(),
        });
    let rows = store.select(&request).await.expect("select");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], Value::from("rep-1"));
}

#[tokio::test]
async fn range_filter_is_inclusive() {
    let store = store();
    let request = SelectRequest::from_table(Table::Reports)
        .filter(Predicate::Gte {
            column: ColumnRef::new(Table::Reports, "created_at"),
            value: Utc.with_ymd_and_hms(2024, 5, 1, 1, 0, 0).unwrap(),
        })
        .filter(Predicate::Lte {
            column: ColumnRef::new(Table::Reports, "created_at"),
            value: Utc.with_ymd_and_hms(2024, 5, 1, 1, 0, 0).unwrap(),
        });
    let rows = store.select(&request).await.expect("select");
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn order_descending_by_timestamp() {
    let store = store();
    let request = SelectRequest::from_table(Table::Reports)
        .order_by(ColumnRef::new(Table::Reports, "created_at"), true);
    let rows = store.select(&request).await.expect("select");
    let ids: Vec<&str> = rows.iter().filter_map(|row| row["id"].as_str()).collect();
    assert_eq!(ids, vec!["rep-2", "rep-1"]);
}

#[tokio::test]
async fn update_applies_partial_fields() {
    let store = store();
    let fields = FieldSet::new()
        .text("status", "completed")
        .text("action_taken", "Oiled bearing");
    let row = store
        .update(Table::Reports, "rep-1", &fields)
        .await
        .expect("update")
        .expect("row");
    assert_eq!(row["status"], Value::from("completed"));
    assert_eq!(row["action_taken"], Value::from("Oiled bearing"));
    assert_eq!(row["description"], Value::from("Noisy"));

    let missing = store
        .update(Table::Reports, "rep-404", &fields)
        .await
        .expect("update");
    assert!(missing.is_none());
}

#[tokio::test]
async fn update_rejects_unknown_columns() {
    let store = store();
    let fields = FieldSet::new().set("priority", FieldValue::Text("high".to_string()));
    let err = store
        .update(Table::Reports, "rep-1", &fields)
        .await
        .expect_err("unknown column");
    assert_eq!(err.to_string(), "unknown column reports.priority");
}

#[tokio::test]
async fn delete_is_hard_and_reports_absence() {
    let store = store();
    assert!(store.delete(Table::Reports, "rep-1").await.expect("delete"));
    assert_eq!(store.len(Table::Reports), 1);
    assert!(!store.delete(Table::Reports, "rep-1").await.expect("delete"));
    assert_eq!(store.len(Table::Reports), 1);
}

#[tokio::test]
async fn duplicate_insert_is_rejected() {
    let store = store();
    let err = store
        .insert(Table::Reports, &report("rep-1", "r-1", 5))
        .expect_err("duplicate");
    assert_eq!(err.to_string(), "reports rep-1 exists");
}
