//! 路由定义
//!
//! 集中管理所有 API 路由，将路径映射到对应的 handlers：
//! - 健康检查：/health
//! - 报修单：/reports/today, /reports, /reports/{id}/complete, /reports/{id}
//! - 楼宇层级：/locations/buildings, /locations/floors, /locations/rooms, /locations/selection
//! - 计数器：/metrics

use super::AppState;
use super::handlers::*;
use crate::middleware::request_context;
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

/// 创建 API 路由
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/reports/today", get(list_today_reports))
        .route("/reports", get(list_reports))
        .route("/reports/:report_id/complete", post(complete_report))
        .route("/reports/:report_id", delete(delete_report))
        .route("/locations/buildings", get(list_buildings))
        .route("/locations/floors", get(list_floors))
        .route("/locations/rooms", get(list_rooms))
        .route("/locations/selection", get(get_selection))
        .route("/metrics", get(get_metrics))
}

/// 组装完整应用：同时支持 / 和 /api/ 两种前缀，并注入 request_id/trace_id
pub fn build_app(state: AppState) -> Router {
    let api = create_api_router();
    Router::new()
        .merge(api.clone())
        .nest("/api", api)
        .with_state(state)
        .layer(middleware::from_fn(request_context))
}

#[cfg(test)]
mod tests {
    use super::build_app;
    use crate::AppState;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::{FixedOffset, Utc};
    use domain::DayZone;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;
    use triage_query::SortMode;
    use triage_storage::{InMemoryRecordStore, seed_demo};

    fn app() -> Router {
        let store = InMemoryRecordStore::new();
        seed_demo(&store, Utc::now()).expect("seed");
        let zone = DayZone::Fixed(FixedOffset::east_opt(0).expect("offset"));
        build_app(AppState::new(
            Arc::new(store),
            zone,
            SortMode::Triage,
            SortMode::Recency,
        ))
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        assert!(response.headers().contains_key("x-request-id"));
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn report_ids(value: &Value) -> Vec<String> {
        value["data"]["items"]
            .as_array()
            .expect("items")
            .iter()
            .map(|item| item["reportId"].as_str().expect("id").to_string())
            .collect()
    }

    #[tokio::test]
    async fn health_is_served_under_both_prefixes() {
        let app = app();
        let (status, body) = call(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let (status, _) = call(&app, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn reports_default_to_recency_with_location_names() {
        let app = app();
        let (status, body) = call(&app, "GET", "/api/reports", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["mode"], "recency");
        assert_eq!(
            report_ids(&body),
            vec!["report-1", "report-2", "report-3", "report-4"]
        );
        let first = &body["data"]["items"][0];
        assert_eq!(first["buildingName"], "Blok A");
        assert_eq!(first["floorName"], "Aras 1");
        assert_eq!(first["roomName"], "Bilik 101");
    }

    #[tokio::test]
    async fn reports_filter_by_building_in_triage_mode() {
        let app = app();
        let (status, body) =
            call(&app, "GET", "/reports?buildingId=building-1&mode=triage", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report_ids(&body), vec!["report-1", "report-2"]);

        let (_, body) = call(&app, "GET", "/reports?status=completed", None).await;
        assert_eq!(report_ids(&body), vec!["report-2"]);
    }

    #[tokio::test]
    async fn bad_filters_are_rejected() {
        let app = app();
        let (status, body) = call(&app, "GET", "/reports?date=01/05/2024", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID.REQUEST");

        let (status, _) = call(&app, "GET", "/reports?mode=oldest", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = call(&app, "GET", "/reports?status=open", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn blank_filters_mean_no_constraint() {
        let app = app();
        let uri = "/reports?date=&buildingId=&floorId=%20&roomId=&status=&mode=";
        let (status, body) = call(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["mode"], "recency");
        assert_eq!(
            report_ids(&body),
            vec!["report-1", "report-2", "report-3", "report-4"]
        );

        let (status, body) = call(&app, "GET", "/reports?buildingId=&mode=triage", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report_ids(&body).len(), 4);

        let (status, body) = call(&app, "GET", "/reports/today?mode=", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["mode"], "triage");

        let (status, body) = call(&app, "GET", "/locations/floors?buildingId=", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().expect("floors").len(), 4);
    }

    #[tokio::test]
    async fn complete_requires_confirmation_then_reports_change() {
        let app = app();
        let payload = serde_json::json!({ "actionTaken": "Replaced bulb" });
        let (status, body) =
            call(&app, "POST", "/reports/report-1/complete", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            body["error"]["message"]
                .as_str()
                .expect("message")
                .starts_with("confirmation required")
        );

        let payload = serde_json::json!({ "actionTaken": "Replaced bulb", "confirm": true });
        let (status, body) =
            call(&app, "POST", "/api/reports/report-1/complete", Some(payload)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["change"], "updated");
        assert_eq!(body["data"]["status"], "completed");
        assert_eq!(body["data"]["actionTaken"], "Replaced bulb");

        let payload = serde_json::json!({ "confirm": true });
        let (_, body) = call(&app, "POST", "/reports/report-1/complete", Some(payload)).await;
        assert_eq!(body["data"]["actionTaken"], "Replaced bulb");
    }

    #[tokio::test]
    async fn delete_unknown_report_is_not_found() {
        let app = app();
        let (status, body) = call(&app, "DELETE", "/reports/report-9?confirm=true", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "RESOURCE.NOT_FOUND");

        let (status, _) = call(&app, "DELETE", "/reports/report-4", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(&app, "DELETE", "/reports/report-4?confirm=true", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["change"], "removed");
        let (_, body) = call(&app, "GET", "/reports", None).await;
        assert!(!report_ids(&body).contains(&"report-4".to_string()));
    }

    #[tokio::test]
    async fn locations_follow_the_hierarchy() {
        let app = app();
        let (_, body) = call(&app, "GET", "/locations/buildings", None).await;
        assert_eq!(body["data"].as_array().expect("buildings").len(), 2);

        let (_, body) = call(&app, "GET", "/locations/floors?buildingId=building-2", None).await;
        let floors = body["data"].as_array().expect("floors");
        assert_eq!(floors.len(), 2);
        assert!(floors.iter().all(|floor| floor["buildingId"] == "building-2"));

        let (_, body) = call(&app, "GET", "/locations/rooms", None).await;
        assert_eq!(body["data"].as_array().expect("rooms").len(), 8);
    }

    #[tokio::test]
    async fn selection_clears_inconsistent_children() {
        let app = app();
        let uri = "/locations/selection?buildingId=building-1&floorId=building-2-floor-1&roomId=building-2-floor-1-room-1";
        let (status, body) = call(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["buildingId"], "building-1");
        assert_eq!(body["data"]["floorId"], Value::Null);
        assert_eq!(body["data"]["roomId"], Value::Null);
        assert_eq!(body["data"]["floors"].as_array().expect("floors").len(), 2);
        assert_eq!(body["data"]["rooms"].as_array().expect("rooms").len(), 4);
    }

    #[tokio::test]
    async fn metrics_snapshot_is_exposed() {
        let app = app();
        call(&app, "GET", "/reports", None).await;
        let (status, body) = call(&app, "GET", "/metrics", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["queriesIssued"].as_u64().expect("counter") >= 1);
    }
}
