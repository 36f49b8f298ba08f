//! 楼宇层级 handlers
//!
//! - GET /locations/buildings - 全部楼宇
//! - GET /locations/floors?buildingId= - 楼宇下的楼层
//! - GET /locations/rooms?floorId= - 楼层下的房间
//! - GET /locations/selection - 规范化下拉选择并返回各级可选项
//!
//! 层级数据由外部维护，每次请求从存储加载。

use crate::AppState;
use crate::selection::FilterSelection;
use crate::utils::normalize_optional;
use crate::utils::response::triage_error;
use crate::utils::{building_to_dto, floor_to_dto, room_to_dto};
use api_contract::{
    ApiResponse, BuildingDto, FloorDto, FloorsQuery, LocationSelectionDto, RoomDto, RoomsQuery,
    SelectionQuery,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use triage_hierarchy::LocationIndex;

async fn load_index(state: &AppState) -> Result<LocationIndex, Response> {
    LocationIndex::load(state.store.as_ref())
        .await
        .map_err(triage_error)
}

/// 列出楼宇
pub async fn list_buildings(State(state): State<AppState>) -> Response {
    let index = match load_index(&state).await {
        Ok(index) => index,
        Err(response) => return response,
    };
    let data: Vec<BuildingDto> = index.buildings().iter().map(building_to_dto).collect();
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// 列出楼层
pub async fn list_floors(
    State(state): State<AppState>,
    Query(query): Query<FloorsQuery>,
) -> Response {
    let building_id = normalize_optional(query.building_id);
    let index = match load_index(&state).await {
        Ok(index) => index,
        Err(response) => return response,
    };
    let data: Vec<FloorDto> = index
        .floors_of(building_id.as_deref())
        .into_iter()
        .map(floor_to_dto)
        .collect();
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// 列出房间
pub async fn list_rooms(
    State(state): State<AppState>,
    Query(query): Query<RoomsQuery>,
) -> Response {
    let floor_id = normalize_optional(query.floor_id);
    let index = match load_index(&state).await {
        Ok(index) => index,
        Err(response) => return response,
    };
    let data: Vec<RoomDto> = index
        .rooms_of(floor_id.as_deref())
        .into_iter()
        .map(room_to_dto)
        .collect();
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// 规范化下拉选择
pub async fn get_selection(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Response {
    let index = match load_index(&state).await {
        Ok(index) => index,
        Err(response) => return response,
    };
    let mut selection = FilterSelection::default();
    selection.select_building(normalize_optional(query.building_id));
    selection.select_floor(normalize_optional(query.floor_id));
    selection.select_room(normalize_optional(query.room_id));
    let selection = selection.normalize(&index);

    let data = LocationSelectionDto {
        buildings: index.buildings().iter().map(building_to_dto).collect(),
        floors: selection
            .floor_options(&index)
            .into_iter()
            .map(floor_to_dto)
            .collect(),
        rooms: selection
            .room_options(&index)
            .into_iter()
            .map(room_to_dto)
            .collect(),
        building_id: selection.building_id,
        floor_id: selection.floor_id,
        room_id: selection.room_id,
    };
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}
