use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use kernel::model::id::{HotelId, RoomId};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AdminUser,
    model::{
        availability::{AvailabilityQuery, AvailabilityResponse},
        room::{CreateRoomRequest, RoomResponse, UpdateRoomRequest},
    },
};

pub async fn show_room_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<RoomResponse>>> {
    registry
        .room_service()
        .find_all()
        .await
        .map(|rooms| rooms.into_iter().map(RoomResponse::from).collect())
        .map(Json)
}

pub async fn show_rooms_by_hotel(
    Path(hotel_id): Path<HotelId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<RoomResponse>>> {
    registry
        .room_service()
        .find_by_hotel(hotel_id)
        .await
        .map(|rooms| rooms.into_iter().map(RoomResponse::from).collect())
        .map(Json)
}

pub async fn show_room(
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomResponse>> {
    registry
        .room_service()
        .find_by_id(room_id)
        .await
        .map(RoomResponse::from)
        .map(Json)
}

pub async fn show_room_availability(
    Path(room_id): Path<RoomId>,
    Query(query): Query<AvailabilityQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AvailabilityResponse>> {
    let today = Local::now().date_naive();
    registry
        .room_service()
        .availability(room_id, query.start_date, query.end_date, today)
        .await
        .map(AvailabilityResponse::from)
        .map(Json)
}

pub async fn register_room(
    _admin: AdminUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateRoomRequest>,
) -> AppResult<(StatusCode, Json<RoomResponse>)> {
    registry
        .room_service()
        .create(req.into())
        .await
        .map(|room| (StatusCode::CREATED, Json(room.into())))
}

pub async fn update_room(
    _admin: AdminUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateRoomRequest>,
) -> AppResult<Json<RoomResponse>> {
    registry
        .room_service()
        .update(req.into_update(room_id))
        .await
        .map(RoomResponse::from)
        .map(Json)
}

pub async fn mark_room_available(
    _admin: AdminUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomResponse>> {
    registry
        .room_service()
        .mark_available(room_id)
        .await
        .map(RoomResponse::from)
        .map(Json)
}

pub async fn mark_room_unavailable(
    _admin: AdminUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomResponse>> {
    registry
        .room_service()
        .mark_unavailable(room_id)
        .await
        .map(RoomResponse::from)
        .map(Json)
}

pub async fn delete_room(
    _admin: AdminUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .room_service()
        .delete(room_id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
}
