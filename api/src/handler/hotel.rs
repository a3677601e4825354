use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use kernel::model::id::HotelId;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AdminUser,
    model::hotel::{CreateHotelRequest, HotelResponse, UpdateHotelRequest},
};

pub async fn show_hotel_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<HotelResponse>>> {
    registry
        .hotel_service()
        .find_all()
        .await
        .map(|hotels| hotels.into_iter().map(HotelResponse::from).collect())
        .map(Json)
}

pub async fn show_hotel(
    Path(hotel_id): Path<HotelId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<HotelResponse>> {
    registry
        .hotel_service()
        .find_by_id(hotel_id)
        .await
        .map(HotelResponse::from)
        .map(Json)
}

pub async fn register_hotel(
    _admin: AdminUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateHotelRequest>,
) -> AppResult<(StatusCode, Json<HotelResponse>)> {
    registry
        .hotel_service()
        .create(req.into())
        .await
        .map(|hotel| (StatusCode::CREATED, Json(hotel.into())))
}

pub async fn update_hotel(
    _admin: AdminUser,
    Path(hotel_id): Path<HotelId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateHotelRequest>,
) -> AppResult<Json<HotelResponse>> {
    registry
        .hotel_service()
        .update(req.into_update(hotel_id))
        .await
        .map(HotelResponse::from)
        .map(Json)
}

pub async fn delete_hotel(
    _admin: AdminUser,
    Path(hotel_id): Path<HotelId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .hotel_service()
        .delete(hotel_id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
}
