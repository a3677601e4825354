use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use garde::Validate;
use kernel::{
    model::{booking::Booking, id::BookingId},
    notification::BookingEvent,
};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AdminUser,
    model::booking::{BookingLookupQuery, BookingResponse, CreateBookingRequest},
};

// 書き込みはコミット済みのため、通知の失敗はそのままエラーとして返す
async fn notify(registry: &AppRegistry, event: BookingEvent, booking: &Booking) -> AppResult<()> {
    registry.booking_notifier().notify(event, booking).await
}

pub async fn create_booking(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    let booking = registry
        .booking_service()
        .create(req.into_event(Local::now()))
        .await?;
    notify(&registry, BookingEvent::Created, &booking).await?;

    Ok((StatusCode::CREATED, Json(booking.into())))
}

pub async fn show_booking_list(
    _admin: AdminUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    registry
        .booking_service()
        .find_all()
        .await
        .map(|bookings| bookings.into_iter().map(BookingResponse::from).collect())
        .map(Json)
}

pub async fn show_booking(
    _admin: AdminUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_service()
        .find_by_id(booking_id)
        .await
        .map(BookingResponse::from)
        .map(Json)
}

pub async fn show_booking_by_code(
    Path(booking_code): Path<String>,
    Query(query): Query<BookingLookupQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    query.validate()?;

    registry
        .booking_service()
        .find_by_code_and_dni(&booking_code, &query.dni)
        .await
        .map(BookingResponse::from)
        .map(Json)
}

pub async fn cancel_booking(
    Path(booking_code): Path<String>,
    Query(query): Query<BookingLookupQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    query.validate()?;

    let booking = registry
        .booking_service()
        .cancel(&booking_code, &query.dni)
        .await?;
    notify(&registry, BookingEvent::Cancelled, &booking).await?;

    Ok(Json(booking.into()))
}

pub async fn confirm_booking(
    _admin: AdminUser,
    Path(booking_code): Path<String>,
    Query(query): Query<BookingLookupQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    query.validate()?;

    let booking = registry
        .booking_service()
        .confirm(&booking_code, &query.dni)
        .await?;
    notify(&registry, BookingEvent::Confirmed, &booking).await?;

    Ok(Json(booking.into()))
}

pub async fn complete_booking(
    _admin: AdminUser,
    Path(booking_code): Path<String>,
    Query(query): Query<BookingLookupQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    query.validate()?;

    let booking = registry
        .booking_service()
        .complete(&booking_code, &query.dni)
        .await?;
    notify(&registry, BookingEvent::Completed, &booking).await?;

    Ok(Json(booking.into()))
}

pub async fn delete_booking(
    _admin: AdminUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .booking_service()
        .delete(booking_id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
}
