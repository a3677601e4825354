use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use kernel::model::id::UserId;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AdminUser,
    model::user::{CreateUserRequest, UserResponse},
};

pub async fn show_user_list(
    _admin: AdminUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<UserResponse>>> {
    registry
        .user_service()
        .find_all()
        .await
        .map(|users| users.into_iter().map(UserResponse::from).collect())
        .map(Json)
}

pub async fn show_user(
    _admin: AdminUser,
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<UserResponse>> {
    registry
        .user_service()
        .find_by_id(user_id)
        .await
        .map(UserResponse::from)
        .map(Json)
}

pub async fn register_user(
    _admin: AdminUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    registry
        .user_service()
        .create(req.into())
        .await
        .map(|user| (StatusCode::CREATED, Json(user.into())))
}

pub async fn delete_user(
    _admin: AdminUser,
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .user_service()
        .delete(user_id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
}
