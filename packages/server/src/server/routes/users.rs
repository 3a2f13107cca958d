use axum::extract::{Extension, Path};
use axum::Json;
use tracing::info;

use crate::common::ApiError;
use crate::domains::users::data::{
    MessageResponse, UserFetchResponse, UserListResponse, UserWriteRequest,
};
use crate::domains::users::UserService;
use crate::server::app::AppState;

pub async fn get_user(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserFetchResponse>, ApiError> {
    info!(id, "GET user");
    let user = UserService::new(&state.db_pool).get_user(id).await?;
    Ok(Json(user.into()))
}

pub async fn get_users(
    Extension(state): Extension<AppState>,
) -> Result<Json<UserListResponse>, ApiError> {
    info!("GET all users");
    let users = UserService::new(&state.db_pool).get_users().await?;
    Ok(Json(UserListResponse { users: users.into_iter().map(Into::into).collect() }))
}

pub async fn add_user(
    Extension(state): Extension<AppState>,
    Json(payload): Json<UserWriteRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    info!(id = payload.id, "POST user");
    let message = UserService::new(&state.db_pool)
        .add_user(payload.id, payload.name)
        .await?;
    Ok(Json(MessageResponse::new(message)))
}

/// Update an existing user. Only `name` from the body is applied; the path
/// id wins over the body id.
pub async fn update_user(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UserWriteRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    info!(id, "PUT user");
    let message = UserService::new(&state.db_pool)
        .update_user(id, payload.name)
        .await?;
    Ok(Json(MessageResponse::new(message)))
}

pub async fn delete_user(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    info!(id, "DELETE user");
    let message = UserService::new(&state.db_pool).delete_user(id).await?;
    Ok(Json(MessageResponse::new(message)))
}

pub async fn delete_users(
    Extension(state): Extension<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    info!("DELETE all users");
    let message = UserService::new(&state.db_pool).delete_users().await?;
    Ok(Json(MessageResponse::new(message)))
}
