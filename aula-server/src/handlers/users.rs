use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::instrument;

use crate::{app_state::AppState, handlers::user_service, http::error::AppResult};
use shared::models::{DeleteUserRequest, RegisterRequest, UpdateUserRequest, UserListResponse};

#[instrument(skip(state, payload))]
pub async fn register(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Response> {
    let users = user_service(&state)?;
    let response = users.register(payload).await?;

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

#[instrument(skip(state, payload))]
pub async fn update(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let users = user_service(&state)?;
    users.update(payload).await?;

    Ok(Json(json!({ "message": "User updated successfully" })))
}

#[instrument(skip(state, payload))]
pub async fn delete(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<DeleteUserRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let users = user_service(&state)?;
    users.delete(payload.id).await?;

    Ok(Json(json!({ "message": "User deleted successfully" })))
}

#[instrument(skip(state))]
pub async fn list(
    Extension(state): Extension<Arc<AppState>>,
) -> AppResult<Json<UserListResponse>> {
    let users = user_service(&state)?;
    Ok(Json(users.list_all().await?))
}

#[instrument(skip(state, query))]
pub async fn find(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
) -> AppResult<Json<UserListResponse>> {
    let users = user_service(&state)?;
    let response = users
        .list_by_param(
            query.get("param").map(String::as_str),
            query.get("value").map(String::as_str),
        )
        .await?;

    Ok(Json(response))
}
