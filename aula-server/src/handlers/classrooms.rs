use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::{app_state::AppState, handlers::classroom_service, http::error::AppResult};
use shared::models::{
    ClassroomListResponse, ClassroomSummary, CreateClassroomRequest, EnrollRequest, RosterResponse,
};

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct IdPayload {
    pub id: Uuid,
}

#[instrument(skip(state, payload))]
pub async fn create(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<CreateClassroomRequest>,
) -> AppResult<Response> {
    let classrooms = classroom_service(&state)?;
    let response = classrooms.create(payload).await?;

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

#[instrument(skip(state, payload))]
pub async fn delete(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<IdPayload>,
) -> AppResult<Json<serde_json::Value>> {
    let classrooms = classroom_service(&state)?;
    classrooms.delete(payload.id).await?;

    Ok(Json(json!({ "message": "Classroom deleted successfully" })))
}

#[instrument(skip(state))]
pub async fn list(
    Extension(state): Extension<Arc<AppState>>,
) -> AppResult<Json<ClassroomListResponse>> {
    let classrooms = classroom_service(&state)?;
    Ok(Json(classrooms.list().await?))
}

#[instrument(skip(state, query))]
pub async fn get(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ClassroomSummary>> {
    let classrooms = classroom_service(&state)?;
    Ok(Json(classrooms.get(query.id).await?))
}

#[instrument(skip(state, payload))]
pub async fn enroll(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<EnrollRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let classrooms = classroom_service(&state)?;
    classrooms.enroll(payload).await?;

    Ok(Json(json!({ "message": "Student enrolled successfully" })))
}

#[instrument(skip(state, payload))]
pub async fn unenroll(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<EnrollRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let classrooms = classroom_service(&state)?;
    classrooms.unenroll(payload).await?;

    Ok(Json(json!({ "message": "Student unenrolled successfully" })))
}

#[instrument(skip(state, query))]
pub async fn roster(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<RosterResponse>> {
    let classrooms = classroom_service(&state)?;
    Ok(Json(classrooms.roster(query.id).await?))
}
