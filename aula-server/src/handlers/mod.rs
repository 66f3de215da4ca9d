pub mod auth;
pub mod classrooms;
pub mod users;

use std::sync::Arc;

use crate::app_state::AppState;
use crate::auth::session::SessionManager;
use crate::http::error::ApiError;
use crate::services::{ClassroomService, TestService, UserService};

pub(crate) fn user_service(state: &Arc<AppState>) -> Result<Arc<UserService>, ApiError> {
    state
        .users
        .clone()
        .ok_or_else(|| ApiError::internal_server_error("user service unavailable"))
}

pub(crate) fn classroom_service(state: &Arc<AppState>) -> Result<Arc<ClassroomService>, ApiError> {
    state
        .classrooms
        .clone()
        .ok_or_else(|| ApiError::internal_server_error("classroom service unavailable"))
}

pub(crate) fn test_service(state: &Arc<AppState>) -> Result<Arc<TestService>, ApiError> {
    state
        .tests
        .clone()
        .ok_or_else(|| ApiError::internal_server_error("test service unavailable"))
}

pub(crate) fn session_service(state: &Arc<AppState>) -> Result<Arc<dyn SessionManager>, ApiError> {
    state
        .sessions
        .clone()
        .ok_or_else(|| ApiError::internal_server_error("session service unavailable"))
}
