use crate::{handlers::classrooms, middleware::auth::require_session};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use tracing::info;

/// Function to register the classroom routes
pub fn create_router_classrooms() -> Router {
    info!("Creating classroom router");
    Router::new()
        .route("/classroom/create", post(classrooms::create))
        .route("/classroom/delete", post(classrooms::delete))
        .route("/classroom/list", get(classrooms::list))
        .route("/classroom/get", get(classrooms::get))
        .route("/classroom/enroll", post(classrooms::enroll))
        .route("/classroom/unenroll", post(classrooms::unenroll))
        .route("/classroom/roster", get(classrooms::roster))
        .route_layer(middleware::from_fn(require_session))
}
