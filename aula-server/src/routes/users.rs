use crate::{handlers::users, middleware::auth::require_session};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use tracing::info;

/// Function to register the user routes. Registration is public; the
/// rest requires an authenticated session.
pub fn create_router_users() -> Router {
    info!("Creating user router");
    let protected = Router::new()
        .route("/user/update", post(users::update))
        .route("/user/delete", post(users::delete))
        .route("/user/list", get(users::list))
        .route("/user/find", get(users::find))
        .route_layer(middleware::from_fn(require_session));

    Router::new()
        .route("/user/register", post(users::register))
        .merge(protected)
}
