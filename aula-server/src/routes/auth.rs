use crate::{handlers::auth::{login, logout, me}, middleware::auth::require_session};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use tracing::info;

/// Function to register the auth routes
pub fn create_router_auth() -> Router {
    info!("Creating auth router");
    Router::new()
        .route("/user/login", post(login))
        .route("/user/logout", post(logout))
        .route(
            "/auth/me",
            get(me).route_layer(middleware::from_fn(require_session)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_router_has_routes() {
        let router = create_router_auth();
        assert!(router.has_routes(), "Router should not be empty");
    }
}
