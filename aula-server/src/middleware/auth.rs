use std::sync::Arc;

use axum::{
    body::Body,
    extract::Request,
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument};

use crate::{
    app_state::AppState,
    handlers::auth::extract_session_cookie,
    http::error::{ApiError, AppResult},
    middleware::request_context::RequestContext,
};
use shared::config::server::Config;

/// Middleware resolving the session cookie into an authenticated
/// request context. Requests without a valid session are rejected.
#[instrument(skip(req, next))]
pub async fn require_session(mut req: Request<Body>, next: Next) -> AppResult<Response> {
    let config = req
        .extensions()
        .get::<Arc<Config>>()
        .cloned()
        .ok_or_else(|| ApiError::internal_server_error("configuration unavailable"))?;
    let state = req
        .extensions()
        .get::<Arc<AppState>>()
        .cloned()
        .ok_or_else(|| ApiError::internal_server_error("application state unavailable"))?;
    let sessions = state
        .sessions
        .clone()
        .ok_or_else(|| ApiError::internal_server_error("session service unavailable"))?;

    let token = extract_session_cookie(req.headers(), &config.session.cookie_name)
        .ok_or_else(|| ApiError::unauthorized("authentication required"))?;

    let user = sessions
        .validate_session(&token)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::unauthorized("authentication required"))?;

    debug!(user_id = %user.id, path = %req.uri().path(), "authenticated request");

    if let Some(context) = req.extensions_mut().get_mut::<RequestContext>() {
        context.session = Some(user);
    } else {
        req.extensions_mut().insert(RequestContext {
            request_id: String::new(),
            session: Some(user),
        });
    }

    Ok(next.run(req).await)
}
