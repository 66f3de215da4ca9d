use std::sync::Arc;

use axum::{
    Json,
    extract::Extension,
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::instrument;

use crate::{
    app_state::AppState,
    auth::session::clear_session_cookie,
    handlers::{session_service, user_service},
    http::error::{ApiError, AppResult},
    middleware::request_context::RequestContext,
};
use shared::{
    config::server::Config,
    models::{LoginRequest, LoginResponse, MeResponse, Timestamp},
};

pub fn extract_session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| {
            cookie::Cookie::split_parse(raw)
                .flatten()
                .find(|cookie| cookie.name() == name)
                .map(|cookie| cookie.value().to_string())
        })
}

fn apply_cookies(response: &mut Response, cookies: &[cookie::Cookie<'static>]) {
    for cookie in cookies {
        if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn login(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Response> {
    let users = user_service(&state)?;
    let sessions = session_service(&state)?;

    let user = users.login(payload).await?;
    let bundle = sessions.issue_session(user.id).await?;

    let response_body = LoginResponse {
        message: "Login successful".to_string(),
        user,
    };

    let mut response = Json(response_body).into_response();
    apply_cookies(&mut response, &[bundle.session_cookie.clone()]);

    Ok(response)
}

#[instrument(skip(state, config, headers))]
pub async fn logout(
    Extension(state): Extension<Arc<AppState>>,
    Extension(config): Extension<Arc<Config>>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let sessions = session_service(&state)?;

    let token = extract_session_cookie(&headers, &config.session.cookie_name)
        .ok_or_else(|| ApiError::unauthorized("session cookie missing"))?;

    sessions.revoke_session(&token).await?;

    let mut response = Json(json!({ "message": "Logged out" })).into_response();
    apply_cookies(&mut response, &[clear_session_cookie(&config)]);

    Ok(response)
}

#[instrument(skip(state, context))]
pub async fn me(
    Extension(state): Extension<Arc<AppState>>,
    Extension(context): Extension<RequestContext>,
) -> AppResult<Json<MeResponse>> {
    let session = context
        .session
        .ok_or_else(|| ApiError::unauthorized("authentication required"))?;

    let users = user_service(&state)?;
    let user = users.get(session.id).await?;

    Ok(Json(MeResponse {
        user,
        expires_at: Timestamp(session.expires_at),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_session_cookie_reads_specific_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; AULA_SESSION=token123"),
        );
        let value = extract_session_cookie(&headers, "AULA_SESSION");
        assert_eq!(value.as_deref(), Some("token123"));
    }

    #[test]
    fn extract_session_cookie_misses_other_names() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("foo=bar"));
        assert!(extract_session_cookie(&headers, "AULA_SESSION").is_none());
    }

    #[test]
    fn apply_cookies_appends_set_cookie_headers() {
        let mut response = Json(json!({ "ok": true })).into_response();
        let cookie = cookie::Cookie::build(("AULA_SESSION", "token"))
            .path("/")
            .build();
        apply_cookies(&mut response, &[cookie]);

        let values: Vec<_> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|value| value.to_str().unwrap().to_string())
            .collect();
        assert_eq!(values.len(), 1);
        assert!(values[0].starts_with("AULA_SESSION=token"));
    }
}
