use std::{
    net::SocketAddr,
    sync::{Arc, OnceLock},
    time::Duration,
};

use axum::{Extension, Router, response::IntoResponse, routing::get, serve};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, fmt};

use crate::{
    app_state::AppState,
    auth::session::PgSessionManager,
    db::bootstrap,
    middleware::request_context::{self, RequestIdState},
    repo::{PgClassroomStore, PgTestStore, PgUserStore},
    routes,
    services::{ClassroomService, TestService, UserService},
};
use axum::http::{HeaderValue, StatusCode, header};
use shared::config::server::{Config, DatabaseConfig, LogFormat};

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub fn metrics_handle() -> PrometheusHandle {
    PROMETHEUS_HANDLE
        .get_or_init(|| {
            PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

async fn metrics_endpoint(Extension(handle): Extension<PrometheusHandle>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; version=0.0.4"),
        )],
        handle.render(),
    )
}

/// Initializes the tracing subscriber for logging using the provided configuration.
pub fn initialize_tracing(config: &Config) -> String {
    let env_filter = build_env_filter(config);

    let fmt_builder = fmt::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false);

    if matches!(config.logging.format, LogFormat::Json) {
        fmt_builder.json().with_ansi(false).init();
    } else {
        fmt_builder.with_ansi(true).init();
    }

    config.logging.level.clone()
}

fn build_env_filter(config: &Config) -> EnvFilter {
    let default_level = config
        .logging
        .level
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::INFO);

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::builder()
            .with_default_directive(default_level.into())
            .from_env_lossy()
    })
}

/// Creates a database connection pool from the given database settings.
///
/// # Errors
/// Returns an error if the database connection pool cannot be created.
pub async fn create_database_pool(db: &DatabaseConfig) -> Result<sqlx::PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(db.max_connections)
        .connect(&db.url)
        .await?;
    metrics::gauge!("db_pool_max_connections").set(f64::from(db.max_connections));
    Ok(pool)
}

/// Creates the application state, wiring the Postgres-backed stores and
/// services when a pool is available.
pub fn create_app_state(pool: Option<sqlx::PgPool>, config: &Arc<Config>) -> Arc<AppState> {
    let Some(pool) = pool else {
        return Arc::new(AppState::default());
    };

    let users_store = Arc::new(PgUserStore::new(pool.clone()));
    let classrooms_store = Arc::new(PgClassroomStore::new(pool.clone()));
    let tests_store = Arc::new(PgTestStore::new(pool.clone()));

    let users = Arc::new(UserService::new(users_store.clone()));
    let classrooms = Arc::new(ClassroomService::new(
        classrooms_store,
        users_store.clone(),
    ));
    let tests = Arc::new(TestService::new(tests_store, users_store));
    let sessions = Arc::new(PgSessionManager::new(pool.clone(), config.clone()));

    Arc::new(AppState {
        pool: Some(pool),
        users: Some(users),
        classrooms: Some(classrooms),
        tests: Some(tests),
        sessions: Some(sessions),
    })
}

/// Creates the CORS layer for the application.
pub fn create_cors_layer(config: &Config) -> CorsLayer {
    use http::Method;

    let methods = vec![
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let mut cors = CorsLayer::new()
        .allow_methods(AllowMethods::list(methods))
        .allow_headers(AllowHeaders::any())
        .allow_credentials(config.server.cors.allow_credentials)
        .max_age(Duration::from_secs(config.server.cors.max_age_seconds));

    if config.server.cors.allowed_origins.is_empty() {
        cors = cors.allow_origin(AllowOrigin::any());
    } else {
        let origins = config
            .server
            .cors
            .allowed_origins
            .iter()
            .filter_map(|origin| http::HeaderValue::from_str(origin).ok())
            .collect::<Vec<_>>();
        cors = cors.allow_origin(AllowOrigin::list(origins));
    }

    cors
}

/// Creates the API router with all route modules.
pub fn create_api_router() -> Router {
    Router::new()
        .merge(routes::auth::create_router_auth())
        .merge(routes::users::create_router_users())
        .merge(routes::classrooms::create_router_classrooms())
        .merge(routes::tests::create_router_tests())
}

/// Creates the static file service for serving frontend assets with a
/// SPA fallback.
pub fn create_static_service(
    static_dir: std::path::PathBuf,
    spa_index: std::path::PathBuf,
) -> Router {
    use axum::routing::get_service;
    use tower_http::services::ServeFile;

    Router::new().fallback_service(
        ServeDir::new(static_dir)
            .append_index_html_on_directories(true)
            .fallback(get_service(ServeFile::new(spa_index))),
    )
}

/// Creates the main application router with all middleware and routes.
pub fn create_app_router(
    state: Arc<AppState>,
    config: Arc<Config>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let cors = create_cors_layer(&config);
    let request_id_state = RequestIdState::from_config(&config);

    let static_files_service =
        create_static_service(config.web.static_dir.clone(), config.web.spa_index.clone());

    Router::new()
        .nest("/api", create_api_router())
        .merge(routes::health::create_health_router())
        .route("/metrics", get(metrics_endpoint))
        .merge(static_files_service)
        .layer(Extension(metrics_handle))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn_with_state(
            request_id_state,
            request_context::assign_request_id,
        ))
        .layer(Extension(config))
        .layer(Extension(state))
}

/// Creates the graceful shutdown signal handler.
pub async fn create_shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
    info!("Shutting down...");
}

/// Starts the backend server and binds it to the configured port.
///
/// # Errors
/// Returns an error if the server fails to start.
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    initialize_tracing(&config);
    info!("Starting server...");

    let metrics_handle = metrics_handle();
    let config = Arc::new(config);

    // Set up database connection pool
    let pool = create_database_pool(&config.db)
        .await
        .map_err(|err| -> Box<dyn std::error::Error> { Box::new(err) })?;

    // Run database bootstrap and health checks
    bootstrap::ensure_liveness(&pool)
        .await
        .map_err(|err| -> Box<dyn std::error::Error> { Box::new(err) })?;

    bootstrap::run(&pool, &config.db)
        .await
        .map_err(|err| -> Box<dyn std::error::Error> { Box::new(err) })?;

    bootstrap::ensure_readiness(&pool)
        .await
        .map_err(|err| -> Box<dyn std::error::Error> { Box::new(err) })?;

    // Create application state
    let state = create_app_state(Some(pool), &config);

    // Create the application router
    let app = create_app_router(state, config.clone(), metrics_handle);

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    let shutdown_signal = create_shutdown_signal();

    serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}
