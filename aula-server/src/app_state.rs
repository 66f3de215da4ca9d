use std::sync::Arc;

use crate::auth::session::SessionManager;
use crate::services::{ClassroomService, TestService, UserService};

/// Application state shared across all routes. Services are optional so
/// tests can wire only the pieces they exercise.
#[derive(Clone, Default)]
pub struct AppState {
    pub pool: Option<sqlx::PgPool>,
    pub users: Option<Arc<UserService>>,
    pub classrooms: Option<Arc<ClassroomService>>,
    pub tests: Option<Arc<TestService>>,
    pub sessions: Option<Arc<dyn SessionManager>>,
}
