pub mod classroom_service;
pub mod test_service;
pub mod user_service;

use thiserror::Error;

pub use classroom_service::ClassroomService;
pub use test_service::TestService;
pub use user_service::UserService;

/// Error taxonomy shared by every service. Variants map one-to-one onto
/// the HTTP statuses reported to clients (400, 409, 404, 401, 500).
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
