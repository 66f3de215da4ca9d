use std::{str::FromStr, sync::Arc};

use argon2::password_hash::rand_core::{OsRng, RngCore};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use cookie::{Cookie, SameSite};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use thiserror::Error;
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};
use uuid::Uuid;

use shared::{
    config::server::{Config, CookieSameSite},
    models::UserRole,
};

/// Errors produced by the session subsystem.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
    #[error("password verification failed")]
    InvalidCredentials,
    #[error("session expired")]
    SessionExpired,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("time conversion error: {0}")]
    TimeConversion(String),
}

/// Authenticated user details attached to the request context.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: Uuid,
    pub username: String,
    pub role: UserRole,
    pub session_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Session issuance output containing the raw token and encoded cookie.
#[derive(Debug, Clone)]
pub struct SessionBundle {
    pub token: String,
    pub session_cookie: Cookie<'static>,
    pub session_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Seam between handlers and the session backend. Tests substitute a
/// stub implementation.
#[async_trait]
pub trait SessionManager: Send + Sync {
    async fn issue_session(&self, user_id: Uuid) -> Result<SessionBundle, SessionError>;
    async fn validate_session(&self, token: &str) -> Result<Option<SessionUser>, SessionError>;
    async fn revoke_session(&self, token: &str) -> Result<(), SessionError>;
}

/// Database-backed session manager with a sliding idle expiry.
#[derive(Clone)]
pub struct PgSessionManager {
    pool: PgPool,
    config: Arc<Config>,
}

impl PgSessionManager {
    pub fn new(pool: PgPool, config: Arc<Config>) -> Self {
        Self { pool, config }
    }

    fn idle_window(&self) -> Duration {
        Duration::seconds(self.config.session.idle_seconds.max(1) as i64)
    }

    fn build_cookie(
        &self,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Cookie<'static>, SessionError> {
        build_session_cookie(&self.config, token, expires_at)
    }

    fn new_token() -> (String, Vec<u8>) {
        let mut raw = [0u8; 32];
        OsRng.fill_bytes(&mut raw);
        let token = URL_SAFE_NO_PAD.encode(raw);
        let hash = Sha256::digest(token.as_bytes());
        (token, hash.to_vec())
    }

    fn hash_for_token(token: &str) -> Vec<u8> {
        Sha256::digest(token.as_bytes()).to_vec()
    }
}

#[async_trait]
impl SessionManager for PgSessionManager {
    async fn issue_session(&self, user_id: Uuid) -> Result<SessionBundle, SessionError> {
        let (token, hash) = Self::new_token();
        let expires_at = Utc::now() + self.idle_window();

        let session_id: Uuid = sqlx::query_scalar(
            "INSERT INTO aula.sessions (id, user_id, token_hash, expires_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&hash)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        debug!(user_id = %user_id, session_id = %session_id, "issued new session");

        let session_cookie = self.build_cookie(&token, expires_at)?;

        Ok(SessionBundle {
            token,
            session_cookie,
            session_id,
            expires_at,
        })
    }

    async fn validate_session(&self, token: &str) -> Result<Option<SessionUser>, SessionError> {
        if token.trim().is_empty() {
            return Ok(None);
        }

        let hash = Self::hash_for_token(token);

        let session = sqlx::query_as::<_, ActiveSessionRow>(
            "SELECT s.id AS session_id,
                    s.user_id,
                    s.expires_at,
                    u.username::TEXT AS username,
                    u.role::TEXT AS role
             FROM aula.sessions s
             JOIN aula.users u ON u.id = s.user_id
             WHERE s.token_hash = $1
               AND s.revoked_at IS NULL",
        )
        .bind(hash)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = session else {
            return Ok(None);
        };

        let now = Utc::now();
        if row.expires_at <= now {
            sqlx::query("UPDATE aula.sessions SET revoked_at = now() WHERE id = $1")
                .bind(row.session_id)
                .execute(&self.pool)
                .await?;
            return Err(SessionError::SessionExpired);
        }

        // Sliding idle expiry: every validated request pushes the window.
        let expires_at = now + self.idle_window();
        sqlx::query("UPDATE aula.sessions SET expires_at = $2 WHERE id = $1")
            .bind(row.session_id)
            .bind(expires_at)
            .execute(&self.pool)
            .await?;

        let role = UserRole::from_str(&row.role).unwrap_or_else(|_| {
            warn!(user_id = %row.user_id, role = %row.role, "unknown user role in database");
            UserRole::Student
        });

        Ok(Some(SessionUser {
            id: row.user_id,
            username: row.username,
            role,
            session_id: row.session_id,
            expires_at,
        }))
    }

    async fn revoke_session(&self, token: &str) -> Result<(), SessionError> {
        let hash = Self::hash_for_token(token);
        sqlx::query("UPDATE aula.sessions SET revoked_at = now() WHERE token_hash = $1")
            .bind(hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Build the session cookie for the given token and expiry.
pub fn build_session_cookie(
    config: &Config,
    token: &str,
    expires_at: DateTime<Utc>,
) -> Result<Cookie<'static>, SessionError> {
    let expires_utc = OffsetDateTime::from_unix_timestamp(expires_at.timestamp()).map_err(
        |err| SessionError::TimeConversion(format!("failed to convert cookie expiry: {err}")),
    )?;
    let max_age = (expires_utc - OffsetDateTime::now_utc()).max(TimeDuration::seconds(0));
    let same_site = map_same_site(config.cookie.same_site);

    let mut builder = Cookie::build((config.session.cookie_name.clone(), token.to_owned()))
        .path("/")
        .http_only(true)
        .secure(config.cookie.secure)
        .same_site(same_site)
        .max_age(max_age)
        .expires(expires_utc);

    if let Some(domain) = &config.cookie.domain {
        builder = builder.domain(domain.clone());
    }

    Ok(builder.build())
}

/// Build an immediately expiring cookie used on logout.
pub fn clear_session_cookie(config: &Config) -> Cookie<'static> {
    let mut builder = Cookie::build((config.session.cookie_name.clone(), String::new()))
        .path("/")
        .http_only(true)
        .secure(config.cookie.secure)
        .same_site(map_same_site(config.cookie.same_site))
        .max_age(TimeDuration::seconds(0))
        .expires(OffsetDateTime::UNIX_EPOCH);

    if let Some(domain) = &config.cookie.domain {
        builder = builder.domain(domain.clone());
    }

    builder.build()
}

fn map_same_site(value: CookieSameSite) -> SameSite {
    match value {
        CookieSameSite::Lax => SameSite::Lax,
        CookieSameSite::Strict => SameSite::Strict,
        CookieSameSite::None => SameSite::None,
    }
}

/// Compute an Argon2id password hash.
pub fn hash_password(password: &str) -> Result<String, SessionError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| SessionError::PasswordHash(err.to_string()))
}

/// Verify a password against an encoded Argon2id hash.
pub fn verify_password(hash: &str, candidate: &str) -> Result<(), SessionError> {
    let parsed =
        PasswordHash::new(hash).map_err(|err| SessionError::PasswordHash(err.to_string()))?;
    let argon2 = Argon2::default();
    argon2
        .verify_password(candidate.as_bytes(), &parsed)
        .map_err(|_| SessionError::InvalidCredentials)
}

#[derive(sqlx::FromRow)]
struct ActiveSessionRow {
    session_id: Uuid,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    username: String,
    role: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::config::server::Profile;

    #[test]
    fn password_hash_roundtrip() {
        let hash = hash_password("correct horse").unwrap();
        assert_ne!(hash, "correct horse");
        assert!(verify_password(&hash, "correct horse").is_ok());
        assert!(matches!(
            verify_password(&hash, "wrong horse"),
            Err(SessionError::InvalidCredentials)
        ));
    }

    #[test]
    fn hashing_salts_each_password() {
        let first = hash_password("p").unwrap();
        let second = hash_password("p").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn session_cookie_carries_configured_attributes() {
        let mut config = Config::default_for_profile(Profile::Dev);
        config.cookie.secure = true;
        config.cookie.domain = Some("aula.example".into());
        config.cookie.same_site = CookieSameSite::Strict;

        let expires_at = Utc::now() + Duration::hours(1);
        let cookie = build_session_cookie(&config, "token-value", expires_at).unwrap();

        assert_eq!(cookie.name(), "AULA_SESSION");
        assert_eq!(cookie.value(), "token-value");
        assert!(cookie.http_only().unwrap());
        assert!(cookie.secure().unwrap());
        assert_eq!(cookie.domain(), Some("aula.example"));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let config = Config::default_for_profile(Profile::Dev);
        let cookie = clear_session_cookie(&config);

        assert_eq!(cookie.name(), "AULA_SESSION");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(TimeDuration::seconds(0)));
    }
}
