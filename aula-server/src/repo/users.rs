use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use shared::models::UserRole;

/// A fully materialized user row. The password hash never leaves the
/// service layer.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new user. The id and creation timestamp are
/// assigned by the store at insert time.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// Columns callers may filter on. Closed set; anything else is rejected
/// before the store is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserParam {
    Id,
    Name,
    Username,
    Email,
    Role,
}

impl FromStr for UserParam {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "username" => Ok(Self::Username),
            "email" => Ok(Self::Email),
            "role" => Ok(Self::Role),
            _ => Err("parameter not allowed"),
        }
    }
}

/// Data access for user rows.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: NewUser) -> Result<UserRecord, sqlx::Error>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, sqlx::Error>;
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, sqlx::Error>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, sqlx::Error>;
    async fn find_all(&self) -> Result<Vec<UserRecord>, sqlx::Error>;
    async fn find_by_param(
        &self,
        param: UserParam,
        value: &str,
    ) -> Result<Vec<UserRecord>, sqlx::Error>;
    async fn update_profile(
        &self,
        id: Uuid,
        name: &str,
        username: &str,
    ) -> Result<(), sqlx::Error>;
    async fn classroom_count(&self, teacher_id: Uuid) -> Result<i64, sqlx::Error>;
    /// Remove a user row with no dependent records of its own.
    async fn delete(&self, id: Uuid) -> Result<(), sqlx::Error>;
    /// Remove a student together with their test results and enrollments,
    /// inside one transaction.
    async fn delete_student_cascade(&self, id: Uuid) -> Result<(), sqlx::Error>;
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    username: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_record(self) -> UserRecord {
        let role = UserRole::from_str(&self.role).unwrap_or_else(|_| {
            warn!(user_id = %self.id, role = %self.role, "unknown user role in database");
            UserRole::Student
        });
        UserRecord {
            id: self.id,
            name: self.name,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            role,
            created_at: self.created_at,
        }
    }
}

const USER_COLUMNS: &str = "id,
        name,
        username::TEXT AS username,
        email::TEXT AS email,
        password_hash,
        role::TEXT AS role,
        created_at";

/// Postgres-backed user store.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> Result<UserRecord, sqlx::Error> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO aula.users (id, name, username, email, password_hash, role)
             VALUES ($1, $2, $3, $4, $5, $6::aula.user_role)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_record())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, sqlx::Error> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM aula.users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_record))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, sqlx::Error> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM aula.users WHERE username = $1::citext"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_record))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, sqlx::Error> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM aula.users WHERE email = $1::citext"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_record))
    }

    async fn find_all(&self) -> Result<Vec<UserRecord>, sqlx::Error> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM aula.users ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UserRow::into_record).collect())
    }

    async fn find_by_param(
        &self,
        param: UserParam,
        value: &str,
    ) -> Result<Vec<UserRecord>, sqlx::Error> {
        // Values that do not parse for a typed column match nothing.
        let rows = match param {
            UserParam::Id => {
                let Ok(id) = Uuid::parse_str(value) else {
                    return Ok(Vec::new());
                };
                sqlx::query_as::<_, UserRow>(&format!(
                    "SELECT {USER_COLUMNS} FROM aula.users WHERE id = $1"
                ))
                .bind(id)
                .fetch_all(&self.pool)
                .await?
            }
            UserParam::Role => {
                let Ok(role) = UserRole::from_str(value) else {
                    return Ok(Vec::new());
                };
                sqlx::query_as::<_, UserRow>(&format!(
                    "SELECT {USER_COLUMNS} FROM aula.users
                     WHERE role = $1::aula.user_role ORDER BY created_at"
                ))
                .bind(role.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            UserParam::Name => {
                sqlx::query_as::<_, UserRow>(&format!(
                    "SELECT {USER_COLUMNS} FROM aula.users WHERE name = $1 ORDER BY created_at"
                ))
                .bind(value)
                .fetch_all(&self.pool)
                .await?
            }
            UserParam::Username => {
                sqlx::query_as::<_, UserRow>(&format!(
                    "SELECT {USER_COLUMNS} FROM aula.users WHERE username = $1::citext"
                ))
                .bind(value)
                .fetch_all(&self.pool)
                .await?
            }
            UserParam::Email => {
                sqlx::query_as::<_, UserRow>(&format!(
                    "SELECT {USER_COLUMNS} FROM aula.users WHERE email = $1::citext"
                ))
                .bind(value)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(UserRow::into_record).collect())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: &str,
        username: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE aula.users SET name = $2, username = $3 WHERE id = $1")
            .bind(id)
            .bind(name)
            .bind(username)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn classroom_count(&self, teacher_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM aula.classrooms WHERE teacher_id = $1")
            .bind(teacher_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM aula.users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_student_cascade(&self, id: Uuid) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM aula.test_results WHERE student_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM aula.enrollments WHERE student_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM aula.users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await
    }
}
