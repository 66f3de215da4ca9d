use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// A classroom row.
#[derive(Debug, Clone)]
pub struct ClassroomRecord {
    pub id: Uuid,
    pub name: String,
    pub teacher_id: Uuid,
}

/// Classroom joined with its owning teacher, as shown in list views.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClassroomSummaryRow {
    pub id: Uuid,
    pub name: String,
    pub teacher_username: String,
}

/// One enrolled student.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RosterRow {
    pub student_id: Uuid,
    pub name: String,
    pub username: String,
}

/// Data access for classroom and enrollment rows.
#[async_trait]
pub trait ClassroomStore: Send + Sync {
    async fn insert(&self, name: &str, teacher_id: Uuid) -> Result<ClassroomRecord, sqlx::Error>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ClassroomRecord>, sqlx::Error>;
    async fn find_summary(&self, id: Uuid) -> Result<Option<ClassroomSummaryRow>, sqlx::Error>;
    async fn list_all(&self) -> Result<Vec<ClassroomSummaryRow>, sqlx::Error>;
    /// Remove a classroom and its enrollments inside one transaction.
    async fn delete_cascade(&self, id: Uuid) -> Result<(), sqlx::Error>;
    /// Returns `false` when the student is already enrolled.
    async fn enroll(&self, classroom_id: Uuid, student_id: Uuid) -> Result<bool, sqlx::Error>;
    /// Returns `false` when no such enrollment exists.
    async fn unenroll(&self, classroom_id: Uuid, student_id: Uuid) -> Result<bool, sqlx::Error>;
    async fn roster(&self, classroom_id: Uuid) -> Result<Vec<RosterRow>, sqlx::Error>;
}

#[derive(sqlx::FromRow)]
struct ClassroomRow {
    id: Uuid,
    name: String,
    teacher_id: Uuid,
}

impl ClassroomRow {
    fn into_record(self) -> ClassroomRecord {
        ClassroomRecord {
            id: self.id,
            name: self.name,
            teacher_id: self.teacher_id,
        }
    }
}

/// Postgres-backed classroom store.
#[derive(Clone)]
pub struct PgClassroomStore {
    pool: PgPool,
}

impl PgClassroomStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassroomStore for PgClassroomStore {
    async fn insert(&self, name: &str, teacher_id: Uuid) -> Result<ClassroomRecord, sqlx::Error> {
        let row = sqlx::query_as::<_, ClassroomRow>(
            "INSERT INTO aula.classrooms (id, name, teacher_id)
             VALUES ($1, $2, $3)
             RETURNING id, name, teacher_id",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(teacher_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_record())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ClassroomRecord>, sqlx::Error> {
        let row = sqlx::query_as::<_, ClassroomRow>(
            "SELECT id, name, teacher_id FROM aula.classrooms WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ClassroomRow::into_record))
    }

    async fn find_summary(&self, id: Uuid) -> Result<Option<ClassroomSummaryRow>, sqlx::Error> {
        sqlx::query_as::<_, ClassroomSummaryRow>(
            "SELECT c.id, c.name, u.username::TEXT AS teacher_username
             FROM aula.classrooms c
             JOIN aula.users u ON u.id = c.teacher_id
             WHERE c.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_all(&self) -> Result<Vec<ClassroomSummaryRow>, sqlx::Error> {
        sqlx::query_as::<_, ClassroomSummaryRow>(
            "SELECT c.id, c.name, u.username::TEXT AS teacher_username
             FROM aula.classrooms c
             JOIN aula.users u ON u.id = c.teacher_id
             ORDER BY c.name",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn delete_cascade(&self, id: Uuid) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM aula.enrollments WHERE classroom_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM aula.classrooms WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await
    }

    async fn enroll(&self, classroom_id: Uuid, student_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO aula.enrollments (classroom_id, student_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(classroom_id)
        .bind(student_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn unenroll(&self, classroom_id: Uuid, student_id: Uuid) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM aula.enrollments WHERE classroom_id = $1 AND student_id = $2")
                .bind(classroom_id)
                .bind(student_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn roster(&self, classroom_id: Uuid) -> Result<Vec<RosterRow>, sqlx::Error> {
        sqlx::query_as::<_, RosterRow>(
            "SELECT u.id AS student_id, u.name, u.username::TEXT AS username
             FROM aula.enrollments e
             JOIN aula.users u ON u.id = e.student_id
             WHERE e.classroom_id = $1
             ORDER BY u.name",
        )
        .bind(classroom_id)
        .fetch_all(&self.pool)
        .await
    }
}
