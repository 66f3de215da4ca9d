use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use shared::models::{
    ClassroomListResponse, ClassroomSummary, CreateClassroomRequest, CreateClassroomResponse,
    EnrollRequest, RosterEntry, RosterResponse, UserRole,
};

use super::{ServiceError, ServiceResult};
use crate::repo::{ClassroomStore, ClassroomSummaryRow, UserStore};

/// Classroom rules: creation against an owning teacher, listing,
/// transactional deletion, and enrollment management.
#[derive(Clone)]
pub struct ClassroomService {
    classrooms: Arc<dyn ClassroomStore>,
    users: Arc<dyn UserStore>,
}

impl ClassroomService {
    pub fn new(classrooms: Arc<dyn ClassroomStore>, users: Arc<dyn UserStore>) -> Self {
        Self { classrooms, users }
    }

    #[instrument(name = "classrooms.create", skip(self, request), err)]
    pub async fn create(
        &self,
        request: CreateClassroomRequest,
    ) -> ServiceResult<CreateClassroomResponse> {
        if request.name.is_empty() {
            return Err(ServiceError::Validation(
                "Missing required field/s".to_string(),
            ));
        }

        let owner = self
            .users
            .find_by_id(request.teacher_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Teacher not found".to_string()))?;

        match owner.role {
            UserRole::Teacher => {}
            UserRole::Student | UserRole::Admin => {
                return Err(ServiceError::Conflict(
                    "Classroom owner must be a teacher".to_string(),
                ));
            }
        }

        let record = self
            .classrooms
            .insert(&request.name, request.teacher_id)
            .await?;

        Ok(CreateClassroomResponse {
            id: record.id,
            name: record.name,
        })
    }

    #[instrument(name = "classrooms.list", skip(self), err)]
    pub async fn list(&self) -> ServiceResult<ClassroomListResponse> {
        let classrooms = self.classrooms.list_all().await?;
        if classrooms.is_empty() {
            return Err(ServiceError::NotFound("No classrooms found".to_string()));
        }

        Ok(ClassroomListResponse {
            classrooms: classrooms.into_iter().map(summary).collect(),
        })
    }

    #[instrument(name = "classrooms.get", skip(self), err)]
    pub async fn get(&self, id: Uuid) -> ServiceResult<ClassroomSummary> {
        let row = self
            .classrooms
            .find_summary(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Classroom not found".to_string()))?;

        Ok(summary(row))
    }

    #[instrument(name = "classrooms.delete", skip(self), err)]
    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        if self.classrooms.find_by_id(id).await?.is_none() {
            return Err(ServiceError::NotFound("Classroom not found".to_string()));
        }

        self.classrooms
            .delete_cascade(id)
            .await
            .map_err(|err| ServiceError::Internal(format!("Failed to delete classroom: {err}")))
    }

    #[instrument(name = "classrooms.enroll", skip(self, request), err)]
    pub async fn enroll(&self, request: EnrollRequest) -> ServiceResult<()> {
        let student = self
            .users
            .find_by_id(request.student_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Student not found".to_string()))?;

        match student.role {
            UserRole::Student => {}
            UserRole::Teacher | UserRole::Admin => {
                return Err(ServiceError::Validation(
                    "Only students can be enrolled".to_string(),
                ));
            }
        }

        if self
            .classrooms
            .find_by_id(request.classroom_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound("Classroom not found".to_string()));
        }

        let inserted = self
            .classrooms
            .enroll(request.classroom_id, request.student_id)
            .await?;
        if !inserted {
            return Err(ServiceError::Conflict(
                "Student already enrolled".to_string(),
            ));
        }

        Ok(())
    }

    #[instrument(name = "classrooms.unenroll", skip(self, request), err)]
    pub async fn unenroll(&self, request: EnrollRequest) -> ServiceResult<()> {
        let removed = self
            .classrooms
            .unenroll(request.classroom_id, request.student_id)
            .await?;
        if !removed {
            return Err(ServiceError::NotFound("Enrollment not found".to_string()));
        }

        Ok(())
    }

    #[instrument(name = "classrooms.roster", skip(self), err)]
    pub async fn roster(&self, classroom_id: Uuid) -> ServiceResult<RosterResponse> {
        if self.classrooms.find_by_id(classroom_id).await?.is_none() {
            return Err(ServiceError::NotFound("Classroom not found".to_string()));
        }

        let students = self
            .classrooms
            .roster(classroom_id)
            .await?
            .into_iter()
            .map(|row| RosterEntry {
                student_id: row.student_id,
                name: row.name,
                username: row.username,
            })
            .collect();

        Ok(RosterResponse {
            classroom_id,
            students,
        })
    }
}

fn summary(row: ClassroomSummaryRow) -> ClassroomSummary {
    ClassroomSummary {
        id: row.id,
        name: row.name,
        teacher_username: row.teacher_username,
    }
}
