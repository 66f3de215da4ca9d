use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use shared::models::{
    CreateTestRequest, CreateTestResponse, SubmitResultRequest, TestDetail, TestListResponse,
    TestResultView, TestResultsResponse, TestSummary, Timestamp, UpdateTestRequest, UserRole,
};

use super::{ServiceError, ServiceResult};
use crate::repo::{TestResultRow, TestStore, UserStore};

/// Test rules: author-gated editing, transactional deletion, and result
/// recording.
#[derive(Clone)]
pub struct TestService {
    tests: Arc<dyn TestStore>,
    users: Arc<dyn UserStore>,
}

impl TestService {
    pub fn new(tests: Arc<dyn TestStore>, users: Arc<dyn UserStore>) -> Self {
        Self { tests, users }
    }

    #[instrument(name = "tests.create", skip(self, request), err)]
    pub async fn create(
        &self,
        author_id: Uuid,
        request: CreateTestRequest,
    ) -> ServiceResult<CreateTestResponse> {
        if request.name.is_empty() || request.category.is_empty() {
            return Err(ServiceError::Validation(
                "Missing required field/s".to_string(),
            ));
        }

        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Author not found".to_string()))?;

        match author.role {
            UserRole::Teacher => {}
            UserRole::Student | UserRole::Admin => {
                return Err(ServiceError::Unauthorized(
                    "Only teachers can create tests".to_string(),
                ));
            }
        }

        let record = self
            .tests
            .insert(&request.name, &request.category, author_id, &request.questions)
            .await?;

        Ok(CreateTestResponse {
            id: record.id,
            name: record.name,
        })
    }

    #[instrument(name = "tests.list", skip(self), err)]
    pub async fn list(&self) -> ServiceResult<TestListResponse> {
        let tests = self.tests.list_all().await?;
        if tests.is_empty() {
            return Err(ServiceError::NotFound("No tests found".to_string()));
        }

        Ok(TestListResponse {
            tests: tests
                .into_iter()
                .map(|row| TestSummary {
                    id: row.id,
                    name: row.name,
                    category: row.category,
                    author_name: row.author_name,
                    author_username: row.author_username,
                    created_at: Timestamp(row.created_at),
                })
                .collect(),
        })
    }

    #[instrument(name = "tests.get", skip(self), err)]
    pub async fn get(&self, id: Uuid) -> ServiceResult<TestDetail> {
        let (detail, questions) = self
            .tests
            .find_detail(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Test not found".to_string()))?;

        Ok(TestDetail {
            id: detail.id,
            name: detail.name,
            category: detail.category,
            author_name: detail.author_name,
            author_username: detail.author_username,
            created_at: Timestamp(detail.created_at),
            questions,
        })
    }

    #[instrument(name = "tests.update", skip(self, request), err)]
    pub async fn update(&self, actor_id: Uuid, request: UpdateTestRequest) -> ServiceResult<()> {
        if request.name.is_empty() || request.category.is_empty() {
            return Err(ServiceError::Validation(
                "Missing required field/s".to_string(),
            ));
        }

        let (detail, _) = self
            .tests
            .find_detail(request.id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Test not found".to_string()))?;

        if detail.author_id != Some(actor_id) {
            return Err(ServiceError::Unauthorized(
                "Only the test author can edit this test".to_string(),
            ));
        }

        self.tests
            .update(request.id, &request.name, &request.category, &request.questions)
            .await?;

        Ok(())
    }

    #[instrument(name = "tests.delete", skip(self), err)]
    pub async fn delete(&self, actor_id: Uuid, id: Uuid) -> ServiceResult<()> {
        let (detail, _) = self
            .tests
            .find_detail(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Test not found".to_string()))?;

        if detail.author_id != Some(actor_id) {
            return Err(ServiceError::Unauthorized(
                "Only the test author can delete this test".to_string(),
            ));
        }

        self.tests
            .delete_cascade(id)
            .await
            .map_err(|err| ServiceError::Internal(format!("Failed to delete test: {err}")))
    }

    #[instrument(name = "tests.submit_result", skip(self, request), err)]
    pub async fn submit_result(
        &self,
        student_id: Uuid,
        request: SubmitResultRequest,
    ) -> ServiceResult<()> {
        let student = self
            .users
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Student not found".to_string()))?;

        match student.role {
            UserRole::Student => {}
            UserRole::Teacher | UserRole::Admin => {
                return Err(ServiceError::Validation(
                    "Only students can submit results".to_string(),
                ));
            }
        }

        if self.tests.find_detail(request.test_id).await?.is_none() {
            return Err(ServiceError::NotFound("Test not found".to_string()));
        }

        let inserted = self
            .tests
            .insert_result(request.test_id, student_id, request.score)
            .await?;
        if inserted.is_none() {
            return Err(ServiceError::Conflict(
                "Result already recorded for this test".to_string(),
            ));
        }

        Ok(())
    }

    #[instrument(name = "tests.results_for_student", skip(self), err)]
    pub async fn results_for_student(
        &self,
        student_id: Uuid,
    ) -> ServiceResult<TestResultsResponse> {
        let results = self.tests.results_for_student(student_id).await?;
        if results.is_empty() {
            return Err(ServiceError::NotFound("No results found".to_string()));
        }

        Ok(results_response(results))
    }

    #[instrument(name = "tests.results_for_test", skip(self), err)]
    pub async fn results_for_test(&self, test_id: Uuid) -> ServiceResult<TestResultsResponse> {
        let results = self.tests.results_for_test(test_id).await?;
        if results.is_empty() {
            return Err(ServiceError::NotFound("No results found".to_string()));
        }

        Ok(results_response(results))
    }
}

fn results_response(rows: Vec<TestResultRow>) -> TestResultsResponse {
    TestResultsResponse {
        results: rows
            .into_iter()
            .map(|row| TestResultView {
                id: row.id,
                test_id: row.test_id,
                test_name: row.test_name,
                student_id: row.student_id,
                student_username: row.student_username,
                score: row.score,
                taken_at: Timestamp(row.taken_at),
            })
            .collect(),
    }
}
