use once_cell::unsync::OnceCell;
use reqwest::{Client, Error};
use shared::models::{
    ClassroomListResponse, ClassroomSummary, CreateClassroomRequest, CreateClassroomResponse,
    CreateTestRequest, CreateTestResponse, EnrollRequest, LoginRequest, LoginResponse, MeResponse,
    RegisterRequest, RegisterResponse, RosterResponse, SubmitResultRequest, TestDetail,
    TestListResponse, TestResultsResponse, UpdateTestRequest, UpdateUserRequest, UserListResponse,
};
use uuid::Uuid;

const DEFAULT_BASE_URL: &str = "/api";

thread_local! {
    static SHARED_CLIENT: OnceCell<AulaClient> = const { OnceCell::new() };
}

/// Lightweight API client for Aula web interactions. The session cookie
/// rides along automatically on same-origin requests.
#[derive(Clone, Debug)]
pub struct AulaClient {
    base_url: String,
    client: Client,
}

impl AulaClient {
    /// Create a new API client with the provided base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn shared() -> Self {
        SHARED_CLIENT.with(|cell| cell.get_or_init(|| Self::new(DEFAULT_BASE_URL)).clone())
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Register a new account.
    pub async fn register(&self, payload: &RegisterRequest) -> Result<RegisterResponse, Error> {
        let response = self
            .client
            .post(self.api_url("user/register"))
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        response.json().await
    }

    /// Authenticate with username/password credentials.
    pub async fn login(&self, payload: &LoginRequest) -> Result<LoginResponse, Error> {
        let response = self
            .client
            .post(self.api_url("user/login"))
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        response.json().await
    }

    /// Retrieve the authenticated user profile.
    pub async fn me(&self) -> Result<MeResponse, Error> {
        let response = self
            .client
            .get(self.api_url("auth/me"))
            .send()
            .await?
            .error_for_status()?;
        response.json().await
    }

    /// Terminate the current session.
    pub async fn logout(&self) -> Result<(), Error> {
        self.client
            .post(self.api_url("user/logout"))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Update the caller's name and username.
    pub async fn update_user(&self, payload: &UpdateUserRequest) -> Result<(), Error> {
        self.client
            .post(self.api_url("user/update"))
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// List every user. Admin view.
    pub async fn list_users(&self) -> Result<UserListResponse, Error> {
        let response = self
            .client
            .get(self.api_url("user/list"))
            .send()
            .await?
            .error_for_status()?;
        response.json().await
    }

    /// Delete a user account.
    pub async fn delete_user(&self, id: Uuid) -> Result<(), Error> {
        self.client
            .post(self.api_url("user/delete"))
            .json(&serde_json::json!({ "id": id }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// List every classroom.
    pub async fn list_classrooms(&self) -> Result<ClassroomListResponse, Error> {
        let response = self
            .client
            .get(self.api_url("classroom/list"))
            .send()
            .await?
            .error_for_status()?;
        response.json().await
    }

    /// Fetch a single classroom.
    pub async fn get_classroom(&self, id: Uuid) -> Result<ClassroomSummary, Error> {
        let response = self
            .client
            .get(self.api_url("classroom/get"))
            .query(&[("id", id)])
            .send()
            .await?
            .error_for_status()?;
        response.json().await
    }

    /// Create a classroom owned by a teacher.
    pub async fn create_classroom(
        &self,
        payload: &CreateClassroomRequest,
    ) -> Result<CreateClassroomResponse, Error> {
        let response = self
            .client
            .post(self.api_url("classroom/create"))
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        response.json().await
    }

    /// Delete a classroom.
    pub async fn delete_classroom(&self, id: Uuid) -> Result<(), Error> {
        self.client
            .post(self.api_url("classroom/delete"))
            .json(&serde_json::json!({ "id": id }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Enroll a student in a classroom.
    pub async fn enroll(&self, payload: &EnrollRequest) -> Result<(), Error> {
        self.client
            .post(self.api_url("classroom/enroll"))
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Remove a student from a classroom.
    pub async fn unenroll(&self, payload: &EnrollRequest) -> Result<(), Error> {
        self.client
            .post(self.api_url("classroom/unenroll"))
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// List the students enrolled in a classroom.
    pub async fn roster(&self, classroom_id: Uuid) -> Result<RosterResponse, Error> {
        let response = self
            .client
            .get(self.api_url("classroom/roster"))
            .query(&[("id", classroom_id)])
            .send()
            .await?
            .error_for_status()?;
        response.json().await
    }

    /// List every test.
    pub async fn list_tests(&self) -> Result<TestListResponse, Error> {
        let response = self
            .client
            .get(self.api_url("test/list"))
            .send()
            .await?
            .error_for_status()?;
        response.json().await
    }

    /// Fetch a test with its ordered questions.
    pub async fn get_test(&self, id: Uuid) -> Result<TestDetail, Error> {
        let response = self
            .client
            .get(self.api_url("test/get"))
            .query(&[("id", id)])
            .send()
            .await?
            .error_for_status()?;
        response.json().await
    }

    /// Create a test authored by the current teacher.
    pub async fn create_test(&self, payload: &CreateTestRequest) -> Result<CreateTestResponse, Error> {
        let response = self
            .client
            .post(self.api_url("test/create"))
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        response.json().await
    }

    /// Replace a test's name, category, and questions.
    pub async fn update_test(&self, payload: &UpdateTestRequest) -> Result<(), Error> {
        self.client
            .post(self.api_url("test/update"))
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Delete a test.
    pub async fn delete_test(&self, id: Uuid) -> Result<(), Error> {
        self.client
            .post(self.api_url("test/delete"))
            .json(&serde_json::json!({ "id": id }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Record the caller's score for a test.
    pub async fn submit_result(&self, payload: &SubmitResultRequest) -> Result<(), Error> {
        self.client
            .post(self.api_url("test/submit"))
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// The caller's own recorded results.
    pub async fn my_results(&self) -> Result<TestResultsResponse, Error> {
        let response = self
            .client
            .get(self.api_url("test/results"))
            .send()
            .await?
            .error_for_status()?;
        response.json().await
    }

    /// Every result recorded for one test.
    pub async fn results_for_test(&self, test_id: Uuid) -> Result<TestResultsResponse, Error> {
        let response = self
            .client
            .get(self.api_url("test/results"))
            .query(&[("test_id", test_id)])
            .send()
            .await?
            .error_for_status()?;
        response.json().await
    }
}
