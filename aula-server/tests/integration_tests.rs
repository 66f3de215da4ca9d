//! End-to-end tests for the HTTP surface: routing, session cookies, and
//! the status codes the services report through it.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{Extension, Router, http::StatusCode};
use axum_test::TestServer;
use chrono::{Duration, Utc};
use cookie::Cookie;
use serde_json::{Value, json};
use uuid::Uuid;

use server::app_state::AppState;
use server::auth::session::{
    SessionBundle, SessionError, SessionManager, SessionUser, build_session_cookie, hash_password,
};
use server::repo::{
    NewUser, TestDetailRow, TestRecord, TestResultRow, TestStore, TestSummaryRow, UserParam,
    UserRecord, UserStore,
};
use server::server as runtime;
use server::services::{TestService, UserService};
use shared::config::server::{Config, Profile};
use shared::models::{TestQuestion, UserRole};

#[derive(Default)]
struct MemoryUserStore {
    users: Mutex<Vec<UserRecord>>,
    classrooms: Mutex<Vec<(Uuid, Uuid)>>, // (classroom_id, teacher_id)
}

impl MemoryUserStore {
    fn seed_user(&self, name: &str, username: &str, email: &str, role: UserRole) -> Uuid {
        let id = Uuid::new_v4();
        self.users.lock().unwrap().push(UserRecord {
            id,
            name: name.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: hash_password("secret").unwrap(),
            role,
            created_at: Utc::now(),
        });
        id
    }

    fn add_classroom(&self, teacher_id: Uuid) {
        self.classrooms
            .lock()
            .unwrap()
            .push((Uuid::new_v4(), teacher_id));
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<UserRecord, sqlx::Error> {
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: user.name,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, sqlx::Error> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.id == id)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, sqlx::Error> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, sqlx::Error> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<UserRecord>, sqlx::Error> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn find_by_param(
        &self,
        param: UserParam,
        value: &str,
    ) -> Result<Vec<UserRecord>, sqlx::Error> {
        let users = self.users.lock().unwrap();
        let matches = match param {
            UserParam::Role => match UserRole::from_str(value) {
                Ok(role) => users
                    .iter()
                    .filter(|user| user.role == role)
                    .cloned()
                    .collect(),
                Err(_) => Vec::new(),
            },
            UserParam::Username => users
                .iter()
                .filter(|user| user.username == value)
                .cloned()
                .collect(),
            _ => Vec::new(),
        };
        Ok(matches)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: &str,
        username: &str,
    ) -> Result<(), sqlx::Error> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|user| user.id == id) {
            user.name = name.to_string();
            user.username = username.to_string();
        }
        Ok(())
    }

    async fn classroom_count(&self, teacher_id: Uuid) -> Result<i64, sqlx::Error> {
        Ok(self
            .classrooms
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, owner)| *owner == teacher_id)
            .count() as i64)
    }

    async fn delete(&self, id: Uuid) -> Result<(), sqlx::Error> {
        self.users.lock().unwrap().retain(|user| user.id != id);
        Ok(())
    }

    async fn delete_student_cascade(&self, id: Uuid) -> Result<(), sqlx::Error> {
        self.users.lock().unwrap().retain(|user| user.id != id);
        Ok(())
    }
}

struct StoredTest {
    record: TestRecord,
    questions: Vec<TestQuestion>,
}

#[derive(Default)]
struct MemoryTestStore {
    tests: Mutex<Vec<StoredTest>>,
}

#[async_trait]
impl TestStore for MemoryTestStore {
    async fn insert(
        &self,
        name: &str,
        category: &str,
        author_id: Uuid,
        questions: &[TestQuestion],
    ) -> Result<TestRecord, sqlx::Error> {
        let record = TestRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category: category.to_string(),
            author_id: Some(author_id),
            created_at: Utc::now(),
        };
        self.tests.lock().unwrap().push(StoredTest {
            record: record.clone(),
            questions: questions.to_vec(),
        });
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<TestSummaryRow>, sqlx::Error> {
        Ok(self
            .tests
            .lock()
            .unwrap()
            .iter()
            .map(|stored| TestSummaryRow {
                id: stored.record.id,
                name: stored.record.name.clone(),
                category: stored.record.category.clone(),
                author_name: None,
                author_username: None,
                created_at: stored.record.created_at,
            })
            .collect())
    }

    async fn find_detail(
        &self,
        id: Uuid,
    ) -> Result<Option<(TestDetailRow, Vec<TestQuestion>)>, sqlx::Error> {
        Ok(self
            .tests
            .lock()
            .unwrap()
            .iter()
            .find(|stored| stored.record.id == id)
            .map(|stored| {
                (
                    TestDetailRow {
                        id: stored.record.id,
                        name: stored.record.name.clone(),
                        category: stored.record.category.clone(),
                        author_id: stored.record.author_id,
                        author_name: None,
                        author_username: None,
                        created_at: stored.record.created_at,
                    },
                    stored.questions.clone(),
                )
            }))
    }

    async fn update(
        &self,
        id: Uuid,
        name: &str,
        category: &str,
        questions: &[TestQuestion],
    ) -> Result<(), sqlx::Error> {
        let mut tests = self.tests.lock().unwrap();
        if let Some(stored) = tests.iter_mut().find(|stored| stored.record.id == id) {
            stored.record.name = name.to_string();
            stored.record.category = category.to_string();
            stored.questions = questions.to_vec();
        }
        Ok(())
    }

    async fn delete_cascade(&self, id: Uuid) -> Result<(), sqlx::Error> {
        self.tests
            .lock()
            .unwrap()
            .retain(|stored| stored.record.id != id);
        Ok(())
    }

    async fn insert_result(
        &self,
        _test_id: Uuid,
        _student_id: Uuid,
        _score: i32,
    ) -> Result<Option<Uuid>, sqlx::Error> {
        Ok(Some(Uuid::new_v4()))
    }

    async fn results_for_student(
        &self,
        _student_id: Uuid,
    ) -> Result<Vec<TestResultRow>, sqlx::Error> {
        Ok(Vec::new())
    }

    async fn results_for_test(&self, _test_id: Uuid) -> Result<Vec<TestResultRow>, sqlx::Error> {
        Ok(Vec::new())
    }
}

/// Token-keyed session stub, the counterpart of the database-backed
/// manager.
struct StubSessionManager {
    config: Arc<Config>,
    users: Arc<MemoryUserStore>,
    active: Mutex<HashMap<String, SessionUser>>,
}

impl StubSessionManager {
    fn new(config: Arc<Config>, users: Arc<MemoryUserStore>) -> Self {
        Self {
            config,
            users,
            active: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl SessionManager for StubSessionManager {
    async fn issue_session(&self, user_id: Uuid) -> Result<SessionBundle, SessionError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(SessionError::Database)?
            .expect("session issued for unknown user");

        let token = Uuid::new_v4().to_string();
        let session_id = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::hours(1);

        self.active.lock().unwrap().insert(
            token.clone(),
            SessionUser {
                id: user.id,
                username: user.username,
                role: user.role,
                session_id,
                expires_at,
            },
        );

        let session_cookie = build_session_cookie(&self.config, &token, expires_at)?;
        Ok(SessionBundle {
            token,
            session_cookie,
            session_id,
            expires_at,
        })
    }

    async fn validate_session(&self, token: &str) -> Result<Option<SessionUser>, SessionError> {
        Ok(self.active.lock().unwrap().get(token).cloned())
    }

    async fn revoke_session(&self, token: &str) -> Result<(), SessionError> {
        self.active.lock().unwrap().remove(token);
        Ok(())
    }
}

struct TestHarness {
    server: TestServer,
    users: Arc<MemoryUserStore>,
    config: Arc<Config>,
}

fn harness() -> TestHarness {
    let mut config = Config::default_for_profile(Profile::Test);
    config.cookie.secure = false;
    let config = Arc::new(config);

    let users_store = Arc::new(MemoryUserStore::default());
    let tests_store = Arc::new(MemoryTestStore::default());

    let users = Arc::new(UserService::new(users_store.clone()));
    let tests = Arc::new(TestService::new(tests_store, users_store.clone()));
    let sessions: Arc<dyn SessionManager> =
        Arc::new(StubSessionManager::new(config.clone(), users_store.clone()));

    let state = Arc::new(AppState {
        pool: None,
        users: Some(users),
        classrooms: None,
        tests: Some(tests),
        sessions: Some(sessions),
    });

    let app = Router::new()
        .nest("/api", runtime::create_api_router())
        .layer(Extension(config.clone()))
        .layer(Extension(state));

    TestHarness {
        server: TestServer::new(app).expect("test server"),
        users: users_store,
        config,
    }
}

async fn login_cookie(harness: &TestHarness, username: &str) -> String {
    let response = harness
        .server
        .post("/api/user/login")
        .json(&json!({ "username": username, "password": "secret" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let cookie_name = harness.config.session.cookie_name.clone();
    let cookies = response.cookies();
    let session = cookies
        .iter()
        .find(|cookie| cookie.name() == cookie_name)
        .expect("session cookie");
    format!("{}={}", cookie_name, session.value())
}

#[tokio::test]
async fn register_returns_created_with_username() {
    let harness = harness();

    let response = harness
        .server
        .post("/api/user/register")
        .json(&json!({
            "name": "Ann",
            "username": "ann1",
            "email": "a@x.com",
            "password": "p",
            "role": "student"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["username"], "ann1");
}

#[tokio::test]
async fn register_duplicate_email_conflicts_naming_email() {
    let harness = harness();
    harness
        .users
        .seed_user("Ann", "ann1", "a@x.com", UserRole::Student);

    let response = harness
        .server
        .post("/api/user/register")
        .json(&json!({
            "name": "Other",
            "username": "ann1",
            "email": "a@x.com",
            "password": "p",
            "role": "student"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["message"], "Email already in use");
}

#[tokio::test]
async fn register_unknown_role_is_bad_request() {
    let harness = harness();

    let response = harness
        .server
        .post("/api/user/register")
        .json(&json!({
            "name": "Ann",
            "username": "ann1",
            "email": "a@x.com",
            "password": "p",
            "role": "principal"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("student"));
    assert!(message.contains("teacher"));
    assert!(message.contains("admin"));
}

#[tokio::test]
async fn login_failures_share_one_shape() {
    let harness = harness();
    harness
        .users
        .seed_user("Ann", "alice", "al@x.com", UserRole::Student);

    let wrong_password = harness
        .server
        .post("/api/user/login")
        .json(&json!({ "username": "alice", "password": "wrong" }))
        .await;
    let unknown_user = harness
        .server
        .post("/api/user/login")
        .json(&json!({ "username": "nonexistent", "password": "x" }))
        .await;

    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status_code(), StatusCode::UNAUTHORIZED);

    let first: Value = wrong_password.json();
    let second: Value = unknown_user.json();
    assert_eq!(first, second);
}

#[tokio::test]
async fn login_me_logout_roundtrip() {
    let harness = harness();
    harness
        .users
        .seed_user("Ann", "alice", "al@x.com", UserRole::Teacher);

    let cookie = login_cookie(&harness, "alice").await;

    let me = harness
        .server
        .get("/api/auth/me")
        .add_header(http::header::COOKIE, cookie.clone())
        .await;
    assert_eq!(me.status_code(), StatusCode::OK);
    let body: Value = me.json();
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["role"], "teacher");
    assert!(body["user"].get("password").is_none());

    let logout = harness
        .server
        .post("/api/user/logout")
        .add_header(http::header::COOKIE, cookie.clone())
        .await;
    assert_eq!(logout.status_code(), StatusCode::OK);

    // The cleared cookie expires immediately.
    let cleared = logout
        .headers()
        .get_all(http::header::SET_COOKIE)
        .iter()
        .map(|value| Cookie::parse(value.to_str().unwrap().to_string()).unwrap())
        .find(|parsed| parsed.name() == harness.config.session.cookie_name)
        .expect("clearing cookie");
    assert_eq!(cleared.value(), "");

    // The revoked session no longer validates.
    let me_after = harness
        .server
        .get("/api/auth/me")
        .add_header(http::header::COOKIE, cookie)
        .await;
    assert_eq!(me_after.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_require_a_session() {
    let harness = harness();

    let response = harness.server.get("/api/user/list").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = harness
        .server
        .post("/api/user/delete")
        .json(&json!({ "id": Uuid::new_v4() }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn find_with_no_matches_is_not_found() {
    let harness = harness();
    harness
        .users
        .seed_user("Ann", "alice", "al@x.com", UserRole::Student);
    let cookie = login_cookie(&harness, "alice").await;

    let response = harness
        .server
        .get("/api/user/find")
        .add_query_param("param", "role")
        .add_query_param("value", "teacher")
        .add_header(http::header::COOKIE, cookie.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = harness
        .server
        .get("/api/user/find")
        .add_query_param("param", "created_at")
        .add_query_param("value", "x")
        .add_header(http::header::COOKIE, cookie)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_teacher_with_classrooms_conflicts() {
    let harness = harness();
    harness
        .users
        .seed_user("Root", "root", "r@x.com", UserRole::Admin);
    let teacher = harness
        .users
        .seed_user("T", "teach", "t@x.com", UserRole::Teacher);
    harness.users.add_classroom(teacher);

    let cookie = login_cookie(&harness, "root").await;

    let response = harness
        .server
        .post("/api/user/delete")
        .json(&json!({ "id": teacher }))
        .add_header(http::header::COOKIE, cookie)
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["message"], "Cannot delete teacher with active classrooms");
}

#[tokio::test]
async fn only_the_author_updates_a_test() {
    let harness = harness();
    harness
        .users
        .seed_user("A", "author", "au@x.com", UserRole::Teacher);
    harness
        .users
        .seed_user("O", "other", "ot@x.com", UserRole::Teacher);

    let author_cookie = login_cookie(&harness, "author").await;
    let other_cookie = login_cookie(&harness, "other").await;

    let created = harness
        .server
        .post("/api/test/create")
        .json(&json!({
            "name": "Quiz",
            "category": "Math",
            "questions": [{ "position": 0, "prompt": "1+1?", "answer": "2" }]
        }))
        .add_header(http::header::COOKIE, author_cookie.clone())
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let body: Value = created.json();
    let test_id = body["id"].as_str().unwrap().to_string();

    let update = json!({
        "id": test_id,
        "name": "Quiz v2",
        "category": "Math",
        "questions": []
    });

    let forbidden = harness
        .server
        .post("/api/test/update")
        .json(&update)
        .add_header(http::header::COOKIE, other_cookie)
        .await;
    assert_eq!(forbidden.status_code(), StatusCode::UNAUTHORIZED);

    let allowed = harness
        .server
        .post("/api/test/update")
        .json(&update)
        .add_header(http::header::COOKIE, author_cookie)
        .await;
    assert_eq!(allowed.status_code(), StatusCode::OK);
}
