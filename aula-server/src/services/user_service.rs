use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::instrument;
use uuid::Uuid;

use shared::models::{
    LoginRequest, PublicUser, RegisterRequest, RegisterResponse, UpdateUserRequest,
    UserListResponse, UserRole,
};

use super::{ServiceError, ServiceResult};
use crate::auth::session::{hash_password, verify_password};
use crate::repo::{NewUser, UserParam, UserRecord, UserStore};

// Field limits mirror the column definitions in the schema.
const MAX_NAME_LEN: usize = 255;
const MAX_USERNAME_LEN: usize = 12;
const MAX_EMAIL_LEN: usize = 70;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex compiles"));

/// Account management rules: registration, profile updates, deletion
/// with role-dependent cascades, lookups, and credential checks.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    #[instrument(name = "users.register", skip(self, request), err)]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<RegisterResponse> {
        let RegisterRequest {
            name,
            username,
            email,
            password,
            role,
        } = request;

        if name.is_empty()
            || username.is_empty()
            || email.is_empty()
            || password.is_empty()
            || role.is_empty()
        {
            return Err(ServiceError::Validation(
                "Missing required field/s".to_string(),
            ));
        }

        // Email is checked before username so a record colliding on both
        // reports the email conflict.
        if self.store.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::Conflict("Email already in use".to_string()));
        }
        if self.store.find_by_username(&username).await?.is_some() {
            return Err(ServiceError::Conflict(
                "Username already in use".to_string(),
            ));
        }

        let role = UserRole::from_str(&role).map_err(|_| {
            ServiceError::Validation(format!(
                "Invalid role provided. Allowed values are: {}.",
                UserRole::allowed_values()
            ))
        })?;

        let password_hash =
            hash_password(&password).map_err(|err| ServiceError::Internal(err.to_string()))?;

        validate_fields(&name, &username, &email)?;

        let record = self
            .store
            .insert(NewUser {
                name,
                username,
                email,
                password_hash,
                role,
            })
            .await?;

        Ok(RegisterResponse {
            message: "User registered successfully".to_string(),
            username: record.username,
        })
    }

    #[instrument(name = "users.delete", skip(self), err)]
    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        let user = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

        let outcome = match user.role {
            UserRole::Teacher => {
                if self.store.classroom_count(id).await? > 0 {
                    return Err(ServiceError::Conflict(
                        "Cannot delete teacher with active classrooms".to_string(),
                    ));
                }
                self.store.delete(id).await
            }
            UserRole::Student => self.store.delete_student_cascade(id).await,
            UserRole::Admin => self.store.delete(id).await,
        };

        outcome.map_err(|err| ServiceError::Internal(format!("Failed to delete user: {err}")))
    }

    #[instrument(name = "users.update", skip(self, request), err)]
    pub async fn update(&self, request: UpdateUserRequest) -> ServiceResult<()> {
        if request.id.is_nil() {
            return Err(ServiceError::Validation("Invalid body request".to_string()));
        }

        let user = self
            .store
            .find_by_id(request.id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

        if request.name.is_empty() || request.username.is_empty() {
            return Err(ServiceError::Validation(
                "Missing required field/s in body request".to_string(),
            ));
        }

        if request.username != user.username {
            if let Some(existing) = self.store.find_by_username(&request.username).await? {
                if existing.id != user.id {
                    return Err(ServiceError::Conflict(
                        "Username already in use".to_string(),
                    ));
                }
            }
        }

        validate_fields(&request.name, &request.username, &user.email)?;

        self.store
            .update_profile(user.id, &request.name, &request.username)
            .await?;

        Ok(())
    }

    #[instrument(name = "users.list_all", skip(self), err)]
    pub async fn list_all(&self) -> ServiceResult<UserListResponse> {
        let users = self.store.find_all().await?;
        if users.is_empty() {
            return Err(ServiceError::NotFound("No users found".to_string()));
        }

        Ok(UserListResponse {
            users: users.iter().map(public_projection).collect(),
        })
    }

    #[instrument(name = "users.list_by_param", skip(self), err)]
    pub async fn list_by_param(
        &self,
        param: Option<&str>,
        value: Option<&str>,
    ) -> ServiceResult<UserListResponse> {
        let param = param
            .and_then(|raw| UserParam::from_str(raw).ok())
            .ok_or_else(|| {
                ServiceError::Validation("Parameter missing or not allowed".to_string())
            })?;

        let Some(value) = value else {
            return Err(ServiceError::Validation(
                "Missing value parameter in query string".to_string(),
            ));
        };

        let users = self.store.find_by_param(param, value).await?;
        if users.is_empty() {
            return Err(ServiceError::NotFound("No users found".to_string()));
        }

        Ok(UserListResponse {
            users: users.iter().map(public_projection).collect(),
        })
    }

    #[instrument(name = "users.login", skip(self, request), err)]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<PublicUser> {
        if request.username.is_empty() || request.password.is_empty() {
            return Err(ServiceError::Validation(
                "Username and password are required".to_string(),
            ));
        }

        // An unknown username and a failed hash comparison produce the
        // same error so callers cannot probe for accounts.
        let invalid = || ServiceError::Unauthorized("Invalid credentials".to_string());

        let user = self
            .store
            .find_by_username(&request.username)
            .await?
            .ok_or_else(invalid)?;

        verify_password(&user.password_hash, &request.password).map_err(|_| invalid())?;

        Ok(public_projection(&user))
    }

    #[instrument(name = "users.get", skip(self), err)]
    pub async fn get(&self, id: Uuid) -> ServiceResult<PublicUser> {
        let user = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

        Ok(public_projection(&user))
    }
}

/// Projection handed to clients. The password hash never appears here.
fn public_projection(record: &UserRecord) -> PublicUser {
    PublicUser {
        id: record.id,
        name: record.name.clone(),
        username: record.username.clone(),
        email: record.email.clone(),
        role: record.role,
    }
}

fn validate_fields(name: &str, username: &str, email: &str) -> ServiceResult<()> {
    if name.len() > MAX_NAME_LEN {
        return Err(ServiceError::Validation(format!(
            "name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    if username.len() > MAX_USERNAME_LEN {
        return Err(ServiceError::Validation(format!(
            "username must be at most {MAX_USERNAME_LEN} characters"
        )));
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(ServiceError::Validation(format!(
            "email must be at most {MAX_EMAIL_LEN} characters"
        )));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ServiceError::Validation(
            "email is not a valid address".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// In-memory store tracking users plus the dependent rows the
    /// delete cascades are expected to touch.
    #[derive(Default)]
    struct MemoryUserStore {
        users: Mutex<Vec<UserRecord>>,
        classrooms: Mutex<Vec<(Uuid, Uuid)>>, // (classroom_id, teacher_id)
        results: Mutex<Vec<(Uuid, Uuid)>>,    // (result_id, student_id)
        enrollments: Mutex<Vec<(Uuid, Uuid)>>, // (classroom_id, student_id)
        fail_deletes: Mutex<bool>,
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

        fn add_result(&self, student_id: Uuid) {
            self.results
                .lock()
                .unwrap()
                .push((Uuid::new_v4(), student_id));
        }

        fn add_enrollment(&self, student_id: Uuid) {
            self.enrollments
                .lock()
                .unwrap()
                .push((Uuid::new_v4(), student_id));
        }

        fn set_fail_deletes(&self) {
            *self.fail_deletes.lock().unwrap() = true;
        }

        fn usernames(&self) -> HashSet<String> {
            self.users
                .lock()
                .unwrap()
                .iter()
                .map(|user| user.username.clone())
                .collect()
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

        async fn find_by_username(
            &self,
            username: &str,
        ) -> Result<Option<UserRecord>, sqlx::Error> {
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
                UserParam::Id => match Uuid::parse_str(value) {
                    Ok(id) => users.iter().filter(|u| u.id == id).cloned().collect(),
                    Err(_) => Vec::new(),
                },
                UserParam::Role => match UserRole::from_str(value) {
                    Ok(role) => users.iter().filter(|u| u.role == role).cloned().collect(),
                    Err(_) => Vec::new(),
                },
                UserParam::Name => users.iter().filter(|u| u.name == value).cloned().collect(),
                UserParam::Username => users
                    .iter()
                    .filter(|u| u.username == value)
                    .cloned()
                    .collect(),
                UserParam::Email => users.iter().filter(|u| u.email == value).cloned().collect(),
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
            if *self.fail_deletes.lock().unwrap() {
                return Err(sqlx::Error::PoolTimedOut);
            }
            self.users.lock().unwrap().retain(|user| user.id != id);
            Ok(())
        }

        async fn delete_student_cascade(&self, id: Uuid) -> Result<(), sqlx::Error> {
            if *self.fail_deletes.lock().unwrap() {
                return Err(sqlx::Error::PoolTimedOut);
            }
            self.results
                .lock()
                .unwrap()
                .retain(|(_, student)| *student != id);
            self.enrollments
                .lock()
                .unwrap()
                .retain(|(_, student)| *student != id);
            self.users.lock().unwrap().retain(|user| user.id != id);
            Ok(())
        }
    }

    fn service() -> (UserService, Arc<MemoryUserStore>) {
        let store = Arc::new(MemoryUserStore::default());
        (UserService::new(store.clone()), store)
    }

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            name: "Ann".to_string(),
            username: "ann1".to_string(),
            email: "a@x.com".to_string(),
            password: "p".to_string(),
            role: "student".to_string(),
        }
    }

    #[tokio::test]
    async fn register_succeeds_and_reports_username() {
        let (service, store) = service();
        let response = service.register(register_request()).await.unwrap();

        assert_eq!(response.username, "ann1");
        assert_eq!(response.message, "User registered successfully");
        assert!(store.usernames().contains("ann1"));
    }

    #[tokio::test]
    async fn register_never_stores_the_plaintext_password() {
        let (service, store) = service();
        service.register(register_request()).await.unwrap();

        let users = store.users.lock().unwrap();
        let stored = &users[0].password_hash;
        assert_ne!(stored, "p");
        assert!(verify_password(stored, "p").is_ok());
    }

    #[tokio::test]
    async fn register_rejects_every_missing_field_combination() {
        for mask in 1..32u8 {
            let (service, _) = service();
            let mut request = register_request();
            if mask & 1 != 0 {
                request.name.clear();
            }
            if mask & 2 != 0 {
                request.username.clear();
            }
            if mask & 4 != 0 {
                request.email.clear();
            }
            if mask & 8 != 0 {
                request.password.clear();
            }
            if mask & 16 != 0 {
                request.role.clear();
            }

            let error = service.register(request).await.unwrap_err();
            assert!(
                matches!(&error, ServiceError::Validation(msg) if msg == "Missing required field/s"),
                "mask {mask} produced {error:?}"
            );
        }
    }

    #[tokio::test]
    async fn register_reports_email_conflict_before_username() {
        let (service, store) = service();
        store.seed_user("Ann", "ann1", "a@x.com", UserRole::Student);

        // Colliding on both fields still names the email.
        let error = service.register(register_request()).await.unwrap_err();
        assert!(matches!(&error, ServiceError::Conflict(msg) if msg == "Email already in use"));

        // Colliding on username only names the username.
        let mut request = register_request();
        request.email = "other@x.com".to_string();
        let error = service.register(request).await.unwrap_err();
        assert!(matches!(&error, ServiceError::Conflict(msg) if msg == "Username already in use"));
    }

    #[tokio::test]
    async fn register_rejects_unknown_role_listing_allowed_values() {
        let (service, _) = service();
        let mut request = register_request();
        request.role = "principal".to_string();

        let error = service.register(request).await.unwrap_err();
        let ServiceError::Validation(message) = error else {
            panic!("expected validation error");
        };
        assert!(message.contains("student"));
        assert!(message.contains("teacher"));
        assert!(message.contains("admin"));
    }

    #[tokio::test]
    async fn register_enforces_field_limits() {
        let (service, _) = service();
        let mut request = register_request();
        request.username = "far-too-long-username".to_string();

        let error = service.register(request).await.unwrap_err();
        assert!(matches!(&error, ServiceError::Validation(msg) if msg.contains("username")));

        let mut request = register_request();
        request.email = "not-an-email".to_string();
        let error = service.register(request).await.unwrap_err();
        assert!(matches!(&error, ServiceError::Validation(msg) if msg.contains("email")));
    }

    #[tokio::test]
    async fn delete_missing_user_is_not_found() {
        let (service, _) = service();
        let error = service.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(error, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_teacher_with_classrooms_conflicts() {
        let (service, store) = service();
        let teacher = store.seed_user("T", "teach", "t@x.com", UserRole::Teacher);
        store.add_classroom(teacher);

        let error = service.delete(teacher).await.unwrap_err();
        assert!(
            matches!(&error, ServiceError::Conflict(msg) if msg == "Cannot delete teacher with active classrooms")
        );
        assert!(store.usernames().contains("teach"));
    }

    #[tokio::test]
    async fn delete_teacher_without_classrooms_succeeds() {
        let (service, store) = service();
        let teacher = store.seed_user("T", "teach", "t@x.com", UserRole::Teacher);

        service.delete(teacher).await.unwrap();
        assert!(!store.usernames().contains("teach"));
    }

    #[tokio::test]
    async fn delete_student_cascades_results_and_enrollments() {
        let (service, store) = service();
        let student = store.seed_user("S", "stud", "s@x.com", UserRole::Student);
        let other = store.seed_user("O", "other", "o@x.com", UserRole::Student);
        store.add_result(student);
        store.add_result(student);
        store.add_result(other);
        store.add_enrollment(student);
        store.add_enrollment(other);

        service.delete(student).await.unwrap();

        assert!(!store.usernames().contains("stud"));
        let results = store.results.lock().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].1, other);
        let enrollments = store.enrollments.lock().unwrap();
        assert_eq!(enrollments.len(), 1);
        assert_eq!(enrollments[0].1, other);
    }

    #[tokio::test]
    async fn delete_surfaces_persistence_failures_as_internal() {
        let (service, store) = service();
        let student = store.seed_user("S", "stud", "s@x.com", UserRole::Student);
        store.set_fail_deletes();

        let error = service.delete(student).await.unwrap_err();
        let ServiceError::Internal(message) = error else {
            panic!("expected internal error");
        };
        assert!(message.starts_with("Failed to delete user:"));
    }

    #[tokio::test]
    async fn update_requires_id_and_fields() {
        let (service, store) = service();
        let id = store.seed_user("Ann", "ann1", "a@x.com", UserRole::Student);

        let error = service
            .update(UpdateUserRequest {
                id: Uuid::nil(),
                name: "Ann".to_string(),
                username: "ann1".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(&error, ServiceError::Validation(msg) if msg == "Invalid body request"));

        let error = service
            .update(UpdateUserRequest {
                id,
                name: String::new(),
                username: "ann1".to_string(),
            })
            .await
            .unwrap_err();
        assert!(
            matches!(&error, ServiceError::Validation(msg) if msg == "Missing required field/s in body request")
        );
    }

    #[tokio::test]
    async fn update_missing_target_is_not_found() {
        let (service, _) = service();
        let error = service
            .update(UpdateUserRequest {
                id: Uuid::new_v4(),
                name: "Ann".to_string(),
                username: "ann1".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(error, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_rejects_username_taken_by_another_user() {
        let (service, store) = service();
        let id = store.seed_user("Ann", "ann1", "a@x.com", UserRole::Student);
        store.seed_user("Bob", "bob1", "b@x.com", UserRole::Student);

        let error = service
            .update(UpdateUserRequest {
                id,
                name: "Ann".to_string(),
                username: "bob1".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(&error, ServiceError::Conflict(msg) if msg == "Username already in use"));
    }

    #[tokio::test]
    async fn update_to_own_unchanged_username_succeeds() {
        let (service, store) = service();
        let id = store.seed_user("Ann", "ann1", "a@x.com", UserRole::Student);

        service
            .update(UpdateUserRequest {
                id,
                name: "Ann Field".to_string(),
                username: "ann1".to_string(),
            })
            .await
            .unwrap();

        let users = store.users.lock().unwrap();
        assert_eq!(users[0].name, "Ann Field");
    }

    #[tokio::test]
    async fn list_all_on_empty_store_is_not_found() {
        let (service, _) = service();
        let error = service.list_all().await.unwrap_err();
        assert!(matches!(&error, ServiceError::NotFound(msg) if msg == "No users found"));
    }

    #[tokio::test]
    async fn list_all_projects_without_password() {
        let (service, store) = service();
        store.seed_user("Ann", "ann1", "a@x.com", UserRole::Admin);

        let response = service.list_all().await.unwrap();
        assert_eq!(response.users.len(), 1);
        assert_eq!(response.users[0].username, "ann1");
        assert_eq!(response.users[0].role, UserRole::Admin);

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("password"));
    }

    #[tokio::test]
    async fn list_by_param_validates_param_and_value() {
        let (service, store) = service();
        store.seed_user("Ann", "ann1", "a@x.com", UserRole::Student);

        let error = service
            .list_by_param(Some("password_hash"), Some("x"))
            .await
            .unwrap_err();
        assert!(
            matches!(&error, ServiceError::Validation(msg) if msg == "Parameter missing or not allowed")
        );

        let error = service.list_by_param(None, Some("x")).await.unwrap_err();
        assert!(matches!(error, ServiceError::Validation(_)));

        let error = service
            .list_by_param(Some("username"), None)
            .await
            .unwrap_err();
        assert!(
            matches!(&error, ServiceError::Validation(msg) if msg == "Missing value parameter in query string")
        );
    }

    #[tokio::test]
    async fn list_by_param_with_no_matches_is_not_found() {
        let (service, store) = service();
        store.seed_user("Ann", "ann1", "a@x.com", UserRole::Student);

        let error = service
            .list_by_param(Some("role"), Some("teacher"))
            .await
            .unwrap_err();
        assert!(matches!(&error, ServiceError::NotFound(msg) if msg == "No users found"));

        // An unparseable id value matches nothing rather than erroring.
        let error = service
            .list_by_param(Some("id"), Some("not-a-uuid"))
            .await
            .unwrap_err();
        assert!(matches!(error, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_by_param_returns_matches() {
        let (service, store) = service();
        store.seed_user("Ann", "ann1", "a@x.com", UserRole::Teacher);
        store.seed_user("Bob", "bob1", "b@x.com", UserRole::Student);

        let response = service
            .list_by_param(Some("role"), Some("teacher"))
            .await
            .unwrap();
        assert_eq!(response.users.len(), 1);
        assert_eq!(response.users[0].username, "ann1");
    }

    #[tokio::test]
    async fn login_requires_both_fields() {
        let (service, _) = service();
        let error = service
            .login(LoginRequest {
                username: "ann1".to_string(),
                password: String::new(),
            })
            .await
            .unwrap_err();
        assert!(
            matches!(&error, ServiceError::Validation(msg) if msg == "Username and password are required")
        );
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let (service, store) = service();
        store.seed_user("Ann", "alice", "al@x.com", UserRole::Student);

        let wrong_password = service
            .login(LoginRequest {
                username: "alice".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();
        let unknown_user = service
            .login(LoginRequest {
                username: "nonexistent".to_string(),
                password: "x".to_string(),
            })
            .await
            .unwrap_err();

        let ServiceError::Unauthorized(first) = wrong_password else {
            panic!("expected unauthorized");
        };
        let ServiceError::Unauthorized(second) = unknown_user else {
            panic!("expected unauthorized");
        };
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn login_returns_public_projection() {
        let (service, store) = service();
        store.seed_user("Ann", "alice", "al@x.com", UserRole::Teacher);

        let user = service
            .login(LoginRequest {
                username: "alice".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(user.role, UserRole::Teacher);
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
    }
}
