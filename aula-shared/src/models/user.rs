use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::Timestamp;

/// Account roles recognized by the platform.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Student,
    Teacher,
    Admin,
}

impl UserRole {
    /// Canonical string representation expected by the persistence layer.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Admin => "admin",
        }
    }

    /// The allowed values, in the order they are reported to clients.
    #[must_use]
    pub fn allowed_values() -> &'static str {
        "student, teacher, admin"
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "student" => Ok(Self::Student),
            "teacher" => Ok(Self::Teacher),
            "admin" => Ok(Self::Admin),
            _ => Err("unknown user role"),
        }
    }
}

/// Public projection of a user account. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicUser {
    /// Unique identifier for the user.
    pub id: uuid::Uuid,

    /// The user's display name.
    pub name: String,

    /// The user's username.
    pub username: String,

    /// The user's email address.
    pub email: String,

    /// The user's role.
    pub role: UserRole,
}

/// Request to register a new account.
///
/// Role arrives as a raw string so the server can report unknown values
/// with the allowed list instead of failing at deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Response to a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterResponse {
    pub message: String,
    pub username: String,
}

/// Request to authenticate with username and password.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response to a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub message: String,
    pub user: PublicUser,
}

/// Response to a session check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeResponse {
    pub user: PublicUser,
    pub expires_at: Timestamp,
}

/// Request to update an existing account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateUserRequest {
    pub id: uuid::Uuid,
    pub name: String,
    pub username: String,
}

/// Request to delete an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteUserRequest {
    pub id: uuid::Uuid,
}

/// Response carrying a list of user projections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserListResponse {
    pub users: Vec<PublicUser>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_role_roundtrip() {
        for (text, role) in [
            ("student", UserRole::Student),
            ("teacher", UserRole::Teacher),
            ("admin", UserRole::Admin),
        ] {
            assert_eq!(role.as_str(), text);
            assert_eq!(role.to_string(), text);
            assert_eq!(UserRole::from_str(text).unwrap(), role);
        }
    }

    #[test]
    fn user_role_rejects_unknown_values() {
        assert!(UserRole::from_str("principal").is_err());
        assert!(UserRole::from_str("").is_err());
        assert!(UserRole::from_str("Teacher").is_err());
    }

    #[test]
    fn public_user_serialization_uses_snake_case_role() {
        let user = PublicUser {
            id: uuid::Uuid::new_v4(),
            name: "Ann Field".to_string(),
            username: "ann1".to_string(),
            email: "a@x.com".to_string(),
            role: UserRole::Student,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"role\":\"student\""));
        assert!(!json.contains("password"));

        let back: PublicUser = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }
}
