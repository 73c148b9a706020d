//! Client-related types shared between the attendance API and its clients
//!
//! Auth request/response DTOs. The login and register endpoints both answer
//! with an [`Identity`], which is also the record persisted across restarts.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Roles
// =============================================================================

/// Account role as issued by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Registration profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub employee_id: String,
    pub department: String,
    pub password: String,
    pub role: Role,
}

/// Authenticated identity returned by login/register
///
/// The API serializes ids as `_id`; both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
    /// Opaque bearer token
    pub token: String,
}

impl Identity {
    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_accepts_mongo_style_id() {
        let json = r#"{"_id":"u1","name":"Ana","email":"a@b.com","role":"employee","token":"t"}"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.id, "u1");
        assert_eq!(identity.role, Role::Employee);
        assert_eq!(identity.email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let json = r#"{"id":"u1","name":"Ana","role":"admin","token":"t"}"#;
        assert!(serde_json::from_str::<Identity>(json).is_err());
    }

    #[test]
    fn register_request_uses_camel_case() {
        let req = RegisterRequest {
            name: "Ana".into(),
            email: "a@b.com".into(),
            employee_id: "EMP001".into(),
            department: "Ops".into(),
            password: "secret".into(),
            role: Role::Manager,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["employeeId"], "EMP001");
        assert_eq!(value["role"], "manager");
    }
}
