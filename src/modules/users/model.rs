//! User (identity) models and DTOs.
//!
//! A [`User`] is an authenticable account; role-specific attributes live in
//! the student/faculty profile modules. The password hash is selected only
//! by the login path and never appears on this struct, so it cannot leak
//! through serialization.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// The three system roles. Stored as lowercase text; immutable after
/// creation except through the admin-only role-update endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Faculty,
    Student,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Faculty => "faculty",
            UserRole::Student => "student",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserRole::Admin),
            "faculty" => Some(UserRole::Faculty),
            "student" => Some(UserRole::Student),
            _ => None,
        }
    }

    /// Where the frontend sends this role after login.
    pub fn redirect_path(&self) -> &'static str {
        match self {
            UserRole::Admin => "/admin/dashboard",
            UserRole::Faculty => "/faculty/dashboard",
            UserRole::Student => "/student/dashboard",
        }
    }
}

/// An identity record. Never hard-deleted; `is_active` is the deletion
/// substitute.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Admin-only role change. Decoupled from login on purpose: no endpoint
/// changes the caller's own role.
#[derive(Debug, Clone, Deserialize, validator::Validate, ToSchema)]
pub struct UpdateRoleDto {
    pub role: UserRole,
}

/// Admin-only activation toggle.
#[derive(Debug, Clone, Deserialize, validator::Validate, ToSchema)]
pub struct UpdateStatusDto {
    pub is_active: bool,
}
