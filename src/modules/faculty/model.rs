//! Faculty models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::users::model::User;
use crate::utils::serde::deserialize_string_list;

/// Employment state shown on the faculty profile. Purely informational: it
/// does not gate login, `is_active` on the account does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Active,
    OnLeave,
    Resigned,
}

impl EmploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentStatus::Active => "active",
            EmploymentStatus::OnLeave => "on_leave",
            EmploymentStatus::Resigned => "resigned",
        }
    }
}

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, ToSchema)]
pub struct FacultyProfile {
    pub id: Uuid,
    pub user_id: Uuid,

    // Personal
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<String>,

    // Contact
    pub email: Option<String>,
    pub phone: Option<String>,
    pub alt_phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,

    // Employment
    pub faculty_id: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub teaching_subjects: Vec<String>,
    pub qualification: Option<String>,
    pub experience_years: Option<i32>,
    pub experience_summary: Option<String>,
    pub employment_status: String,

    // Links / other
    pub profile_image: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub remarks: Option<String>,

    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Admin provisioning of a faculty account. When `password` is absent a
/// temporary one is generated and returned once in the response.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateFacultyDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub password: Option<String>,
}

/// Partial faculty profile update. Same allow-list mechanics as the student
/// profile DTO.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateFacultyProfileDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub alt_phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,

    pub faculty_id: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub teaching_subjects: Option<Vec<String>>,
    pub qualification: Option<String>,
    #[validate(range(min = 0, max = 60, message = "Experience years out of range"))]
    pub experience_years: Option<i32>,
    pub experience_summary: Option<String>,
    pub employment_status: Option<EmploymentStatus>,

    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FacultyWithProfile {
    #[serde(flatten)]
    pub user: User,
    pub profile: Option<FacultyProfile>,
}

/// Creation response. `temp_password` is present only when the server
/// generated one, and this is the only place it ever appears.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateFacultyResponse {
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_password: Option<String>,
}
