//! Student profile models and DTOs.
//!
//! The profile is a wide, mostly-nullable record created lazily on first
//! access. Identity fields (login email, role, activation) live on `users`;
//! nothing in this module can touch them.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::users::model::User;
use crate::utils::serde::deserialize_string_list;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, ToSchema)]
pub struct StudentProfile {
    pub id: Uuid,
    pub user_id: Uuid,

    // Personal
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<String>,
    pub blood_group: Option<String>,
    pub nationality: Option<String>,

    // Contact
    pub email: Option<String>,
    pub phone: Option<String>,
    pub alt_phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,

    // Academic
    pub student_id: Option<String>,
    pub register_number: Option<String>,
    pub roll_no: Option<String>,
    pub program: Option<String>,
    pub branch: Option<String>,
    pub semester: Option<String>,
    pub year: Option<String>,
    pub section: Option<String>,
    pub admission_year: Option<String>,
    pub passout_year: Option<String>,
    pub cgpa: Option<f64>,
    pub skills: Vec<String>,

    // Links / other
    pub profile_image: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub resume_link: Option<String>,
    pub hobbies: Option<String>,
    pub achievements: Option<String>,
    pub remarks: Option<String>,

    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Partial profile update. Absent fields are left untouched; unknown fields
/// (including `role`, `is_active` or anything else identity-shaped) are
/// dropped during deserialization, which is the whole write allow-list.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentProfileDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<String>,
    pub blood_group: Option<String>,
    pub nationality: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub alt_phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,

    pub student_id: Option<String>,
    pub register_number: Option<String>,
    pub roll_no: Option<String>,
    pub program: Option<String>,
    pub branch: Option<String>,
    pub semester: Option<String>,
    pub year: Option<String>,
    pub section: Option<String>,
    pub admission_year: Option<String>,
    pub passout_year: Option<String>,
    #[validate(range(min = 0.0, max = 10.0, message = "CGPA must be between 0 and 10"))]
    pub cgpa: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub skills: Option<Vec<String>>,

    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub resume_link: Option<String>,
    pub hobbies: Option<String>,
    pub achievements: Option<String>,
    pub remarks: Option<String>,
}

/// Admin listing row: the identity plus whatever profile exists so far.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentWithProfile {
    #[serde(flatten)]
    pub user: User,
    pub profile: Option<StudentProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_dto_ignores_identity_fields() {
        let dto: UpdateStudentProfileDto = serde_json::from_str(
            r#"{"first_name":"Ada","role":"admin","is_active":false,"user_id":"x"}"#,
        )
        .unwrap();
        assert_eq!(dto.first_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_update_dto_skills_accepts_both_shapes() {
        let from_array: UpdateStudentProfileDto =
            serde_json::from_str(r#"{"skills":["rust","sql"]}"#).unwrap();
        let from_text: UpdateStudentProfileDto =
            serde_json::from_str(r#"{"skills":"rust, sql"}"#).unwrap();
        assert_eq!(from_array.skills, from_text.skills);
    }

    #[test]
    fn test_update_dto_validates_cgpa_range() {
        let dto: UpdateStudentProfileDto = serde_json::from_str(r#"{"cgpa":11.5}"#).unwrap();
        assert!(validator::Validate::validate(&dto).is_err());
    }
}
