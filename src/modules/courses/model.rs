//! Course catalog models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::serde::deserialize_double_option;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, ToSchema)]
pub struct Course {
    pub id: Uuid,
    /// Uppercased, globally unique catalog code, e.g. `CS101`.
    pub code: String,
    pub name: String,
    pub department: String,
    pub credits: i32,
    pub semester: i32,
    /// `""` means no section split; otherwise `A`, `B` or `C`.
    pub section: String,
    pub faculty_id: Option<Uuid>,
    pub description: String,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Listing row: the course plus the assigned instructor's identity, when any.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct CourseWithFaculty {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub course: Course,
    pub faculty_name: Option<String>,
    pub faculty_email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1, message = "Course code is required"))]
    pub code: String,
    #[validate(length(min = 1, message = "Course name is required"))]
    pub name: String,
    pub department: Option<String>,
    pub credits: Option<i32>,
    pub semester: Option<i32>,
    pub section: Option<String>,
    /// Instructor's user id. Must be a faculty account.
    #[serde(default, alias = "faculty_id")]
    pub faculty: Option<Uuid>,
    pub description: Option<String>,
}

/// Partial course update. `faculty` distinguishes "leave as is" (absent) from
/// "unassign" (explicit null).
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    pub code: Option<String>,
    pub name: Option<String>,
    pub department: Option<String>,
    pub credits: Option<i32>,
    pub semester: Option<i32>,
    pub section: Option<String>,
    #[serde(default, alias = "faculty_id", deserialize_with = "deserialize_double_option")]
    pub faculty: Option<Option<Uuid>>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_dto_faculty_null_vs_absent() {
        let absent: UpdateCourseDto = serde_json::from_str(r#"{"name":"Algorithms"}"#).unwrap();
        assert_eq!(absent.faculty, None);

        let unassign: UpdateCourseDto = serde_json::from_str(r#"{"faculty":null}"#).unwrap();
        assert_eq!(unassign.faculty, Some(None));
    }

    #[test]
    fn test_create_dto_accepts_faculty_id_alias() {
        let id = Uuid::new_v4();
        let dto: CreateCourseDto = serde_json::from_str(&format!(
            r#"{{"code":"cs101","name":"Intro","faculty_id":"{}"}}"#,
            id
        ))
        .unwrap();
        assert_eq!(dto.faculty, Some(id));
    }
}
