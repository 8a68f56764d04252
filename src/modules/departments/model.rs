//! Department models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::serde::deserialize_double_option;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, ToSchema)]
pub struct Department {
    pub id: Uuid,
    /// Uppercased, globally unique short code, e.g. `CSE`.
    pub code: String,
    pub name: String,
    pub description: String,
    /// Head of department, when assigned.
    pub hod_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateDepartmentDto {
    #[validate(length(min = 1, message = "Department code is required"))]
    pub code: String,
    #[validate(length(min = 1, message = "Department name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default, alias = "hod")]
    pub hod_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateDepartmentDto {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, alias = "hod", deserialize_with = "deserialize_double_option")]
    pub hod_id: Option<Option<Uuid>>,
    pub is_active: Option<bool>,
}
