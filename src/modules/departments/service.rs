use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::departments::model::{
    CreateDepartmentDto, Department, UpdateDepartmentDto,
};
use crate::utils::errors::AppError;

const DEPARTMENT_COLUMNS: &str =
    "id, code, name, description, hod_id, is_active, created_at, updated_at";

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

pub struct DepartmentService;

impl DepartmentService {
    #[instrument(skip(db, dto), fields(code = %dto.code))]
    pub async fn create_department(
        db: &PgPool,
        dto: CreateDepartmentDto,
    ) -> Result<Department, AppError> {
        sqlx::query_as::<_, Department>(&format!(
            "INSERT INTO departments (code, name, description, hod_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {DEPARTMENT_COLUMNS}"
        ))
        .bind(dto.code.trim().to_uppercase())
        .bind(dto.name.trim())
        .bind(dto.description.unwrap_or_default())
        .bind(dto.hod_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("Department code already exists")
            } else {
                e.into()
            }
        })
    }

    /// Listing, optionally filtered by a case-insensitive substring match on
    /// code or name.
    #[instrument(skip(db))]
    pub async fn list_departments(
        db: &PgPool,
        search: Option<String>,
    ) -> Result<Vec<Department>, AppError> {
        let departments = match search {
            Some(q) => {
                sqlx::query_as::<_, Department>(&format!(
                    "SELECT {DEPARTMENT_COLUMNS} FROM departments
                     WHERE code ILIKE $1 OR name ILIKE $1 ORDER BY code"
                ))
                .bind(format!("%{}%", q))
                .fetch_all(db)
                .await?
            }
            None => {
                sqlx::query_as::<_, Department>(&format!(
                    "SELECT {DEPARTMENT_COLUMNS} FROM departments ORDER BY code"
                ))
                .fetch_all(db)
                .await?
            }
        };

        Ok(departments)
    }

    #[instrument(skip(db))]
    pub async fn get_department(db: &PgPool, id: Uuid) -> Result<Department, AppError> {
        sqlx::query_as::<_, Department>(&format!(
            "SELECT {DEPARTMENT_COLUMNS} FROM departments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Department not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_department(
        db: &PgPool,
        id: Uuid,
        dto: UpdateDepartmentDto,
    ) -> Result<Department, AppError> {
        let mut department = Self::get_department(db, id).await?;

        if let Some(code) = dto.code {
            department.code = code.trim().to_uppercase();
        }
        if let Some(name) = dto.name {
            department.name = name.trim().to_string();
        }
        if let Some(description) = dto.description {
            department.description = description;
        }
        if let Some(is_active) = dto.is_active {
            department.is_active = is_active;
        }
        match dto.hod_id {
            None => {}
            Some(hod_id) => department.hod_id = hod_id,
        }

        sqlx::query_as::<_, Department>(&format!(
            "UPDATE departments SET code = $2, name = $3, description = $4, hod_id = $5,
                is_active = $6, updated_at = NOW()
             WHERE id = $1
             RETURNING {DEPARTMENT_COLUMNS}"
        ))
        .bind(id)
        .bind(&department.code)
        .bind(&department.name)
        .bind(&department.description)
        .bind(department.hod_id)
        .bind(department.is_active)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("Department code already exists")
            } else {
                e.into()
            }
        })
    }

    #[instrument(skip(db))]
    pub async fn delete_department(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Department not found"));
        }
        Ok(())
    }
}
