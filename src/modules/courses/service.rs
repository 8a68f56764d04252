use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::courses::model::{Course, CourseWithFaculty, CreateCourseDto, UpdateCourseDto};
use crate::modules::users::model::UserRole;
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;

const COURSE_COLUMNS: &str = "id, code, name, department, credits, semester, section, \
    faculty_id, description, is_active, created_at, updated_at";

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

fn validate_section(section: &str) -> Result<(), AppError> {
    match section {
        "" | "A" | "B" | "C" => Ok(()),
        _ => Err(AppError::bad_request("Invalid section. Allowed: A, B, C")),
    }
}

/// The assigned instructor must hold the faculty role at assignment time.
async fn check_faculty_assignee(db: &PgPool, user_id: Uuid) -> Result<(), AppError> {
    let user = UserService::get_user(db, user_id)
        .await
        .map_err(|_| AppError::bad_request("Provided user is not faculty"))?;
    if user.role != UserRole::Faculty.as_str() {
        return Err(AppError::bad_request("Provided user is not faculty"));
    }
    Ok(())
}

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db, dto), fields(code = %dto.code))]
    pub async fn create_course(db: &PgPool, dto: CreateCourseDto) -> Result<Course, AppError> {
        let code = normalize_code(&dto.code);
        let section = dto.section.unwrap_or_default();
        validate_section(&section)?;

        if let Some(faculty_id) = dto.faculty {
            check_faculty_assignee(db, faculty_id).await?;
        }

        // Out-of-range semesters are clamped rather than rejected.
        let semester = dto.semester.unwrap_or(1).clamp(1, 8);

        sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses (code, name, department, credits, semester, section, faculty_id, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(&code)
        .bind(dto.name.trim())
        .bind(dto.department.unwrap_or_default())
        .bind(dto.credits.unwrap_or(0))
        .bind(semester)
        .bind(&section)
        .bind(dto.faculty)
        .bind(dto.description.unwrap_or_default())
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("Course code already exists")
            } else {
                e.into()
            }
        })
    }

    /// Catalog listing with the instructor joined in, optionally filtered by
    /// department.
    #[instrument(skip(db))]
    pub async fn list_courses(
        db: &PgPool,
        department: Option<String>,
    ) -> Result<Vec<CourseWithFaculty>, AppError> {
        let base = "SELECT c.id, c.code, c.name, c.department, c.credits, c.semester, c.section, \
             c.faculty_id, c.description, c.is_active, c.created_at, c.updated_at, \
             u.name AS faculty_name, u.email AS faculty_email
             FROM courses c LEFT JOIN users u ON u.id = c.faculty_id";

        let courses = match department {
            Some(department) => {
                sqlx::query_as::<_, CourseWithFaculty>(&format!(
                    "{base} WHERE c.department = $1 ORDER BY c.code"
                ))
                .bind(department)
                .fetch_all(db)
                .await?
            }
            None => {
                sqlx::query_as::<_, CourseWithFaculty>(&format!("{base} ORDER BY c.code"))
                    .fetch_all(db)
                    .await?
            }
        };

        Ok(courses)
    }

    #[instrument(skip(db))]
    pub async fn get_course(db: &PgPool, id: Uuid) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(&format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_course(
        db: &PgPool,
        id: Uuid,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        let mut course = Self::get_course(db, id).await?;

        if let Some(code) = dto.code {
            course.code = normalize_code(&code);
        }
        if let Some(name) = dto.name {
            course.name = name.trim().to_string();
        }
        if let Some(department) = dto.department {
            course.department = department;
        }
        if let Some(credits) = dto.credits {
            course.credits = credits;
        }
        if let Some(semester) = dto.semester {
            course.semester = semester.clamp(1, 8);
        }
        if let Some(section) = dto.section {
            validate_section(&section)?;
            course.section = section;
        }
        if let Some(description) = dto.description {
            course.description = description;
        }
        if let Some(is_active) = dto.is_active {
            course.is_active = is_active;
        }
        match dto.faculty {
            None => {}
            Some(None) => course.faculty_id = None,
            Some(Some(faculty_id)) => {
                check_faculty_assignee(db, faculty_id).await?;
                course.faculty_id = Some(faculty_id);
            }
        }

        sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses SET code = $2, name = $3, department = $4, credits = $5,
                semester = $6, section = $7, faculty_id = $8, description = $9,
                is_active = $10, updated_at = NOW()
             WHERE id = $1
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(id)
        .bind(&course.code)
        .bind(&course.name)
        .bind(&course.department)
        .bind(course.credits)
        .bind(course.semester)
        .bind(&course.section)
        .bind(course.faculty_id)
        .bind(&course.description)
        .bind(course.is_active)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("Course code already exists")
            } else {
                e.into()
            }
        })
    }

    #[instrument(skip(db))]
    pub async fn delete_course(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Course not found"));
        }
        Ok(())
    }

    /// Courses assigned to one instructor, for the faculty dashboard.
    #[instrument(skip(db))]
    pub async fn faculty_courses(db: &PgPool, faculty_id: Uuid) -> Result<Vec<Course>, AppError> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE faculty_id = $1 ORDER BY semester, code"
        ))
        .bind(faculty_id)
        .fetch_all(db)
        .await
        .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_normalization() {
        assert_eq!(normalize_code("  cs101 "), "CS101");
    }

    #[test]
    fn test_section_validation() {
        for ok in ["", "A", "B", "C"] {
            assert!(validate_section(ok).is_ok());
        }
        for bad in ["D", "a", "AB"] {
            assert!(validate_section(bad).is_err());
        }
    }
}
