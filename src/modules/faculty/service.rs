use std::collections::HashMap;

use rand::Rng;
use rand::distributions::Alphanumeric;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::faculty::model::{
    CreateFacultyDto, CreateFacultyResponse, FacultyProfile, FacultyWithProfile,
    UpdateFacultyProfileDto,
};
use crate::modules::users::model::{User, UserRole};
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

const PROFILE_COLUMNS: &str = "id, user_id, first_name, last_name, gender, dob, email, phone, \
    alt_phone, address, city, state, pincode, faculty_id, department, designation, \
    teaching_subjects, qualification, experience_years, experience_summary, employment_status, \
    profile_image, github, linkedin, portfolio, remarks, created_at, updated_at";

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

fn generate_temp_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(char::from)
        .collect()
}

fn apply_update(profile: &mut FacultyProfile, dto: UpdateFacultyProfileDto) {
    macro_rules! set {
        ($($field:ident),* $(,)?) => {
            $(if dto.$field.is_some() {
                profile.$field = dto.$field;
            })*
        };
    }
    set!(
        first_name, last_name, gender, dob, email, phone, alt_phone, address, city, state,
        pincode, faculty_id, department, designation, qualification, experience_years,
        experience_summary, github, linkedin, portfolio, remarks,
    );
    if let Some(subjects) = dto.teaching_subjects {
        profile.teaching_subjects = subjects;
    }
    if let Some(status) = dto.employment_status {
        profile.employment_status = status.as_str().to_string();
    }
}

pub struct FacultyService;

impl FacultyService {
    async fn require_faculty(db: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        let user = UserService::get_user(db, user_id).await?;
        if user.role != UserRole::Faculty.as_str() {
            return Err(AppError::not_found("Faculty member not found"));
        }
        Ok(user)
    }

    /// Provision a faculty account. Passwords shorter than six characters
    /// are treated as absent and replaced by a generated one.
    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn create_faculty(
        db: &PgPool,
        dto: CreateFacultyDto,
    ) -> Result<CreateFacultyResponse, AppError> {
        let email = dto.email.trim().to_lowercase();

        let (password, temp_password) = match dto.password {
            Some(p) if p.len() >= 6 => (p, None),
            _ => {
                let generated = generate_temp_password();
                (generated.clone(), Some(generated))
            }
        };
        let password_hash = hash_password(&password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash, role)
             VALUES ($1, $2, $3, 'faculty')
             RETURNING id, name, email, role, is_active, created_at, updated_at",
        )
        .bind(dto.name.trim())
        .bind(&email)
        .bind(&password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("Email already registered")
            } else {
                e.into()
            }
        })?;

        Ok(CreateFacultyResponse {
            user,
            temp_password,
        })
    }

    #[instrument(skip(db))]
    pub async fn ensure_profile(db: &PgPool, user_id: Uuid) -> Result<FacultyProfile, AppError> {
        sqlx::query("INSERT INTO faculty_profiles (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(db)
            .await?;

        sqlx::query_as::<_, FacultyProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM faculty_profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_one(db)
        .await
        .map_err(Into::into)
    }

    #[instrument(skip(db))]
    pub async fn get_profile(db: &PgPool, user_id: Uuid) -> Result<FacultyProfile, AppError> {
        Self::require_faculty(db, user_id).await?;
        Self::ensure_profile(db, user_id).await
    }

    #[instrument(skip(db, dto, image_path))]
    pub async fn update_profile(
        db: &PgPool,
        user_id: Uuid,
        dto: UpdateFacultyProfileDto,
        image_path: Option<String>,
    ) -> Result<FacultyProfile, AppError> {
        Self::require_faculty(db, user_id).await?;
        let mut profile = Self::ensure_profile(db, user_id).await?;

        apply_update(&mut profile, dto);
        if image_path.is_some() {
            profile.profile_image = image_path;
        }

        sqlx::query_as::<_, FacultyProfile>(&format!(
            "UPDATE faculty_profiles SET
                first_name = $2, last_name = $3, gender = $4, dob = $5, email = $6, phone = $7,
                alt_phone = $8, address = $9, city = $10, state = $11, pincode = $12,
                faculty_id = $13, department = $14, designation = $15, teaching_subjects = $16,
                qualification = $17, experience_years = $18, experience_summary = $19,
                employment_status = $20, profile_image = $21, github = $22, linkedin = $23,
                portfolio = $24, remarks = $25, updated_at = NOW()
             WHERE user_id = $1
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.gender)
        .bind(&profile.dob)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(&profile.alt_phone)
        .bind(&profile.address)
        .bind(&profile.city)
        .bind(&profile.state)
        .bind(&profile.pincode)
        .bind(&profile.faculty_id)
        .bind(&profile.department)
        .bind(&profile.designation)
        .bind(&profile.teaching_subjects)
        .bind(&profile.qualification)
        .bind(profile.experience_years)
        .bind(&profile.experience_summary)
        .bind(&profile.employment_status)
        .bind(&profile.profile_image)
        .bind(&profile.github)
        .bind(&profile.linkedin)
        .bind(&profile.portfolio)
        .bind(&profile.remarks)
        .fetch_one(db)
        .await
        .map_err(Into::into)
    }

    #[instrument(skip(db))]
    pub async fn list_faculty(db: &PgPool) -> Result<Vec<FacultyWithProfile>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email, role, is_active, created_at, updated_at
             FROM users WHERE role = 'faculty' ORDER BY created_at DESC",
        )
        .fetch_all(db)
        .await?;

        let profiles = sqlx::query_as::<_, FacultyProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM faculty_profiles"
        ))
        .fetch_all(db)
        .await?;

        let mut by_user: HashMap<Uuid, FacultyProfile> =
            profiles.into_iter().map(|p| (p.user_id, p)).collect();

        Ok(users
            .into_iter()
            .map(|user| {
                let profile = by_user.remove(&user.id);
                FacultyWithProfile { user, profile }
            })
            .collect())
    }

    #[instrument(skip(db))]
    pub async fn set_status(
        db: &PgPool,
        user_id: Uuid,
        is_active: bool,
    ) -> Result<User, AppError> {
        Self::require_faculty(db, user_id).await?;
        UserService::set_status(db, user_id, is_active).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_password_shape() {
        let password = generate_temp_password();
        assert_eq!(password.len(), 10);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
