use std::collections::HashMap;

use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::students::model::{StudentProfile, StudentWithProfile, UpdateStudentProfileDto};
use crate::modules::users::model::{User, UserRole};
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;

const PROFILE_COLUMNS: &str = "id, user_id, first_name, last_name, gender, dob, blood_group, \
    nationality, email, phone, alt_phone, address, city, state, pincode, student_id, \
    register_number, roll_no, program, branch, semester, year, section, admission_year, \
    passout_year, cgpa, skills, profile_image, github, linkedin, portfolio, resume_link, \
    hobbies, achievements, remarks, created_at, updated_at";

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

fn apply_update(profile: &mut StudentProfile, dto: UpdateStudentProfileDto) {
    macro_rules! set {
        ($($field:ident),* $(,)?) => {
            $(if dto.$field.is_some() {
                profile.$field = dto.$field;
            })*
        };
    }
    set!(
        first_name, last_name, gender, dob, blood_group, nationality, email, phone, alt_phone,
        address, city, state, pincode, student_id, register_number, roll_no, program, branch,
        semester, year, section, admission_year, passout_year, cgpa, github, linkedin, portfolio,
        resume_link, hobbies, achievements, remarks,
    );
    if let Some(skills) = dto.skills {
        profile.skills = skills;
    }
}

pub struct StudentService;

impl StudentService {
    /// Resolve a user id to a student account or 404.
    async fn require_student(db: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        let user = UserService::get_user(db, user_id).await?;
        if user.role != UserRole::Student.as_str() {
            return Err(AppError::not_found("Student not found"));
        }
        Ok(user)
    }

    /// Fetch the profile, creating an empty one on first access. Lazy
    /// creation keeps signup and profile storage decoupled.
    #[instrument(skip(db))]
    pub async fn ensure_profile(db: &PgPool, user_id: Uuid) -> Result<StudentProfile, AppError> {
        sqlx::query("INSERT INTO student_profiles (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(db)
            .await?;

        sqlx::query_as::<_, StudentProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM student_profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_one(db)
        .await
        .map_err(Into::into)
    }

    #[instrument(skip(db))]
    pub async fn get_profile(db: &PgPool, user_id: Uuid) -> Result<StudentProfile, AppError> {
        Self::require_student(db, user_id).await?;
        Self::ensure_profile(db, user_id).await
    }

    /// Partial update: load, merge the provided fields, write the whole row
    /// back. `image_path` comes from the multipart upload path and wins over
    /// whatever is stored.
    #[instrument(skip(db, dto, image_path))]
    pub async fn update_profile(
        db: &PgPool,
        user_id: Uuid,
        dto: UpdateStudentProfileDto,
        image_path: Option<String>,
    ) -> Result<StudentProfile, AppError> {
        Self::require_student(db, user_id).await?;
        let mut profile = Self::ensure_profile(db, user_id).await?;

        apply_update(&mut profile, dto);
        if image_path.is_some() {
            profile.profile_image = image_path;
        }

        sqlx::query_as::<_, StudentProfile>(&format!(
            "UPDATE student_profiles SET
                first_name = $2, last_name = $3, gender = $4, dob = $5, blood_group = $6,
                nationality = $7, email = $8, phone = $9, alt_phone = $10, address = $11,
                city = $12, state = $13, pincode = $14, student_id = $15, register_number = $16,
                roll_no = $17, program = $18, branch = $19, semester = $20, year = $21,
                section = $22, admission_year = $23, passout_year = $24, cgpa = $25,
                skills = $26, profile_image = $27, github = $28, linkedin = $29,
                portfolio = $30, resume_link = $31, hobbies = $32, achievements = $33,
                remarks = $34, updated_at = NOW()
             WHERE user_id = $1
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.gender)
        .bind(&profile.dob)
        .bind(&profile.blood_group)
        .bind(&profile.nationality)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(&profile.alt_phone)
        .bind(&profile.address)
        .bind(&profile.city)
        .bind(&profile.state)
        .bind(&profile.pincode)
        .bind(&profile.student_id)
        .bind(&profile.register_number)
        .bind(&profile.roll_no)
        .bind(&profile.program)
        .bind(&profile.branch)
        .bind(&profile.semester)
        .bind(&profile.year)
        .bind(&profile.section)
        .bind(&profile.admission_year)
        .bind(&profile.passout_year)
        .bind(profile.cgpa)
        .bind(&profile.skills)
        .bind(&profile.profile_image)
        .bind(&profile.github)
        .bind(&profile.linkedin)
        .bind(&profile.portfolio)
        .bind(&profile.resume_link)
        .bind(&profile.hobbies)
        .bind(&profile.achievements)
        .bind(&profile.remarks)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("Student ID already in use")
            } else {
                e.into()
            }
        })
    }

    /// All student accounts with their profiles where one exists. Profiles
    /// are not created here; a student who never touched theirs shows `null`.
    #[instrument(skip(db))]
    pub async fn list_students(db: &PgPool) -> Result<Vec<StudentWithProfile>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email, role, is_active, created_at, updated_at
             FROM users WHERE role = 'student' ORDER BY created_at DESC",
        )
        .fetch_all(db)
        .await?;

        let profiles = sqlx::query_as::<_, StudentProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM student_profiles"
        ))
        .fetch_all(db)
        .await?;

        let mut by_user: HashMap<Uuid, StudentProfile> =
            profiles.into_iter().map(|p| (p.user_id, p)).collect();

        Ok(users
            .into_iter()
            .map(|user| {
                let profile = by_user.remove(&user.id);
                StudentWithProfile { user, profile }
            })
            .collect())
    }

    #[instrument(skip(db))]
    pub async fn set_status(
        db: &PgPool,
        user_id: Uuid,
        is_active: bool,
    ) -> Result<User, AppError> {
        Self::require_student(db, user_id).await?;
        UserService::set_status(db, user_id, is_active).await
    }
}
