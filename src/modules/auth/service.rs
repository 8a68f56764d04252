use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::{AuthResponse, LoginRequest, SignupRequest};
use crate::modules::users::model::{User, UserRole};
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

#[derive(FromRow)]
struct AuthRow {
    id: Uuid,
    name: String,
    email: String,
    role: String,
    is_active: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    password_hash: String,
}

impl AuthRow {
    fn into_user(self) -> (User, String) {
        let hash = self.password_hash;
        (
            User {
                id: self.id,
                name: self.name,
                email: self.email,
                role: self.role,
                is_active: self.is_active,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            hash,
        )
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

pub struct AuthService;

impl AuthService {
    /// Self-service registration. Email uniqueness is case-insensitive and
    /// enforced twice: a pre-check for the friendly error, and the unique
    /// index for the race where two signups interleave.
    #[instrument(skip(db, jwt_config, request), fields(email = %request.email))]
    pub async fn register(
        db: &PgPool,
        jwt_config: &JwtConfig,
        request: SignupRequest,
    ) -> Result<AuthResponse, AppError> {
        let email = request.email.trim().to_lowercase();
        let role = request.role.unwrap_or(UserRole::Student);

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = $1)")
                .bind(&email)
                .fetch_one(db)
                .await?;
        if exists {
            return Err(AppError::conflict("Email already registered"));
        }

        let password_hash = hash_password(&request.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, email, role, is_active, created_at, updated_at",
        )
        .bind(request.name.trim())
        .bind(&email)
        .bind(&password_hash)
        .bind(role.as_str())
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("Email already registered")
            } else {
                e.into()
            }
        })?;

        let token = create_access_token(user.id, &user.email, role, jwt_config)?;

        Ok(AuthResponse {
            token,
            redirect_path: role.redirect_path().to_string(),
            user,
        })
    }

    /// Password login. A deactivated account fails exactly like a wrong
    /// password, so the response never reveals which one it was.
    #[instrument(skip(db, jwt_config, request), fields(email = %request.email))]
    pub async fn login(
        db: &PgPool,
        jwt_config: &JwtConfig,
        request: LoginRequest,
    ) -> Result<AuthResponse, AppError> {
        let email = request.email.trim().to_lowercase();

        let row = sqlx::query_as::<_, AuthRow>(
            "SELECT id, name, email, role, is_active, created_at, updated_at, password_hash
             FROM users WHERE LOWER(email) = $1 AND is_active = TRUE",
        )
        .bind(&email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

        let (user, password_hash) = row.into_user();

        if !verify_password(&request.password, &password_hash)? {
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        let role = UserRole::parse(&user.role)
            .ok_or_else(|| AppError::internal(anyhow::anyhow!("Unknown role in database")))?;

        let token = create_access_token(user.id, &user.email, role, jwt_config)?;

        Ok(AuthResponse {
            token,
            redirect_path: role.redirect_path().to_string(),
            user,
        })
    }

    /// Re-issue a token for a still-valid session. The auth gate has already
    /// confirmed the account exists and is active.
    #[instrument(skip(db, jwt_config))]
    pub async fn refresh(
        db: &PgPool,
        jwt_config: &JwtConfig,
        user_id: Uuid,
    ) -> Result<AuthResponse, AppError> {
        let user = UserService::get_user(db, user_id).await?;

        let role = UserRole::parse(&user.role)
            .ok_or_else(|| AppError::internal(anyhow::anyhow!("Unknown role in database")))?;

        let token = create_access_token(user.id, &user.email, role, jwt_config)?;

        Ok(AuthResponse {
            token,
            redirect_path: role.redirect_path().to_string(),
            user,
        })
    }
}
