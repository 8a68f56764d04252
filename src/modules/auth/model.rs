//! Authentication models and DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::users::model::{User, UserRole};

/// JWT payload. Tokens are always minted with `sub`/`role`, but older
/// clients re-present tokens that used `id`, `_id`, `userId` or `userRole`
/// as key names, so those are accepted as aliases on decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(alias = "id", alias = "_id", alias = "userId")]
    pub sub: String,
    pub email: String,
    #[serde(alias = "userRole")]
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Defaults to `student` when absent. Admin accounts are expected to be
    /// created by other admins, but nothing here enforces that.
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login/signup/refresh all answer with the same shape so the frontend has
/// a single code path for establishing a session.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
    /// Role-specific landing page for the frontend router.
    pub redirect_path: String,
}
