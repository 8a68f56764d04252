use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::modules::auth::model::Claims;
use crate::modules::users::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor that validates the bearer token and provides the caller's
/// normalized identity.
///
/// Beyond signature and expiry this re-checks `is_active` against the
/// credential store, so a deactivated account's still-valid token is
/// rejected immediately rather than at expiry. One indexed lookup per
/// request buys that consistency.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The subject id as a UUID.
    pub fn user_id(&self) -> Result<uuid::Uuid, AppError> {
        uuid::Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token"))
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    /// The caller's role, parsed from the token claim.
    pub fn role(&self) -> Result<UserRole, AppError> {
        UserRole::parse(&self.0.role)
            .ok_or_else(|| AppError::unauthorized("Invalid role in token"))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        let user_id = uuid::Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized("Invalid token payload"))?;

        let is_active = sqlx::query_scalar::<_, bool>("SELECT is_active FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::unauthorized("Account not found"))?;

        if !is_active {
            return Err(AppError::unauthorized("Account is deactivated"));
        }

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn claims_with(sub: &str, role: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: "test@example.com".to_string(),
            role: role.to_string(),
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_user_id_parses_uuid() {
        let id = Uuid::new_v4();
        let auth_user = AuthUser(claims_with(&id.to_string(), "student"));
        assert_eq!(auth_user.user_id().unwrap(), id);
    }

    #[test]
    fn test_user_id_rejects_garbage() {
        let auth_user = AuthUser(claims_with("not-a-uuid", "student"));
        assert!(auth_user.user_id().is_err());
    }

    #[test]
    fn test_role_parses() {
        let auth_user = AuthUser(claims_with(&Uuid::new_v4().to_string(), "faculty"));
        assert_eq!(auth_user.role().unwrap(), UserRole::Faculty);
    }

    #[test]
    fn test_role_rejects_unknown() {
        let auth_user = AuthUser(claims_with(&Uuid::new_v4().to_string(), "superuser"));
        assert!(auth_user.role().is_err());
    }
}
