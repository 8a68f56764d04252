//! Role-based authorization middleware.
//!
//! A role gate always composes after the authentication gate: the request
//! must carry a verified identity before its role is inspected. Routes use
//! the `require_*` helpers with `axum::middleware::from_fn_with_state`;
//! handlers needing an in-line check use [`check_any_role`].

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::AuthUser;
use crate::modules::users::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Middleware that rejects the request with 403 unless the authenticated
/// caller holds one of `allowed_roles`.
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: Vec<UserRole>,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    let user_role = auth_user.role()?;

    if !allowed_roles.contains(&user_role) {
        return Err(AppError::forbidden("Forbidden"));
    }

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Admin-only routes (course/department/attendance management, user
/// role/status changes).
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![UserRole::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Faculty-only routes (e.g. "my courses").
pub async fn require_faculty(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![UserRole::Faculty]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Student-only routes.
pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![UserRole::Student]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// In-handler role check for routes open to more than one role.
pub fn check_any_role(auth_user: &AuthUser, allowed_roles: &[UserRole]) -> Result<(), AppError> {
    let user_role = auth_user.role()?;

    if !allowed_roles.contains(&user_role) {
        return Err(AppError::forbidden("Forbidden"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::model::Claims;

    fn auth_user(role: &str) -> AuthUser {
        AuthUser(Claims {
            sub: uuid::Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: role.to_string(),
            exp: 9999999999,
            iat: 1234567890,
        })
    }

    #[test]
    fn test_check_any_role_match() {
        assert!(check_any_role(&auth_user("admin"), &[UserRole::Admin]).is_ok());
        assert!(
            check_any_role(&auth_user("faculty"), &[UserRole::Admin, UserRole::Faculty]).is_ok()
        );
    }

    #[test]
    fn test_check_any_role_mismatch() {
        let err = check_any_role(&auth_user("student"), &[UserRole::Faculty]).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_check_any_role_empty_allow_list() {
        assert!(check_any_role(&auth_user("admin"), &[]).is_err());
    }

    #[test]
    fn test_check_any_role_unknown_role() {
        assert!(check_any_role(&auth_user("root"), &[UserRole::Admin]).is_err());
    }
}
