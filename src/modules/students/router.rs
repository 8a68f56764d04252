use axum::{
    Router,
    routing::{get, patch},
};

use super::controller::{
    get_my_profile, get_student_profile, list_students, update_my_profile, update_student_profile,
    update_student_status,
};
use crate::state::AppState;

/// Admin-facing student management, nested under `/api/admin/students`.
pub fn init_admin_students_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students))
        .route(
            "/{user_id}/profile",
            get(get_student_profile).patch(update_student_profile),
        )
        .route("/{user_id}/status", patch(update_student_status))
}

/// Self-service profile endpoints, nested under `/api/profile`.
pub fn init_student_profile_router() -> Router<AppState> {
    Router::new().route("/", get(get_my_profile).put(update_my_profile))
}
