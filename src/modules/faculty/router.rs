use axum::{
    Router,
    routing::{get, patch},
};

use super::controller::{
    create_faculty, get_faculty_profile, get_my_faculty_profile, list_faculty,
    update_faculty_profile, update_faculty_status, update_my_faculty_profile,
};
use crate::state::AppState;

/// Admin-facing faculty management, nested under `/api/admin/faculty`.
pub fn init_admin_faculty_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_faculty).post(create_faculty))
        .route(
            "/{user_id}/profile",
            get(get_faculty_profile).patch(update_faculty_profile),
        )
        .route("/{user_id}/status", patch(update_faculty_status))
}

/// Self-service profile endpoints, nested under `/api/faculty-profile`.
pub fn init_faculty_profile_router() -> Router<AppState> {
    Router::new().route("/", get(get_my_faculty_profile).put(update_my_faculty_profile))
}
