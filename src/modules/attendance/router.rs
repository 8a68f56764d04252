use axum::{Router, routing::get};

use super::controller::{delete_session, get_session, list_sessions, upsert_session};
use crate::state::AppState;

/// Admin-facing attendance management, nested under `/api/admin/attendance`.
pub fn init_admin_attendance_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sessions).post(upsert_session))
        .route("/{id}", get(get_session).delete(delete_session))
}
