use axum::{Router, routing::get};

use super::controller::{
    create_course, delete_course, get_course, list_courses, my_courses, update_course,
};
use crate::state::AppState;

/// Admin-facing catalog management, nested under `/api/admin/courses`.
pub fn init_admin_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route(
            "/{id}",
            get(get_course).patch(update_course).delete(delete_course),
        )
}

/// Faculty-facing routes, nested under `/api/faculty`.
pub fn init_faculty_courses_router() -> Router<AppState> {
    Router::new().route("/courses", get(my_courses))
}
