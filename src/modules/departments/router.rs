use axum::{Router, routing::get};

use super::controller::{
    create_department, delete_department, get_department, list_departments, update_department,
};
use crate::state::AppState;

/// Admin-facing department management, nested under `/api/admin/departments`.
pub fn init_admin_departments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_departments).post(create_department))
        .route(
            "/{id}",
            get(get_department)
                .patch(update_department)
                .delete(delete_department),
        )
}
