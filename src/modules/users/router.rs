use axum::{Router, routing::patch};

use super::controller::update_user_role;
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new().route("/{id}/role", patch(update_user_role))
}
