use std::sync::Arc;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware,
    routing::get,
};
use tower_governor::GovernorLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::role::{require_admin, require_faculty};
use crate::modules::attendance::router::init_admin_attendance_router;
use crate::modules::auth::router::init_auth_router;
use crate::modules::courses::router::{init_admin_courses_router, init_faculty_courses_router};
use crate::modules::departments::router::init_admin_departments_router;
use crate::modules::faculty::router::{init_admin_faculty_router, init_faculty_profile_router};
use crate::modules::students::router::{init_admin_students_router, init_student_profile_router};
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

/// Multipart profile updates carry an image; everything else is small JSON.
const PROFILE_BODY_LIMIT: usize = 8 * 1024 * 1024;

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    let mut auth_routes = init_auth_router();
    if state.rate_limit_config.enabled {
        let governor_config = Arc::new(state.rate_limit_config.auth_governor_config());
        auth_routes = auth_routes.layer(GovernorLayer::new(governor_config));
    }

    // One admin gate over every management surface.
    let admin_routes = Router::new()
        .nest("/courses", init_admin_courses_router())
        .nest("/departments", init_admin_departments_router())
        .nest("/students", init_admin_students_router())
        .nest("/faculty", init_admin_faculty_router())
        .nest("/attendance", init_admin_attendance_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let users_routes = init_users_router()
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let faculty_routes = init_faculty_courses_router().route_layer(
        middleware::from_fn_with_state(state.clone(), require_faculty),
    );

    // Self-service profiles are open to any authenticated caller; the auth
    // extractor inside the handlers is the gate.
    let profile_routes = init_student_profile_router()
        .layer(DefaultBodyLimit::max(PROFILE_BODY_LIMIT));
    let faculty_profile_routes =
        init_faculty_profile_router().layer(DefaultBodyLimit::max(PROFILE_BODY_LIMIT));

    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/users", users_routes)
        .nest("/api/faculty", faculty_routes)
        .nest("/api/profile", profile_routes)
        .nest("/api/faculty-profile", faculty_profile_routes)
        .nest_service("/uploads", ServeDir::new(&state.upload_config.dir))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}
