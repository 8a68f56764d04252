#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use campus_erp::config::cors::CorsConfig;
use campus_erp::config::jwt::JwtConfig;
use campus_erp::config::rate_limit::RateLimitConfig;
use campus_erp::config::uploads::UploadConfig;
use campus_erp::modules::users::model::UserRole;
use campus_erp::router::init_router;
use campus_erp::state::AppState;
use campus_erp::utils::jwt::create_access_token;
use campus_erp::utils::password::hash_password;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key".to_string(),
        token_expiry: 3600,
    }
}

/// Build the app against the per-test database. Rate limiting is disabled so
/// unrelated tests never trip the auth bucket; the dedicated rate-limit test
/// opts back in.
pub fn setup_test_app(pool: PgPool) -> Router {
    setup_test_app_with_rate_limit(pool, RateLimitConfig {
        enabled: false,
        ..RateLimitConfig::default()
    })
}

pub fn setup_test_app_with_rate_limit(pool: PgPool, rate_limit: RateLimitConfig) -> Router {
    let state = AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        rate_limit_config: rate_limit,
        upload_config: UploadConfig {
            dir: std::env::temp_dir().join(format!("campus-erp-test-{}", Uuid::new_v4())),
            max_bytes: 5 * 1024 * 1024,
        },
    };
    init_router(state)
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

pub async fn create_test_user(
    pool: &PgPool,
    email: &str,
    password: &str,
    role: UserRole,
    is_active: bool,
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (name, email, password_hash, role, is_active)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind("Test User")
    .bind(email.to_lowercase())
    .bind(&hashed)
    .bind(role.as_str())
    .bind(is_active)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
        role,
    }
}

/// Mint a token the same way the login path does.
pub fn token_for(user: &TestUser) -> String {
    create_access_token(user.id, &user.email, user.role, &test_jwt_config()).unwrap()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// JSON request with a forwarded-for header so the rate limiter always has a
/// client IP, even under `oneshot` where there is no real connection.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-forwarded-for", "10.0.0.1")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

#[allow(dead_code)]
pub fn authed_json_request(method: &str, uri: &str, token: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-forwarded-for", "10.0.0.1")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

#[allow(dead_code)]
pub fn authed_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-forwarded-for", "10.0.0.1")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}
