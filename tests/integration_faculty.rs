mod common;

use axum::http::StatusCode;
use campus_erp::modules::users::model::UserRole;
use common::{
    authed_json_request, authed_request, create_test_user, generate_unique_email, json_request,
    setup_test_app, token_for,
};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn admin_token(pool: &PgPool) -> String {
    let admin = create_test_user(pool, &generate_unique_email(), "secret123", UserRole::Admin, true).await;
    token_for(&admin)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_provision_faculty_without_password_returns_temp(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = admin_token(&pool).await;
    let email = generate_unique_email();

    let response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/admin/faculty",
            &token,
            &json!({ "name": "Dr. Grace Hopper", "email": email }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["user"]["role"], "faculty");
    let temp_password = body["temp_password"].as_str().unwrap().to_string();
    assert_eq!(temp_password.len(), 10);

    // The generated password works for login.
    let login = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            &json!({ "email": email, "password": temp_password }),
        ))
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_provision_faculty_with_password_omits_temp(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = admin_token(&pool).await;

    let response = app
        .oneshot(authed_json_request(
            "POST",
            "/api/admin/faculty",
            &token,
            &json!({
                "name": "Dr. Barbara Liskov",
                "email": generate_unique_email(),
                "password": "chosen-password"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert!(body.get("temp_password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_provision_faculty_duplicate_email_is_conflict(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = admin_token(&pool).await;
    let email = generate_unique_email();
    create_test_user(&pool, &email, "secret123", UserRole::Student, true).await;

    let response = app
        .oneshot(authed_json_request(
            "POST",
            "/api/admin/faculty",
            &token,
            &json!({ "name": "Dupe", "email": email }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_updates_faculty_profile(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = admin_token(&pool).await;
    let faculty = create_test_user(&pool, &generate_unique_email(), "secret123", UserRole::Faculty, true).await;

    let response = app
        .clone()
        .oneshot(authed_json_request(
            "PATCH",
            &format!("/api/admin/faculty/{}/profile", faculty.id),
            &token,
            &json!({
                "department": "CSE",
                "teaching_subjects": "Algorithms, Compilers",
                "experience_years": 12
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["profile"]["department"], "CSE");
    assert_eq!(
        body["profile"]["teaching_subjects"],
        json!(["Algorithms", "Compilers"])
    );
    assert_eq!(body["profile"]["experience_years"], 12);
    assert_eq!(body["profile"]["employment_status"], "active");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_invalid_employment_status_is_bad_request(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = admin_token(&pool).await;
    let faculty = create_test_user(&pool, &generate_unique_email(), "secret123", UserRole::Faculty, true).await;

    let response = app
        .oneshot(authed_json_request(
            "PATCH",
            &format!("/api/admin/faculty/{}/profile", faculty.id),
            &token,
            &json!({ "employment_status": "sabbatical" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_faculty_listing_excludes_students(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = admin_token(&pool).await;
    create_test_user(&pool, &generate_unique_email(), "secret123", UserRole::Faculty, true).await;
    create_test_user(&pool, &generate_unique_email(), "secret123", UserRole::Student, true).await;

    let response = app
        .oneshot(authed_request("GET", "/api/admin/faculty", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let faculty = body["faculty"].as_array().unwrap();
    assert_eq!(faculty.len(), 1);
    assert_eq!(faculty[0]["role"], "faculty");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_faculty_status_toggle(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = admin_token(&pool).await;
    let faculty = create_test_user(&pool, &generate_unique_email(), "secret123", UserRole::Faculty, true).await;

    let response = app
        .oneshot(authed_json_request(
            "PATCH",
            &format!("/api/admin/faculty/{}/status", faculty.id),
            &token,
            &json!({ "is_active": false }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["is_active"], false);
}
