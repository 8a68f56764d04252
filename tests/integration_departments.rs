mod common;

use axum::http::StatusCode;
use campus_erp::modules::users::model::UserRole;
use common::{
    authed_json_request, authed_request, create_test_user, generate_unique_email, setup_test_app,
    token_for,
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
async fn test_department_crud(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = admin_token(&pool).await;

    let created = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/admin/departments",
            &token,
            &json!({ "code": "cse", "name": "Computer Science" }),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let department = body_json(created).await;
    assert_eq!(department["code"], "CSE");
    let id = department["id"].as_str().unwrap().to_string();

    let updated = app
        .clone()
        .oneshot(authed_json_request(
            "PATCH",
            &format!("/api/admin/departments/{id}"),
            &token,
            &json!({ "description": "CS and engineering" }),
        ))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    let body = body_json(updated).await;
    assert_eq!(body["description"], "CS and engineering");
    assert_eq!(body["name"], "Computer Science");

    let deleted = app
        .clone()
        .oneshot(authed_request("DELETE", &format!("/api/admin/departments/{id}"), &token))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let missing = app
        .oneshot(authed_request("GET", &format!("/api/admin/departments/{id}"), &token))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_department_code_is_conflict(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = admin_token(&pool).await;

    let first = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/admin/departments",
            &token,
            &json!({ "code": "EEE", "name": "Electrical" }),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(authed_json_request(
            "POST",
            "/api/admin/departments",
            &token,
            &json!({ "code": "eee", "name": "Electrical Again" }),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_department_search_matches_code_and_name(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = admin_token(&pool).await;

    for (code, name) in [("CSE", "Computer Science"), ("MECH", "Mechanical"), ("CIV", "Civil")] {
        let response = app
            .clone()
            .oneshot(authed_json_request(
                "POST",
                "/api/admin/departments",
                &token,
                &json!({ "code": code, "name": name }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let by_name = app
        .clone()
        .oneshot(authed_request("GET", "/api/admin/departments?q=science", &token))
        .await
        .unwrap();
    let body = body_json(by_name).await;
    assert_eq!(body["departments"].as_array().unwrap().len(), 1);

    let by_code = app
        .oneshot(authed_request("GET", "/api/admin/departments?q=c", &token))
        .await
        .unwrap();
    let body = body_json(by_code).await;
    // CSE (code), Mechanical (name) and Civil all contain a "c".
    assert_eq!(body["departments"].as_array().unwrap().len(), 3);
}
