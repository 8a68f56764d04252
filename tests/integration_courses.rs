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
async fn test_create_course_uppercases_code(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = admin_token(&pool).await;

    let response = app
        .oneshot(authed_json_request(
            "POST",
            "/api/admin/courses",
            &token,
            &json!({ "code": "  cs101 ", "name": "Intro to CS", "semester": 3 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["code"], "CS101");
    assert_eq!(body["semester"], 3);
    assert_eq!(body["credits"], 0);
    assert_eq!(body["section"], "");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_course_duplicate_code_is_conflict(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = admin_token(&pool).await;

    let payload = json!({ "code": "CS101", "name": "Intro to CS" });
    let first = app
        .clone()
        .oneshot(authed_json_request("POST", "/api/admin/courses", &token, &payload))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    // Same code in different case still collides.
    let second = app
        .oneshot(authed_json_request(
            "POST",
            "/api/admin/courses",
            &token,
            &json!({ "code": "cs101", "name": "Other" }),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_course_rejects_non_faculty_assignee(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = admin_token(&pool).await;
    let student =
        create_test_user(&pool, &generate_unique_email(), "secret123", UserRole::Student, true).await;

    let response = app
        .oneshot(authed_json_request(
            "POST",
            "/api/admin/courses",
            &token,
            &json!({ "code": "CS102", "name": "Algorithms", "faculty": student.id }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_course_rejects_invalid_section(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = admin_token(&pool).await;

    let response = app
        .oneshot(authed_json_request(
            "POST",
            "/api/admin/courses",
            &token,
            &json!({ "code": "CS103", "name": "Systems", "section": "D" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_course_clamps_semester(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = admin_token(&pool).await;

    let response = app
        .oneshot(authed_json_request(
            "POST",
            "/api/admin/courses",
            &token,
            &json!({ "code": "CS104", "name": "Capstone", "semester": 12 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["semester"], 8);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_routes_forbidden_for_students(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let student =
        create_test_user(&pool, &generate_unique_email(), "secret123", UserRole::Student, true).await;
    let token = token_for(&student);

    let response = app
        .oneshot(authed_request("GET", "/api/admin/courses", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_course_can_unassign_faculty(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = admin_token(&pool).await;
    let faculty =
        create_test_user(&pool, &generate_unique_email(), "secret123", UserRole::Faculty, true).await;

    let created = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/admin/courses",
            &token,
            &json!({ "code": "CS105", "name": "Databases", "faculty": faculty.id }),
        ))
        .await
        .unwrap();
    let course = body_json(created).await;
    assert_eq!(course["faculty_id"], faculty.id.to_string());

    let updated = app
        .oneshot(authed_json_request(
            "PATCH",
            &format!("/api/admin/courses/{}", course["id"].as_str().unwrap()),
            &token,
            &json!({ "faculty": null }),
        ))
        .await
        .unwrap();

    assert_eq!(updated.status(), StatusCode::OK);
    let body = body_json(updated).await;
    assert!(body["faculty_id"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_courses_joins_faculty_and_filters_by_department(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = admin_token(&pool).await;
    let faculty =
        create_test_user(&pool, &generate_unique_email(), "secret123", UserRole::Faculty, true).await;

    for (code, department) in [("CS201", "CSE"), ("EE201", "EEE")] {
        let response = app
            .clone()
            .oneshot(authed_json_request(
                "POST",
                "/api/admin/courses",
                &token,
                &json!({ "code": code, "name": code, "department": department, "faculty": faculty.id }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(authed_request(
            "GET",
            "/api/admin/courses?department=CSE",
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let courses = body["courses"].as_array().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["code"], "CS201");
    assert_eq!(courses[0]["faculty_name"], "Test User");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_faculty_sees_only_their_courses(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = admin_token(&pool).await;
    let mine =
        create_test_user(&pool, &generate_unique_email(), "secret123", UserRole::Faculty, true).await;
    let other =
        create_test_user(&pool, &generate_unique_email(), "secret123", UserRole::Faculty, true).await;

    for (code, faculty_id) in [("CS301", mine.id), ("CS302", other.id)] {
        let response = app
            .clone()
            .oneshot(authed_json_request(
                "POST",
                "/api/admin/courses",
                &token,
                &json!({ "code": code, "name": code, "faculty": faculty_id }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(authed_request("GET", "/api/faculty/courses", &token_for(&mine)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let courses = body["courses"].as_array().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["code"], "CS301");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_faculty_courses_forbidden_for_students(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let student =
        create_test_user(&pool, &generate_unique_email(), "secret123", UserRole::Student, true).await;

    let response = app
        .oneshot(authed_request("GET", "/api/faculty/courses", &token_for(&student)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_course(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = admin_token(&pool).await;

    let created = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/admin/courses",
            &token,
            &json!({ "code": "CS401", "name": "Compilers" }),
        ))
        .await
        .unwrap();
    let course = body_json(created).await;
    let id = course["id"].as_str().unwrap();

    let deleted = app
        .clone()
        .oneshot(authed_request("DELETE", &format!("/api/admin/courses/{id}"), &token))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let missing = app
        .oneshot(authed_request("GET", &format!("/api/admin/courses/{id}"), &token))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
