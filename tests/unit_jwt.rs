mod common;

use campus_erp::config::jwt::JwtConfig;
use campus_erp::modules::users::model::UserRole;
use campus_erp::utils::jwt::{create_access_token, verify_token};
use common::test_jwt_config;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use uuid::Uuid;

#[test]
fn test_create_and_verify_round_trip() {
    let config = test_jwt_config();
    let user_id = Uuid::new_v4();

    let token = create_access_token(user_id, "ada@test.com", UserRole::Faculty, &config).unwrap();
    let claims = verify_token(&token, &config).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, "ada@test.com");
    assert_eq!(claims.role, "faculty");
    assert_eq!(claims.exp - claims.iat, config.token_expiry as usize);
}

#[test]
fn test_verify_rejects_wrong_secret() {
    let config = test_jwt_config();
    let other = JwtConfig {
        secret: "a-different-secret".to_string(),
        token_expiry: 3600,
    };

    let token = create_access_token(Uuid::new_v4(), "x@test.com", UserRole::Admin, &config).unwrap();

    assert!(verify_token(&token, &other).is_err());
}

#[test]
fn test_verify_rejects_malformed_tokens() {
    let config = test_jwt_config();

    for garbage in ["", "abc", "a.b.c", "Bearer something"] {
        assert!(verify_token(garbage, &config).is_err(), "accepted {garbage:?}");
    }
}

#[test]
fn test_verify_rejects_expired_token() {
    let config = test_jwt_config();
    let now = chrono::Utc::now().timestamp() as usize;

    let payload = json!({
        "sub": Uuid::new_v4().to_string(),
        "email": "x@test.com",
        "role": "student",
        "exp": now - 600,
        "iat": now - 4200,
    });
    let token = encode(
        &Header::default(),
        &payload,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .unwrap();

    assert!(verify_token(&token, &config).is_err());
}

#[test]
fn test_verify_accepts_legacy_claim_names() {
    let config = test_jwt_config();
    let user_id = Uuid::new_v4();
    let now = chrono::Utc::now().timestamp() as usize;

    let payload = json!({
        "userId": user_id.to_string(),
        "email": "legacy@test.com",
        "userRole": "admin",
        "exp": now + 3600,
        "iat": now,
    });
    let token = encode(
        &Header::default(),
        &payload,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .unwrap();

    let claims = verify_token(&token, &config).unwrap();
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.role, "admin");
}
