//! API integration tests.

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

mod common;
use common::{body_json, register, send, send_json, test_app};

/// Assert that a profile JSON object carries no password material.
fn assert_no_password(profile: &Value) {
    let obj = profile.as_object().expect("profile should be an object");
    assert!(!obj.contains_key("password"));
    assert!(!obj.contains_key("password_hash"));
}

/// Test that health endpoint works.
#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app().await;

    let response = send(&app, Method::GET, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_register_returns_profile_without_password() {
    let app = test_app().await;

    let profile = register(&app, "alice@example.com", "pw123456", "alice").await;
    assert_eq!(profile["id"], 1);
    assert_eq!(profile["email"], "alice@example.com");
    assert_eq!(profile["user_name"], "alice");
    assert_no_password(&profile);
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = test_app().await;

    register(&app, "alice@example.com", "pw123456", "alice").await;

    let response = send_json(
        &app,
        Method::POST,
        "/accounts/register",
        json!({
            "email": "alice@example.com",
            "password": "different1",
            "user_name": "impostor",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");

    // Exactly one account stored for that email
    let response = send(&app, Method::GET, "/accounts").await;
    let accounts = body_json(response).await;
    assert_eq!(accounts.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_validation_errors_are_structured() {
    let app = test_app().await;

    let response = send_json(
        &app,
        Method::POST,
        "/accounts/register",
        json!({
            "email": "not-an-email",
            "password": "short",
            "user_name": "",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_FAILED");
    let fields: Vec<&str> = json["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "password", "user_name"]);
}

#[tokio::test]
async fn test_login_round_trip() {
    let app = test_app().await;

    let profile = register(&app, "alice@example.com", "pw123456", "alice").await;

    let response = send_json(
        &app,
        Method::POST,
        "/accounts/login",
        json!({"email": "alice@example.com", "password": "pw123456"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let logged_in = body_json(response).await;
    assert_eq!(logged_in, profile);
    assert_no_password(&logged_in);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = test_app().await;

    register(&app, "alice@example.com", "pw123456", "alice").await;

    let wrong_password = send_json(
        &app,
        Method::POST,
        "/accounts/login",
        json!({"email": "alice@example.com", "password": "wrongpw1"}),
    )
    .await;
    let unknown_email = send_json(
        &app,
        Method::POST,
        "/accounts/login",
        json!({"email": "nobody@example.com", "password": "pw123456"}),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    // Same error kind and message for both, so emails cannot be enumerated
    let a = body_json(wrong_password).await;
    let b = body_json(unknown_email).await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_list_accounts() {
    let app = test_app().await;

    // Empty store lists successfully
    let response = send(&app, Method::GET, "/accounts").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));

    register(&app, "a@example.com", "password1", "a").await;
    register(&app, "b@example.com", "password2", "b").await;

    let response = send(&app, Method::GET, "/accounts").await;
    assert_eq!(response.status(), StatusCode::OK);

    let accounts = body_json(response).await;
    let accounts = accounts.as_array().unwrap();
    assert_eq!(accounts.len(), 2);
    for account in accounts {
        assert_no_password(account);
    }
}

#[tokio::test]
async fn test_get_account_by_id_and_email() {
    let app = test_app().await;

    let profile = register(&app, "alice@example.com", "pw123456", "alice").await;
    let id = profile["id"].as_i64().unwrap();

    let response = send(&app, Method::GET, &format!("/accounts/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, profile);

    let response = send(&app, Method::GET, "/accounts/email/alice@example.com").await;
    assert_eq!(response.status(), StatusCode::OK);
    let by_email = body_json(response).await;
    assert_eq!(by_email, profile);
    assert_no_password(&by_email);

    let response = send(&app, Method::GET, "/accounts/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, Method::GET, "/accounts/email/ghost@example.com").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_user_name_only() {
    let app = test_app().await;

    let profile = register(&app, "alice@example.com", "pw123456", "alice").await;
    let id = profile["id"].as_i64().unwrap();

    let response = send_json(
        &app,
        Method::PATCH,
        &format!("/accounts/{id}"),
        json!({"user_name": "x"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["user_name"], "x");
    assert_eq!(updated["email"], "alice@example.com");
    assert_no_password(&updated);

    // Password hash untouched: old credentials still work
    let response = send_json(
        &app,
        Method::POST,
        "/accounts/login",
        json!({"email": "alice@example.com", "password": "pw123456"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_update_password_is_rehashed() {
    let app = test_app().await;

    let profile = register(&app, "alice@example.com", "pw123456", "alice").await;
    let id = profile["id"].as_i64().unwrap();

    let response = send_json(
        &app,
        Method::PATCH,
        &format!("/accounts/{id}"),
        json!({"password": "newsecret1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // New password authenticates, old one does not
    let response = send_json(
        &app,
        Method::POST,
        "/accounts/login",
        json!({"email": "alice@example.com", "password": "newsecret1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_json(
        &app,
        Method::POST,
        "/accounts/login",
        json!({"email": "alice@example.com", "password": "pw123456"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_missing_account() {
    let app = test_app().await;

    let response = send_json(
        &app,
        Method::PATCH,
        "/accounts/42",
        json!({"user_name": "ghost"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_rejects_invalid_fields() {
    let app = test_app().await;

    let profile = register(&app, "alice@example.com", "pw123456", "alice").await;
    let id = profile["id"].as_i64().unwrap();

    let response = send_json(
        &app,
        Method::PATCH,
        &format!("/accounts/{id}"),
        json!({"password": "short"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["fields"][0]["field"], "password");
}

#[tokio::test]
async fn test_update_email_to_taken_address_conflicts() {
    let app = test_app().await;

    register(&app, "alice@example.com", "pw123456", "alice").await;
    let bob = register(&app, "bob@example.com", "pw123456", "bob").await;
    let id = bob["id"].as_i64().unwrap();

    let response = send_json(
        &app,
        Method::PATCH,
        &format!("/accounts/{id}"),
        json!({"email": "alice@example.com"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let app = test_app().await;

    let profile = register(&app, "alice@example.com", "pw123456", "alice").await;
    let id = profile["id"].as_i64().unwrap();

    let response = send(&app, Method::DELETE, &format!("/accounts/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, Method::GET, &format!("/accounts/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, Method::DELETE, &format!("/accounts/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// The concrete end-to-end scenario: register alice, look her up by email,
/// fail a login with the wrong password, then succeed with the right one.
#[tokio::test]
async fn test_alice_scenario() {
    let app = test_app().await;

    let profile = register(&app, "alice@example.com", "pw123456", "alice").await;
    assert_eq!(profile["id"], 1);

    let response = send(&app, Method::GET, "/accounts/email/alice@example.com").await;
    assert_eq!(response.status(), StatusCode::OK);
    let found = body_json(response).await;
    assert_eq!(found["id"], 1);
    assert_eq!(found["user_name"], "alice");
    assert_no_password(&found);

    let response = send_json(
        &app,
        Method::POST,
        "/accounts/login",
        json!({"email": "alice@example.com", "password": "wrongpw1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send_json(
        &app,
        Method::POST,
        "/accounts/login",
        json!({"email": "alice@example.com", "password": "pw123456"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, profile);
}
