//! Test utilities and common setup.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use acctd::account::{AccountService, SqliteAccountStore};
use acctd::api;
use acctd::db::Database;

/// Create a test application over an in-memory database.
pub async fn test_app() -> Router {
    let db = Database::in_memory().await.unwrap();

    let store = SqliteAccountStore::new(db.pool().clone());
    let accounts = AccountService::new(Arc::new(store));

    let state = api::AppState::new(accounts);
    api::create_router(state)
}

/// Send a JSON request to the app and return the response.
pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Value,
) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .method(method)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Send a bodyless request to the app and return the response.
pub async fn send(app: &Router, method: Method, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .method(method)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Register an account and return its profile JSON, asserting 201.
pub async fn register(app: &Router, email: &str, password: &str, user_name: &str) -> Value {
    let response = send_json(
        app,
        Method::POST,
        "/accounts/register",
        serde_json::json!({
            "email": email,
            "password": password,
            "user_name": user_name,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
