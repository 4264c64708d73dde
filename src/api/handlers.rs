//! HTTP request handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::account::{AccountChanges, AccountProfile, NewAccount};
use crate::validate;

use super::error::{ApiError, ApiResult};
use super::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register a new account.
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<NewAccount>,
) -> ApiResult<(StatusCode, Json<AccountProfile>)> {
    validate::registration(&request).map_err(ApiError::Validation)?;

    let profile = state.accounts.register(request).await?;

    info!(account_id = profile.id, "Account registered");
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Authenticate with email and password.
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<AccountProfile>> {
    validate::credentials(&request.email, &request.password).map_err(ApiError::Validation)?;

    let profile = state
        .accounts
        .authenticate(&request.email, &request.password)
        .await?;

    info!(account_id = profile.id, "Account logged in");
    Ok(Json(profile))
}

/// List all accounts.
#[instrument(skip(state))]
pub async fn list_accounts(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<AccountProfile>>> {
    let profiles = state.accounts.list_all().await?;

    info!(count = profiles.len(), "Listed accounts");
    Ok(Json(profiles))
}

/// Get an account by id.
#[instrument(skip(state))]
pub async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> ApiResult<Json<AccountProfile>> {
    let profile = state.accounts.find_by_id(account_id).await?;
    Ok(Json(profile))
}

/// Get an account by email.
#[instrument(skip(state))]
pub async fn get_account_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Json<AccountProfile>> {
    let profile = state.accounts.find_by_email(&email).await?;
    Ok(Json(profile))
}

/// Apply a partial update to an account.
#[instrument(skip(state, request))]
pub async fn update_account(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
    Json(request): Json<AccountChanges>,
) -> ApiResult<Json<AccountProfile>> {
    validate::update(&request).map_err(ApiError::Validation)?;

    let profile = state.accounts.update(account_id, request).await?;

    info!(account_id = profile.id, "Account updated");
    Ok(Json(profile))
}

/// Delete an account.
#[instrument(skip(state))]
pub async fn delete_account(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.accounts.delete(account_id).await?;

    info!(account_id, "Account deleted");
    Ok(StatusCode::NO_CONTENT)
}
