//! Axum route handlers for login, sign-up, logout and session lookup.
//!
//! The credential store does blocking file IO and argon2 hashing, so every call into it
//! runs on the blocking pool.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::session::{AuthSession, SessionView};
use crate::auth::store::{Account, CredentialStore};
use crate::auth::AuthError;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Account,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct UsernameAvailability {
    pub username: String,
    pub available: bool,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: Account,
}

/// Runs a credential-store operation off the async runtime.
async fn with_store<T, F>(store: &CredentialStore, op: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&CredentialStore) -> Result<T, AuthError> + Send + 'static,
{
    let store = store.clone();
    let result = tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("credential store task failed: {e}")))?;
    Ok(result?)
}

/// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let account =
        with_store(&state.credentials, move |store| {
            store.authenticate(&req.username, &req.password)
        })
        .await?;

    let session = state.sessions.create(&account).await;
    info!("'{}' logged in", account.username);

    Ok(Json(LoginResponse {
        token: session.token.to_string(),
        user: account,
    }))
}

/// POST /api/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let account = with_store(&state.credentials, move |store| {
        store.add_user(&req.username, &req.name, &req.email, &req.password)
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "Account created successfully. You can now log in.".to_string(),
            user: account,
        }),
    ))
}

/// GET /api/auth/username-available?username=...
///
/// Lets a sign-up form check a name before submitting. Lookup ignores case.
pub async fn handle_username_available(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<UsernameAvailability>, AppError> {
    let username = query.username.trim().to_lowercase();
    let lookup = username.clone();
    let taken = with_store(&state.credentials, move |store| store.user_exists(&lookup)).await?;
    Ok(Json(UsernameAvailability {
        username,
        available: !taken,
    }))
}

/// POST /api/auth/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> StatusCode {
    state.sessions.remove(&session.token).await;
    info!(
        "'{}' logged out ({} sessions still live)",
        session.username,
        state.sessions.len().await
    );
    StatusCode::NO_CONTENT
}

/// GET /api/auth/session
pub async fn handle_session(session: Option<AuthSession>) -> Json<SessionView> {
    Json(SessionView::from(session.as_ref().map(|s| &s.0)))
}
