//! Explicit login sessions.
//!
//! A `Session` is created by a successful login and removed by logout. Handlers that need
//! an identity take the `AuthSession` extractor, which resolves the bearer token.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::auth::store::Account;
use crate::errors::AppError;
use crate::state::AppState;

/// Sessions live as long as the credential file's login cookie: 30 days.
pub const SESSION_TTL_DAYS: i64 = 30;

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: Uuid,
    pub username: String,
    pub display_name: String,
    pub login_time: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// What a client may learn about its own session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionView {
    pub authenticated: bool,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub login_time: Option<DateTime<Utc>>,
}

impl From<Option<&Session>> for SessionView {
    fn from(session: Option<&Session>) -> Self {
        match session {
            Some(s) => SessionView {
                authenticated: true,
                username: Some(s.username.clone()),
                display_name: Some(s.display_name.clone()),
                login_time: Some(s.login_time),
            },
            None => SessionView::default(),
        }
    }
}

/// In-memory registry of live sessions. Sessions do not survive a restart.
///
/// Expired sessions are dropped when looked up and swept on every login, so the map
/// only ever holds sessions younger than the TTL.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(Duration::days(SESSION_TTL_DAYS))
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn create(&self, account: &Account) -> Session {
        let now = Utc::now();
        let session = Session {
            token: Uuid::new_v4(),
            username: account.username.clone(),
            display_name: account.display_name.clone(),
            login_time: now,
            expires_at: now + self.ttl,
        };

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        if sessions.len() < before {
            debug!("Swept {} expired session(s)", before - sessions.len());
        }
        sessions.insert(session.token, session.clone());
        session
    }

    pub async fn get(&self, token: &Uuid) -> Option<Session> {
        let now = Utc::now();
        let session = self.sessions.read().await.get(token).cloned()?;
        if session.is_expired(now) {
            self.sessions.write().await.remove(token);
            return None;
        }
        Some(session)
    }

    /// Returns false if the token was not live.
    pub async fn remove(&self, token: &Uuid) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Extractor that resolves `Authorization: Bearer <token>` to a live session.
/// Use `Option<AuthSession>` where anonymous access is allowed.
#[derive(Debug, Clone)]
pub struct AuthSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .and_then(|t| Uuid::parse_str(t.trim()).ok())
            .ok_or(AppError::Unauthorized)?;

        state
            .sessions
            .get(&token)
            .await
            .map(AuthSession)
            .ok_or(AppError::Unauthorized)
    }
}
