use std::convert::Infallible;

use anyhow::anyhow;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use tuition_core::AppError;
use tuition_models::SessionUser;

use crate::modules::auth::identity::PgIdentityService;
use crate::modules::auth::session::{AUTH_ENTRY_PATH, ActiveSession, SessionContext, ViewGate};
use crate::state::AppState;

/// Token from an `Authorization: Bearer <token>` header, if any.
pub fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolves the caller's session without rejecting the request.
impl FromRequestParts<AppState> for SessionContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = PgIdentityService::from_state(state);
        Ok(SessionContext::establish(&identity, &state.jwt_config, bearer_token(parts)).await)
    }
}

/// Extractor for protected routes. Requests without a live session are
/// rejected with 401 and a redirect to the sign-in view.
#[derive(Debug, Clone)]
pub struct AuthUser(pub ActiveSession);

impl AuthUser {
    pub fn session_id(&self) -> Uuid {
        self.0.session_id
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.0.expires_at
    }

    pub fn user(&self) -> &SessionUser {
        &self.0.user
    }

    pub fn email(&self) -> &str {
        &self.0.user.email
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(context) = SessionContext::from_request_parts(parts, state).await;

        match context.gate() {
            ViewGate::Render(session) => Ok(AuthUser(session.clone())),
            ViewGate::ShowLoading | ViewGate::Redirect(_) => Err(AppError::unauthorized(
                anyhow!("Authentication required"),
            )
            .with_redirect(AUTH_ENTRY_PATH)),
        }
    }
}
