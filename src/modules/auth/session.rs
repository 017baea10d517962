//! Per-request session resolution and the gate protected views go through.
//!
//! A [`SessionContext`] starts uninitialised, moves to loading while the
//! bearer token is checked against the identity store, and ends resolved to
//! either an active session or none. Protected views never render while the
//! state is loading and always redirect to [`AUTH_ENTRY_PATH`] once it
//! resolves to none.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use tuition_auth::verify_token;
use tuition_config::JwtConfig;
use tuition_models::{SessionStatusResponse, SessionUser};

use super::identity::{IdentityService, parse_uuid_claim};

/// Unauthenticated entry view.
pub const AUTH_ENTRY_PATH: &str = "/auth";

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSession {
    pub session_id: Uuid,
    pub user: SessionUser,
    /// Expiry carried by the access token.
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Loading,
    Resolved(Option<ActiveSession>),
}

/// What a protected view does for a given session state.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewGate<'a> {
    Render(&'a ActiveSession),
    ShowLoading,
    Redirect(&'static str),
}

pub fn gate(state: &SessionState) -> ViewGate<'_> {
    match state {
        SessionState::Uninitialized | SessionState::Loading => ViewGate::ShowLoading,
        SessionState::Resolved(Some(session)) => ViewGate::Render(session),
        SessionState::Resolved(None) => ViewGate::Redirect(AUTH_ENTRY_PATH),
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    state: SessionState,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Moves an uninitialised context into the loading state. Returns false
    /// if loading already started or finished.
    pub fn begin_loading(&mut self) -> bool {
        if self.state == SessionState::Uninitialized {
            self.state = SessionState::Loading;
            true
        } else {
            false
        }
    }

    pub fn resolve(&mut self, session: Option<ActiveSession>) {
        self.state = SessionState::Resolved(session);
    }

    /// Drops the active session, leaving the context resolved to none.
    pub fn teardown(&mut self) -> Option<ActiveSession> {
        match std::mem::replace(&mut self.state, SessionState::Resolved(None)) {
            SessionState::Resolved(session) => session,
            _ => None,
        }
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        match &self.state {
            SessionState::Resolved(Some(session)) => Some(session),
            _ => None,
        }
    }

    pub fn gate(&self) -> ViewGate<'_> {
        gate(&self.state)
    }

    pub fn status(&self) -> SessionStatusResponse {
        match self.gate() {
            ViewGate::ShowLoading => SessionStatusResponse::Loading,
            ViewGate::Render(session) => SessionStatusResponse::Authenticated {
                user: session.user.clone(),
            },
            ViewGate::Redirect(path) => SessionStatusResponse::Unauthenticated {
                redirect_to: path.to_string(),
            },
        }
    }

    /// Resolves a bearer token into a session.
    ///
    /// Invalid tokens, revoked sessions and identity-store failures all
    /// resolve to no session.
    pub async fn establish<I: IdentityService>(
        identity: &I,
        jwt_config: &JwtConfig,
        bearer: Option<&str>,
    ) -> Self {
        let mut context = Self::new();
        context.begin_loading();

        let Some(token) = bearer else {
            context.resolve(None);
            return context;
        };

        let claims = match verify_token(token, jwt_config) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e.message(), "rejected bearer token");
                context.resolve(None);
                return context;
            }
        };

        let ids = parse_uuid_claim(&claims.sid)
            .and_then(|sid| parse_uuid_claim(&claims.sub).map(|sub| (sid, sub)));
        let (session_id, user_id) = match ids {
            Ok(ids) => ids,
            Err(e) => {
                debug!(error = %e, "token carries malformed identifiers");
                context.resolve(None);
                return context;
            }
        };

        let Some(expires_at) = i64::try_from(claims.exp)
            .ok()
            .and_then(|exp| DateTime::from_timestamp(exp, 0))
        else {
            debug!(exp = claims.exp, "token expiry out of range");
            context.resolve(None);
            return context;
        };

        let session = match identity.resolve_session(session_id, user_id).await {
            Ok(user) => user.map(|user| ActiveSession {
                session_id,
                user,
                expires_at,
            }),
            Err(e) => {
                warn!(error = %e, "failed to resolve session");
                None
            }
        };
        context.resolve(session);
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::testing::{RecordingIdentity, sample_user};
    use tuition_auth::create_access_token;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "session-test-secret".to_string(),
            access_token_expiry: 3600,
            verification_token_expiry: 86400,
        }
    }

    #[test]
    fn test_gate_never_renders_while_loading() {
        assert_eq!(gate(&SessionState::Uninitialized), ViewGate::ShowLoading);
        assert_eq!(gate(&SessionState::Loading), ViewGate::ShowLoading);
    }

    #[test]
    fn test_gate_redirects_when_resolved_to_none() {
        assert_eq!(
            gate(&SessionState::Resolved(None)),
            ViewGate::Redirect(AUTH_ENTRY_PATH)
        );
    }

    #[test]
    fn test_gate_renders_active_session() {
        let session = ActiveSession {
            session_id: Uuid::new_v4(),
            user: sample_user(),
            expires_at: Utc::now() + chrono::Duration::hours(1),
        };
        let state = SessionState::Resolved(Some(session.clone()));
        assert_eq!(gate(&state), ViewGate::Render(&session));
    }

    #[test]
    fn test_begin_loading_only_from_uninitialized() {
        let mut context = SessionContext::new();
        assert!(context.begin_loading());
        assert!(!context.begin_loading());
        context.resolve(None);
        assert!(!context.begin_loading());
        assert_eq!(context.state(), &SessionState::Resolved(None));
    }

    #[test]
    fn test_teardown_clears_session() {
        let mut context = SessionContext::new();
        let session = ActiveSession {
            session_id: Uuid::new_v4(),
            user: sample_user(),
            expires_at: Utc::now() + chrono::Duration::hours(1),
        };
        context.resolve(Some(session.clone()));

        assert_eq!(context.teardown(), Some(session));
        assert!(context.active().is_none());
        assert_eq!(
            context.status(),
            SessionStatusResponse::Unauthenticated {
                redirect_to: "/auth".to_string()
            }
        );
    }

    #[test]
    fn test_status_reports_loading() {
        let mut context = SessionContext::new();
        context.begin_loading();
        assert_eq!(context.status(), SessionStatusResponse::Loading);
    }

    #[tokio::test]
    async fn test_establish_without_token_is_unauthenticated() {
        let identity = RecordingIdentity::default();
        let context = SessionContext::establish(&identity, &jwt_config(), None).await;

        assert!(context.active().is_none());
        assert_eq!(identity.resolve_calls(), 0);
    }

    #[tokio::test]
    async fn test_establish_with_garbage_token_skips_identity_store() {
        let identity = RecordingIdentity::default();
        let context =
            SessionContext::establish(&identity, &jwt_config(), Some("not-a-jwt")).await;

        assert_eq!(context.gate(), ViewGate::Redirect(AUTH_ENTRY_PATH));
        assert_eq!(identity.resolve_calls(), 0);
    }

    #[tokio::test]
    async fn test_establish_resolves_live_session() {
        let user = sample_user();
        let session_id = Uuid::new_v4();
        let identity = RecordingIdentity::with_session(session_id, user.clone());
        let token = create_access_token(user.id, &user.email, session_id, &jwt_config()).unwrap();

        let context = SessionContext::establish(&identity, &jwt_config(), Some(&token)).await;

        let active = context.active().expect("session should resolve");
        assert_eq!(active.session_id, session_id);
        assert_eq!(active.user, user);
        assert!(active.expires_at > Utc::now());
    }

    #[tokio::test]
    async fn test_establish_with_revoked_session_redirects() {
        let user = sample_user();
        let identity = RecordingIdentity::default();
        let token =
            create_access_token(user.id, &user.email, Uuid::new_v4(), &jwt_config()).unwrap();

        let context = SessionContext::establish(&identity, &jwt_config(), Some(&token)).await;

        assert_eq!(context.gate(), ViewGate::Redirect(AUTH_ENTRY_PATH));
        assert_eq!(identity.resolve_calls(), 1);
    }
}
