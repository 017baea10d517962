//! In-memory identity service for unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use uuid::Uuid;

use tuition_models::{SessionUser, UserRole};

use super::identity::{IdentityError, IdentityService, IssuedSession, NewIdentity};

pub fn sample_user() -> SessionUser {
    SessionUser {
        id: Uuid::new_v4(),
        email: "staff@institute.test".to_string(),
        full_name: Some("Asha Rao".to_string()),
        role: Some(UserRole::Staff),
        email_confirmed_at: Some(Utc::now()),
    }
}

#[derive(Default)]
pub struct RecordingIdentity {
    session: Option<(Uuid, SessionUser)>,
    revoked: Mutex<Vec<Uuid>>,
    sign_up_calls: AtomicUsize,
    resolve_calls: AtomicUsize,
}

impl RecordingIdentity {
    pub fn with_session(session_id: Uuid, user: SessionUser) -> Self {
        Self {
            session: Some((session_id, user)),
            ..Self::default()
        }
    }

    pub fn sign_up_calls(&self) -> usize {
        self.sign_up_calls.load(Ordering::SeqCst)
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    pub fn revoked(&self) -> Vec<Uuid> {
        self.revoked.lock().unwrap().clone()
    }
}

impl IdentityService for RecordingIdentity {
    async fn sign_in(&self, _email: &str, _password: &str) -> Result<IssuedSession, IdentityError> {
        Err(IdentityError::InvalidCredentials)
    }

    async fn sign_up(&self, identity: NewIdentity<'_>) -> Result<SessionUser, IdentityError> {
        self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
        Ok(SessionUser {
            id: Uuid::new_v4(),
            email: identity.email.to_string(),
            full_name: Some(identity.full_name.to_string()),
            role: Some(UserRole::Staff),
            email_confirmed_at: None,
        })
    }

    async fn sign_out(&self, session_id: Uuid) -> Result<(), IdentityError> {
        match &self.session {
            Some((id, _)) if *id == session_id => {
                self.revoked.lock().unwrap().push(session_id);
                Ok(())
            }
            _ => Err(IdentityError::SessionNotFound),
        }
    }

    async fn resolve_session(
        &self,
        session_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<SessionUser>, IdentityError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        let revoked = self.revoked.lock().unwrap().contains(&session_id);
        Ok(self
            .session
            .as_ref()
            .filter(|(id, user)| *id == session_id && user.id == user_id && !revoked)
            .map(|(_, user)| user.clone()))
    }

    async fn confirm_email(&self, _token: &str) -> Result<SessionUser, IdentityError> {
        Err(IdentityError::InvalidVerification)
    }
}
