//! Identity provider seam.
//!
//! The auth gateway and the session extractor talk to identities only through
//! [`IdentityService`]; [`PgIdentityService`] is the production implementation
//! backed by the `auth_users` and `auth_sessions` tables.

use std::future::Future;

use anyhow::anyhow;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use thiserror::Error;
use tracing::{instrument, warn};
use uuid::Uuid;

use tuition_auth::{create_access_token, create_verification_token, verify_verification_token};
use tuition_config::JwtConfig;
use tuition_core::{AppError, hash_password, verify_password};
use tuition_models::SessionUser;

use crate::state::AppState;
use crate::utils::email::EmailService;

const SESSION_USER_SELECT: &str = "SELECT u.id, u.email, p.full_name, p.role, u.email_confirmed_at
     FROM auth_users u
     LEFT JOIN user_profiles p ON p.user_id = u.id";

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Invalid login credentials")]
    InvalidCredentials,
    #[error("Email not confirmed")]
    EmailNotConfirmed,
    #[error("User already registered")]
    AlreadyRegistered,
    #[error("Session not found")]
    SessionNotFound,
    #[error("Invalid or expired verification link")]
    InvalidVerification,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl IdentityError {
    /// Short label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            IdentityError::InvalidCredentials => "invalid_credentials",
            IdentityError::EmailNotConfirmed => "email_not_confirmed",
            IdentityError::AlreadyRegistered => "already_registered",
            IdentityError::SessionNotFound => "session_not_found",
            IdentityError::InvalidVerification => "invalid_verification",
            IdentityError::Database(_) => "database",
            IdentityError::Unexpected(_) => "unexpected",
        }
    }

    /// Maps the failure onto the HTTP status the client sees.
    pub fn into_app_error(self) -> AppError {
        match self {
            IdentityError::InvalidCredentials | IdentityError::SessionNotFound => {
                AppError::unauthorized(self)
            }
            IdentityError::EmailNotConfirmed => AppError::forbidden(self),
            IdentityError::AlreadyRegistered | IdentityError::InvalidVerification => {
                AppError::bad_request(self)
            }
            IdentityError::Database(e) => AppError::database(e),
            IdentityError::Unexpected(e) => AppError::internal(e),
        }
    }
}

/// Details collected by the sign-up form, after password checks passed.
#[derive(Debug, Clone, Copy)]
pub struct NewIdentity<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub full_name: &'a str,
}

/// A session opened by a successful sign-in.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub access_token: String,
    pub expires_in: i64,
    pub session_id: Uuid,
    pub user: SessionUser,
}

pub trait IdentityService: Send + Sync {
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<IssuedSession, IdentityError>> + Send;

    /// Registers an identity. The account stays unconfirmed until the
    /// verification link is followed.
    fn sign_up(
        &self,
        identity: NewIdentity<'_>,
    ) -> impl Future<Output = Result<SessionUser, IdentityError>> + Send;

    fn sign_out(&self, session_id: Uuid)
    -> impl Future<Output = Result<(), IdentityError>> + Send;

    /// Returns the user behind a live session, or `None` when the session is
    /// unknown, revoked or expired.
    fn resolve_session(
        &self,
        session_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<SessionUser>, IdentityError>> + Send;

    fn confirm_email(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<SessionUser, IdentityError>> + Send;
}

#[derive(Debug, Clone)]
pub struct PgIdentityService {
    db: PgPool,
    jwt_config: JwtConfig,
    mailer: EmailService,
}

impl PgIdentityService {
    pub fn new(db: PgPool, jwt_config: JwtConfig, mailer: EmailService) -> Self {
        Self {
            db,
            jwt_config,
            mailer,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            state.db.clone(),
            state.jwt_config.clone(),
            EmailService::new(state.email_config.clone()),
        )
    }

    async fn load_user(&self, user_id: Uuid) -> Result<SessionUser, IdentityError> {
        let user =
            sqlx::query_as::<_, SessionUser>(&format!("{} WHERE u.id = $1", SESSION_USER_SELECT))
                .bind(user_id)
                .fetch_one(&self.db)
                .await?;
        Ok(user)
    }
}

impl IdentityService for PgIdentityService {
    #[instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<IssuedSession, IdentityError> {
        #[derive(sqlx::FromRow)]
        struct Credentials {
            id: Uuid,
            email: String,
            password_hash: String,
            email_confirmed_at: Option<DateTime<Utc>>,
        }

        let credentials = sqlx::query_as::<_, Credentials>(
            "SELECT id, email, password_hash, email_confirmed_at FROM auth_users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?
        .ok_or(IdentityError::InvalidCredentials)?;

        let valid = verify_password(password, &credentials.password_hash)
            .map_err(|e| IdentityError::Unexpected(e.error))?;
        if !valid {
            return Err(IdentityError::InvalidCredentials);
        }

        if credentials.email_confirmed_at.is_none() {
            return Err(IdentityError::EmailNotConfirmed);
        }

        let expires_at = Utc::now() + Duration::seconds(self.jwt_config.access_token_expiry);
        let session_id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO auth_sessions (user_id, expires_at) VALUES ($1, $2) RETURNING id",
        )
        .bind(credentials.id)
        .bind(expires_at)
        .fetch_one(&self.db)
        .await?;

        sqlx::query("UPDATE auth_users SET last_sign_in_at = NOW() WHERE id = $1")
            .bind(credentials.id)
            .execute(&self.db)
            .await?;

        let access_token = create_access_token(
            credentials.id,
            &credentials.email,
            session_id,
            &self.jwt_config,
        )
        .map_err(|e| IdentityError::Unexpected(e.error))?;

        let user = self.load_user(credentials.id).await?;

        Ok(IssuedSession {
            access_token,
            expires_in: self.jwt_config.access_token_expiry,
            session_id,
            user,
        })
    }

    #[instrument(skip(self, identity), fields(email = %identity.email))]
    async fn sign_up(&self, identity: NewIdentity<'_>) -> Result<SessionUser, IdentityError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM auth_users WHERE email = $1)",
        )
        .bind(identity.email)
        .fetch_one(&self.db)
        .await?;

        if exists {
            return Err(IdentityError::AlreadyRegistered);
        }

        let password_hash =
            hash_password(identity.password).map_err(|e| IdentityError::Unexpected(e.error))?;

        let mut tx = self.db.begin().await?;

        let user_id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO auth_users (email, password_hash) VALUES ($1, $2) RETURNING id",
        )
        .bind(identity.email)
        .bind(&password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                IdentityError::AlreadyRegistered
            }
            _ => IdentityError::Database(e),
        })?;

        sqlx::query("INSERT INTO user_profiles (user_id, full_name, role) VALUES ($1, $2, 'Staff')")
            .bind(user_id)
            .bind(identity.full_name)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let token = create_verification_token(user_id, identity.email, &self.jwt_config)
            .map_err(|e| IdentityError::Unexpected(e.error))?;

        // The account exists at this point; a mail failure must not undo it.
        if let Err(e) = self
            .mailer
            .send_verification_email(identity.email, identity.full_name, &token)
            .await
        {
            warn!(error = %e.message(), "failed to send verification email");
        }

        self.load_user(user_id).await
    }

    #[instrument(skip(self))]
    async fn sign_out(&self, session_id: Uuid) -> Result<(), IdentityError> {
        let result = sqlx::query(
            "UPDATE auth_sessions SET revoked_at = NOW() WHERE id = $1 AND revoked_at IS NULL",
        )
        .bind(session_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(IdentityError::SessionNotFound);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn resolve_session(
        &self,
        session_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<SessionUser>, IdentityError> {
        let user = sqlx::query_as::<_, SessionUser>(&format!(
            "{} JOIN auth_sessions s ON s.user_id = u.id
             WHERE s.id = $1 AND u.id = $2 AND s.revoked_at IS NULL AND s.expires_at > NOW()",
            SESSION_USER_SELECT
        ))
        .bind(session_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self, token))]
    async fn confirm_email(&self, token: &str) -> Result<SessionUser, IdentityError> {
        let claims = verify_verification_token(token, &self.jwt_config)
            .map_err(|_| IdentityError::InvalidVerification)?;
        let user_id =
            Uuid::parse_str(&claims.sub).map_err(|_| IdentityError::InvalidVerification)?;

        let confirmed = sqlx::query_scalar::<_, Uuid>(
            "UPDATE auth_users
             SET email_confirmed_at = COALESCE(email_confirmed_at, NOW()), updated_at = NOW()
             WHERE id = $1 AND email = $2
             RETURNING id",
        )
        .bind(user_id)
        .bind(&claims.email)
        .fetch_optional(&self.db)
        .await?
        .ok_or(IdentityError::InvalidVerification)?;

        self.load_user(confirmed).await
    }
}

/// Lower-cases and trims an email the way identities are stored.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub(crate) fn parse_uuid_claim(value: &str) -> Result<Uuid, IdentityError> {
    Uuid::parse_str(value).map_err(|_| IdentityError::Unexpected(anyhow!("Malformed token subject")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Staff@Institute.TEST "), "staff@institute.test");
    }

    #[test]
    fn test_identity_errors_map_to_statuses() {
        let cases = [
            (IdentityError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (IdentityError::EmailNotConfirmed, StatusCode::FORBIDDEN),
            (IdentityError::AlreadyRegistered, StatusCode::BAD_REQUEST),
            (IdentityError::InvalidVerification, StatusCode::BAD_REQUEST),
            (IdentityError::SessionNotFound, StatusCode::UNAUTHORIZED),
        ];
        for (err, status) in cases {
            let message = err.to_string();
            let app_error = err.into_app_error();
            assert_eq!(app_error.status, status);
            assert_eq!(app_error.message(), message);
        }
    }

    #[test]
    fn test_parse_uuid_claim_rejects_garbage() {
        assert!(parse_uuid_claim("not-a-uuid").is_err());
        let id = Uuid::new_v4();
        assert_eq!(parse_uuid_claim(&id.to_string()).unwrap(), id);
    }
}
