use anyhow::anyhow;
use thiserror::Error;
use tracing::{instrument, warn};

use tuition_core::{AppError, MIN_PASSWORD_LENGTH};
use tuition_models::{
    MessageResponse, SignInRequest, SignInResponse, SignOutResponse, SignUpRequest,
    SignUpResponse,
};

use super::identity::{IdentityError, IdentityService, NewIdentity, normalize_email};
use super::session::{AUTH_ENTRY_PATH, SessionContext};
use crate::metrics::{track_sign_in_failure, track_sign_in_success, track_sign_out, track_sign_up};

/// Sign-up attempts stopped before the identity service is contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignUpRejection {
    #[error("Passwords do not match. Please try again.")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters long.")]
    PasswordTooShort,
}

impl SignUpRejection {
    pub fn title(&self) -> &'static str {
        match self {
            SignUpRejection::PasswordMismatch => "Password mismatch",
            SignUpRejection::PasswordTooShort => "Password too short",
        }
    }
}

/// Mismatch is reported before length, so `"abc"`/`"abd"` is a mismatch.
pub fn check_sign_up_passwords(
    password: &str,
    confirm_password: &str,
) -> Result<(), SignUpRejection> {
    if password != confirm_password {
        return Err(SignUpRejection::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(SignUpRejection::PasswordTooShort);
    }
    Ok(())
}

/// Entry point for sign-in, sign-up and sign-out on top of an identity
/// service.
pub struct AuthGateway<I> {
    identity: I,
}

impl<I: IdentityService> AuthGateway<I> {
    pub fn new(identity: I) -> Self {
        Self { identity }
    }

    #[instrument(skip(self, dto), fields(email = %dto.email))]
    pub async fn sign_in(&self, dto: SignInRequest) -> Result<SignInResponse, AppError> {
        let email = normalize_email(&dto.email);

        match self.identity.sign_in(&email, &dto.password).await {
            Ok(issued) => {
                track_sign_in_success();
                Ok(SignInResponse {
                    access_token: issued.access_token,
                    token_type: "Bearer".to_string(),
                    expires_in: issued.expires_in,
                    user: issued.user,
                })
            }
            Err(e) => {
                track_sign_in_failure(e.reason());
                Err(e.into_app_error())
            }
        }
    }

    #[instrument(skip(self, dto), fields(email = %dto.email))]
    pub async fn sign_up(&self, dto: SignUpRequest) -> Result<SignUpResponse, AppError> {
        if let Err(rejection) = check_sign_up_passwords(&dto.password, &dto.confirm_password) {
            warn!(reason = rejection.title(), "sign-up rejected");
            return Err(AppError::unprocessable(rejection));
        }

        let email = normalize_email(&dto.email);
        let user = self
            .identity
            .sign_up(NewIdentity {
                email: &email,
                password: &dto.password,
                full_name: dto.full_name.trim(),
            })
            .await
            .map_err(IdentityError::into_app_error)?;

        track_sign_up();

        Ok(SignUpResponse {
            message: "Please check your email to verify your account.".to_string(),
            user,
        })
    }

    /// Ends the session held by `context`. Success and failure both carry
    /// the redirect to the unauthenticated entry view.
    #[instrument(skip(self, context))]
    pub async fn sign_out(&self, context: &mut SessionContext) -> Result<SignOutResponse, AppError> {
        let session = context
            .teardown()
            .ok_or_else(|| AppError::unauthorized(anyhow!("No active session")))
            .map_err(|e| e.with_redirect(AUTH_ENTRY_PATH))?;

        self.identity
            .sign_out(session.session_id)
            .await
            .map_err(|e| e.into_app_error().with_redirect(AUTH_ENTRY_PATH))?;

        track_sign_out();

        Ok(SignOutResponse {
            message: "You have been logged out.".to_string(),
            redirect_to: AUTH_ENTRY_PATH.to_string(),
        })
    }

    #[instrument(skip(self, token))]
    pub async fn confirm_email(&self, token: &str) -> Result<MessageResponse, AppError> {
        self.identity
            .confirm_email(token)
            .await
            .map_err(IdentityError::into_app_error)?;
        Ok(MessageResponse {
            message: "Email confirmed. You can now sign in.".to_string(),
        })
    }
}
