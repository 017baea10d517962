//! Request and response bodies for the identity endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::users::SessionUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignInRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Sign-up form.
///
/// Password rules (confirmation match, minimum length) are enforced by the
/// auth gateway before the identity service is contacted.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignUpRequest {
    #[validate(length(min = 1, max = 200, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignInResponse {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until `access_token` expires.
    pub expires_in: i64,
    pub user: SessionUser,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignUpResponse {
    pub message: String,
    pub user: SessionUser,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignOutResponse {
    pub message: String,
    pub redirect_to: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct VerifyEmailQuery {
    pub token: String,
}

/// Observable session state consulted by every protected view.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionStatusResponse {
    Loading,
    Authenticated { user: SessionUser },
    Unauthenticated { redirect_to: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_sign_up_request_rejects_bad_email() {
        let dto = SignUpRequest {
            full_name: "Asha Rao".to_string(),
            email: "not-an-email".to_string(),
            password: "abcdef".to_string(),
            confirm_password: "abcdef".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_sign_up_request_leaves_password_rules_to_gateway() {
        let dto = SignUpRequest {
            full_name: "Asha Rao".to_string(),
            email: "asha@institute.test".to_string(),
            password: "abc".to_string(),
            confirm_password: "xyz".to_string(),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_session_status_tagging() {
        let status = SessionStatusResponse::Unauthenticated {
            redirect_to: "/auth".to_string(),
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["status"], "unauthenticated");
        assert_eq!(json["redirect_to"], "/auth");

        let json = serde_json::to_value(SessionStatusResponse::Loading).unwrap();
        assert_eq!(json["status"], "loading");
    }
}
