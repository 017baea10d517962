//! Token creation and verification.
//!
//! Access tokens alone are not proof of a live session: callers must also
//! check that the `sid` they carry has not been revoked.

use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use tuition_config::JwtConfig;
use tuition_core::AppError;

use crate::claims::{Claims, EMAIL_VERIFICATION_PURPOSE, VerificationClaims};

/// Creates an access token bound to `session_id`.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_access_token(
    user_id: Uuid,
    email: &str,
    session_id: Uuid,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = (now + jwt_config.access_token_expiry) as usize;
    let now = now as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        sid: session_id.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to create token: {}", e)))
}

/// Verifies an access token's signature and expiry.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(anyhow!("Invalid or expired token")))
}

/// Creates the token embedded in the email verification link.
pub fn create_verification_token(
    user_id: Uuid,
    email: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = (now + jwt_config.verification_token_expiry) as usize;
    let now = now as usize;

    let claims = VerificationClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        purpose: EMAIL_VERIFICATION_PURPOSE.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to create verification token: {}", e)))
}

/// Verifies an email verification token.
///
/// # Errors
///
/// Returns a bad request error when the token is invalid, expired, or was
/// issued for another purpose.
pub fn verify_verification_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<VerificationClaims, AppError> {
    let decoded = decode::<VerificationClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::bad_request(anyhow!("Invalid or expired verification link")))?;

    if decoded.claims.purpose != EMAIL_VERIFICATION_PURPOSE {
        return Err(AppError::bad_request(anyhow!(
            "Invalid or expired verification link"
        )));
    }

    Ok(decoded.claims)
}
