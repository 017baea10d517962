//! # Tuition Auth
//!
//! JWT claim structures and token helpers for the identity service.
//!
//! Two token kinds are issued:
//!
//! - **Access Token** ([`Claims`]): bearer token bound to a server-side
//!   session (`sid`), so signing out revokes it before it expires
//! - **Verification Token** ([`VerificationClaims`]): single-purpose token
//!   embedded in the email verification link sent after sign-up
//!
//! # Example
//!
//! ```ignore
//! use tuition_auth::{create_access_token, verify_token};
//! use tuition_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "staff@institute.test", session_id, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.sid, session_id.to_string());
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{Claims, VerificationClaims};
pub use jwt::{
    create_access_token, create_verification_token, verify_token, verify_verification_token,
};
