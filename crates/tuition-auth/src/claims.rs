//! JWT claim structures.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const EMAIL_VERIFICATION_PURPOSE: &str = "email_verification";

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Identity ID (subject claim)
    pub sub: String,
    /// Identity email address
    pub email: String,
    /// Server-side session this token belongs to
    pub sid: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

/// JWT claims carried by email verification links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationClaims {
    pub sub: String,
    pub email: String,
    /// Always [`EMAIL_VERIFICATION_PURPOSE`]; keeps access tokens from
    /// being replayed as verification links.
    pub purpose: String,
    pub exp: usize,
    pub iat: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize() {
        let claims = Claims {
            sub: "user-id-123".to_string(),
            email: "staff@example.com".to_string(),
            sid: "session-1".to_string(),
            exp: 1234567890,
            iat: 1234567800,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""sub":"user-id-123""#));
        assert!(serialized.contains(r#""sid":"session-1""#));
    }

    #[test]
    fn test_claims_deserialize() {
        let json = r#"{"sub":"user-id-456","email":"user@test.com","sid":"s-9","exp":9999999999,"iat":9999999900}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub, "user-id-456");
        assert_eq!(claims.sid, "s-9");
        assert_eq!(claims.exp, 9999999999);
    }

    #[test]
    fn test_verification_claims_serialize() {
        let claims = VerificationClaims {
            sub: "user-1".to_string(),
            email: "new@test.com".to_string(),
            purpose: EMAIL_VERIFICATION_PURPOSE.to_string(),
            exp: 1234567890,
            iat: 1234567800,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""purpose":"email_verification""#));
    }
}
