//! Bearer token handling
//!
//! Tokens are HS256-signed and embed the account's `user_code`. They carry
//! no expiry claim; practical expiry comes from the cookie's session scope
//! and the server-side session TTL.

use crate::error::Result;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Signed token claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Account identifier the token was issued for
    pub user_code: i32,
    /// Issued at
    pub iat: i64,
}

/// Create a signed bearer token for a user
pub fn issue(user_code: i32, secret: &[u8]) -> Result<String> {
    let claims = Claims {
        user_code,
        iat: chrono::Utc::now().timestamp(),
    };
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))?;
    Ok(token)
}

/// Validate a bearer token's signature and decode its claims
pub fn validate(token: &str, secret: &[u8]) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    // No exp claim is embedded, so expiry checking is disabled.
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"unit-test-secret";

    #[test]
    fn test_issue_and_validate_round_trip() {
        let token = issue(42, SECRET).expect("failed to issue token");
        let claims = validate(&token, SECRET).expect("failed to validate token");

        assert_eq!(claims.user_code, 42);
        assert!(claims.iat > 0);
    }

    #[test]
    fn test_token_has_jwt_shape() {
        let token = issue(1, SECRET).expect("failed to issue token");
        assert_eq!(token.split('.').count(), 3); // header.payload.signature
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue(42, SECRET).expect("failed to issue token");
        assert!(validate(&token, b"some-other-secret").is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = issue(42, SECRET).expect("failed to issue token");

        // Flip one character of the signature segment.
        let mut bytes = token.into_bytes();
        let last = bytes.len() - 1;
        bytes[last] = if bytes[last] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).expect("still utf8");

        assert!(validate(&tampered, SECRET).is_err());
    }

    #[test]
    fn test_malformed_token_rejected() {
        assert!(validate("not-a-token", SECRET).is_err());
        assert!(validate("invalid.token.here", SECRET).is_err());
        assert!(validate("", SECRET).is_err());
    }
}
