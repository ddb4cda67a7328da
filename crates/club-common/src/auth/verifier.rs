//! Token verification for the external identity provider
//!
//! The club server does not issue tokens. Users sign in against a shared
//! identity provider which hands them an HS256 JWT; this module validates
//! those tokens with the shared secret using the `jsonwebtoken` crate.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Claims carried by identity-provider tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Stable subject identifier assigned by the provider
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Email, when the provider includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name, when the provider includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Validates identity-provider tokens with the shared HS256 secret
///
/// Built without a secret the verifier is "disabled": the server still
/// serves public routes, but every bearer token is rejected with 401.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: Option<DecodingKey>,
}

impl TokenVerifier {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: Some(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self { decoding_key: None }
    }

    /// Build from an optional secret, logging when auth ends up disabled
    #[must_use]
    pub fn from_secret(secret: Option<&str>) -> Self {
        match secret {
            Some(s) => Self::new(s),
            None => {
                tracing::warn!(
                    "IDENTITY_SECRET is not set; authenticated routes will reject all tokens"
                );
                Self::disabled()
            }
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.decoding_key.is_some()
    }

    /// Decode and validate a bearer token
    ///
    /// # Errors
    /// Returns `AuthDisabled` when no secret is configured, `TokenExpired`
    /// for expired tokens, and `InvalidToken` for everything else.
    pub fn verify(&self, token: &str) -> Result<IdentityClaims, AppError> {
        let Some(key) = &self.decoding_key else {
            return Err(AppError::AuthDisabled);
        };

        let validation = Validation::new(Algorithm::HS256);

        let token_data =
            decode::<IdentityClaims>(token, key, &validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret-for-unit-tests";

    fn issue(claims: &IdentityClaims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn valid_claims() -> IdentityClaims {
        let now = Utc::now().timestamp();
        IdentityClaims {
            sub: "idp-user-42".to_string(),
            iat: now,
            exp: now + 900,
            email: Some("alice@university.edu".to_string()),
            name: Some("Alice".to_string()),
        }
    }

    #[test]
    fn test_verify_valid_token() {
        let verifier = TokenVerifier::new(SECRET);
        let token = issue(&valid_claims(), SECRET);

        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims.sub, "idp-user-42");
        assert_eq!(claims.email.as_deref(), Some("alice@university.edu"));
    }

    #[test]
    fn test_verify_wrong_secret() {
        let verifier = TokenVerifier::new(SECRET);
        let token = issue(&valid_claims(), "other-secret");

        assert!(matches!(
            verifier.verify(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_verify_expired_token() {
        let verifier = TokenVerifier::new(SECRET);
        let mut claims = valid_claims();
        claims.iat -= 7200;
        claims.exp = claims.iat + 900;
        let token = issue(&claims, SECRET);

        assert!(matches!(verifier.verify(&token), Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_disabled_verifier_rejects_everything() {
        let verifier = TokenVerifier::disabled();
        assert!(!verifier.is_enabled());

        let token = issue(&valid_claims(), SECRET);
        assert!(matches!(verifier.verify(&token), Err(AppError::AuthDisabled)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let verifier = TokenVerifier::new(SECRET);
        assert!(matches!(
            verifier.verify("not.a.jwt"),
            Err(AppError::InvalidToken)
        ));
    }
}
