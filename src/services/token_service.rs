//! Auth token service - issuance and verification of signed identity tokens.
//!
//! Tokens are stateless HS256 JWTs carrying the author id and an
//! expiration instant, signed with a process-wide secret loaded from
//! configuration at startup. There is no server-side revocation list:
//! a token is valid until it expires or the secret changes.

use anyhow::Context;
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Claims embedded in every issued token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Author id
    sub: String,
    /// Expiration timestamp (seconds since epoch)
    exp: i64,
    /// Issued-at timestamp
    iat: i64,
}

/// Issues and verifies signed, time-limited identity tokens.
///
/// Pure with respect to storage: issuance is a function of the input,
/// the secret, and the current time. One instance is created at startup
/// and shared across requests; the secret is immutable for the process
/// lifetime.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_hours: i64,
}

impl TokenService {
    /// Create a token service from the shared secret and validity window.
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_hours,
        }
    }

    /// Issue a signed token asserting the given author's identity.
    ///
    /// The token expires `ttl_hours` after issuance.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if signing fails; this indicates a
    /// misconfigured process, not a bad request.
    pub fn issue(&self, author_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: author_id.to_string(),
            exp: (now + TimeDelta::hours(self.ttl_hours)).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .context("failed to sign auth token")?;
        Ok(token)
    }

    /// Verify a token and resolve the author id it asserts.
    ///
    /// Signature verification and the expiration check happen in one
    /// step: an expired token fails with `TokenExpired`, any malformed
    /// or wrongly-signed token with `InvalidToken`.
    pub fn verify(&self, token: &str) -> Result<Uuid, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default()).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            },
        )?;

        // A token whose subject is not a well-formed id was not issued here
        Uuid::parse_str(&data.claims.sub).map_err(|_| AppError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_resolves_to_issuing_author() {
        let service = TokenService::new("test-secret", 1);
        let author_id = Uuid::new_v4();

        let token = service.issue(author_id).unwrap();
        assert_eq!(service.verify(&token).unwrap(), author_id);
    }

    #[test]
    fn token_never_resolves_to_another_author() {
        let service = TokenService::new("test-secret", 1);
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let token = service.issue(a).unwrap();
        assert_ne!(service.verify(&token).unwrap(), b);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        // Negative TTL produces a token whose expiry is already in the
        // past, beyond the default validation leeway.
        let service = TokenService::new("test-secret", -2);
        let token = service.issue(Uuid::new_v4()).unwrap();

        assert!(matches!(
            service.verify(&token),
            Err(AppError::TokenExpired)
        ));
    }

    #[test]
    fn foreign_secret_is_rejected_as_invalid() {
        let issuer = TokenService::new("secret-a", 1);
        let verifier = TokenService::new("secret-b", 1);

        let token = issuer.issue(Uuid::new_v4()).unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn garbage_token_is_rejected_as_invalid() {
        let service = TokenService::new("test-secret", 1);
        assert!(matches!(
            service.verify("not-a-token"),
            Err(AppError::InvalidToken)
        ));
    }
}
