//! Stateless identity tokens.
//!
//! A token asserts {owner id, name, email}; validity is determined solely by
//! the signature and the embedded expiry. Nothing is persisted server-side.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::User;

/// Claims embedded in an identity token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Owner id.
    pub sub: Uuid,
    pub name: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

struct Inner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

/// Issues and verifies signed identity tokens. Purely functional over the
/// secret, which is loaded once at startup and never mutated; cloning shares
/// the keys.
#[derive(Clone)]
pub struct TokenService {
    inner: Arc<Inner>,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
                ttl,
            }),
        }
    }

    /// Issue a token for a verified user.
    pub fn issue(&self, user: &User) -> Result<String, DomainError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + self.inner.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.inner.encoding)
            .map_err(|e| DomainError::database(format!("token signing failed: {e}")))
    }

    /// Verify a token and return its claims. Bad signature, malformed
    /// payload and expiry all collapse into `AuthenticationFailed`.
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.inner.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| DomainError::AuthenticationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "digest".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn service() -> TokenService {
        TokenService::new("test-secret", Duration::days(7))
    }

    #[test]
    fn issue_then_verify_round_trips_claims() {
        let svc = service();
        let user = user();
        let token = svc.issue(&user).unwrap();

        let claims = svc.verify(&token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.name, user.name);
        assert_eq!(claims.email, user.email);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let svc = service();
        let mut token = svc.issue(&user()).unwrap();
        token.pop();
        token.push('x');
        assert!(matches!(
            svc.verify(&token),
            Err(DomainError::AuthenticationFailed)
        ));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let other = TokenService::new("other-secret", Duration::days(7));
        let token = other.issue(&user()).unwrap();
        assert!(matches!(
            service().verify(&token),
            Err(DomainError::AuthenticationFailed)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let svc = TokenService::new("test-secret", Duration::seconds(-120));
        let token = svc.issue(&user()).unwrap();
        assert!(matches!(
            svc.verify(&token),
            Err(DomainError::AuthenticationFailed)
        ));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(matches!(
            service().verify("not-a-token"),
            Err(DomainError::AuthenticationFailed)
        ));
    }
}
