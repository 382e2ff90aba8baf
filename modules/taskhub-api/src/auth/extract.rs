//! Authentication gate: turns the `Authorization` header of an inbound
//! request into a verified identity, or rejects the request.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::auth::token::TokenService;
use crate::domain::error::DomainError;

/// The verified identity of the caller, extracted from a bearer token.
///
/// The token itself is the source of truth for the request; the credential
/// store is not consulted here.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    TokenService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = DomainError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(DomainError::AuthenticationRequired)?;
        let claims = TokenService::from_ref(state).verify(&token)?;
        Ok(AuthUser {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
        })
    }
}

/// Extract the credential from an `Authorization: Bearer <token>` header.
/// Anything else (absent header, other scheme, empty token) is a miss.
fn bearer_token(parts: &Parts) -> Option<String> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/tasks");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn extracts_token_from_bearer_header() {
        let parts = parts_with(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn rejects_missing_header() {
        assert_eq!(bearer_token(&parts_with(None)), None);
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert_eq!(bearer_token(&parts_with(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&parts_with(Some("Bearer"))), None);
        assert_eq!(bearer_token(&parts_with(Some("Bearer "))), None);
        assert_eq!(bearer_token(&parts_with(Some("bearer abc"))), None);
    }
}
