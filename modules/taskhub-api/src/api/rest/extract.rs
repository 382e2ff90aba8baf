//! JSON body extractor whose rejection speaks the response envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

use crate::domain::error::DomainError;

/// Like `axum::Json`, but malformed or unparsable bodies are reported as a
/// `ValidationError` inside the uniform envelope instead of axum's default
/// plain-text rejection.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = DomainError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(DomainError::validation(rejection.body_text())),
        }
    }
}
