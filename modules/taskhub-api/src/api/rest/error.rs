//! Maps domain errors onto HTTP statuses and the failure envelope.
//!
//! The status is derived from the error kind, never from message text, and
//! internal collaborator detail stays out of the response body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::rest::response::ApiFailure;
use crate::domain::error::DomainError;

impl DomainError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
            DomainError::AuthenticationRequired
            | DomainError::AuthenticationFailed
            | DomainError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            DomainError::PermissionDenied => StatusCode::FORBIDDEN,
            DomainError::TaskNotFound { .. }
            | DomainError::InvalidTaskId { .. }
            | DomainError::UserNotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::EmailAlreadyInUse { .. } => StatusCode::CONFLICT,
            DomainError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            DomainError::Database { .. } => {
                // Log the internal detail but don't expose it to the client.
                tracing::error!(error = %self, "Internal error");
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        };
        (status, Json(ApiFailure::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn statuses_follow_the_error_kind() {
        assert_eq!(
            DomainError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            DomainError::AuthenticationRequired.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            DomainError::AuthenticationFailed.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            DomainError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            DomainError::PermissionDenied.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            DomainError::task_not_found(Uuid::new_v4()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            DomainError::invalid_task_id("nope").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            DomainError::email_already_in_use("a@x.com").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            DomainError::database("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_detail_is_not_leaked() {
        let response = DomainError::database("connection refused at 10.0.0.5").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
