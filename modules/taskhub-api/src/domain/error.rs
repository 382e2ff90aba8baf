use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror.
///
/// Every failure carries an explicit kind; the HTTP status is derived from
/// the variant in the REST layer, never from matching on message text.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{message}")]
    Validation { message: String },

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Invalid or expired token")]
    AuthenticationFailed,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Permission denied: not authorized to access this task")]
    PermissionDenied,

    #[error("Task not found")]
    TaskNotFound { id: Uuid },

    #[error("Invalid task ID format")]
    InvalidTaskId { id: String },

    #[error("User not found")]
    UserNotFound { id: Uuid },

    #[error("Email already in use")]
    EmailAlreadyInUse { email: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn task_not_found(id: Uuid) -> Self {
        Self::TaskNotFound { id }
    }

    pub fn invalid_task_id(id: impl Into<String>) -> Self {
        Self::InvalidTaskId { id: id.into() }
    }

    pub fn user_not_found(id: Uuid) -> Self {
        Self::UserNotFound { id }
    }

    pub fn email_already_in_use(email: impl Into<String>) -> Self {
        Self::EmailAlreadyInUse {
            email: email.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
