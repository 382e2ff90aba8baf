use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::auth::password;
use crate::auth::token::TokenService;
use crate::domain::error::DomainError;
use crate::domain::model::{NewUser, User};
use crate::domain::repo::UsersRepository;

const MIN_PASSWORD_LEN: usize = 8;

/// Signup and login rules over the credential store.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UsersRepository>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(users: Arc<dyn UsersRepository>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    #[instrument(name = "taskhub.auth.signup", skip(self, new_user), fields(email = %new_user.email))]
    pub async fn signup(&self, new_user: NewUser) -> Result<(User, String), DomainError> {
        info!("Signing up new user");

        let name = new_user.name.trim().to_string();
        let email = new_user.email.trim().to_lowercase();

        if name.is_empty() || email.is_empty() || new_user.password.is_empty() {
            return Err(DomainError::validation(
                "Please provide all required fields",
            ));
        }
        if new_user.password != new_user.confirm_password {
            return Err(DomainError::validation("Passwords do not match"));
        }
        if new_user.password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(
                "Password must be at least 8 characters long",
            ));
        }

        if self
            .users
            .find_by_email(&email)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .is_some()
        {
            return Err(DomainError::email_already_in_use(email));
        }

        let password_hash =
            password::hash(&new_user.password).map_err(|e| DomainError::database(e.to_string()))?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        self.users
            .insert(user.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        let token = self.tokens.issue(&user)?;
        info!("Successfully signed up user with id={}", user.id);
        Ok((user, token))
    }

    /// Login never reveals which factor failed: an unknown email and a wrong
    /// password both answer with the same `InvalidCredentials`.
    #[instrument(name = "taskhub.auth.login", skip_all, fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), DomainError> {
        debug!("Attempting login");

        if email.is_empty() || password.is_empty() {
            return Err(DomainError::validation("Please provide email and password"));
        }

        let user = self
            .users
            .find_by_email(&email.trim().to_lowercase())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or(DomainError::InvalidCredentials)?;

        if !crate::auth::password::verify(password, &user.password_hash) {
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user)?;
        info!("Successfully logged in user with id={}", user.id);
        Ok((user, token))
    }

    #[instrument(name = "taskhub.auth.current_user", skip(self), fields(user_id = %id))]
    pub async fn current_user(&self, id: Uuid) -> Result<User, DomainError> {
        debug!("Getting current user");
        self.users
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(id))
    }
}
