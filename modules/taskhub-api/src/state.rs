use std::sync::Arc;

use axum::extract::FromRef;
use chrono::Duration;
use sea_orm::DatabaseConnection;

use crate::auth::token::TokenService;
use crate::config::AuthConfig;
use crate::domain::auth_service::AuthService;
use crate::domain::task_service::TaskService;
use crate::infra::storage::sea_orm_repo::{SeaOrmTasksRepository, SeaOrmUsersRepository};

/// Shared application state: the services and the token signer.
///
/// Built once at startup around the shared database handle and injected
/// into every handler; there are no ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub tasks: TaskService,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &AuthConfig) -> Self {
        let tokens = TokenService::new(
            &config.secret,
            Duration::hours(config.token_ttl_hours as i64),
        );
        let users_repo = Arc::new(SeaOrmUsersRepository::new(db.clone()));
        let tasks_repo = Arc::new(SeaOrmTasksRepository::new(db));
        Self {
            auth: AuthService::new(users_repo, tokens.clone()),
            tasks: TaskService::new(tasks_repo),
            tokens,
        }
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}
