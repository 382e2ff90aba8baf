//! Taskhub API module: token-based identity, ownership-scoped task CRUD,
//! and the list query/filter/sort contract.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infra;
pub mod state;

pub use api::rest::routes::router;
pub use config::AuthConfig;
pub use state::AppState;
