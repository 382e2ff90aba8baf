pub mod auth_service;
pub mod error;
pub mod model;
pub mod query;
pub mod repo;
pub mod task_service;
