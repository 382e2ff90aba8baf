pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod routes;
