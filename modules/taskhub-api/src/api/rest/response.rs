//! Uniform response envelope: every success is `{success: true, data}`,
//! every failure `{success: false, error}`.

use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize)]
pub struct ApiSuccess<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiSuccess<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Wrap a payload in the success envelope.
pub fn ok<T: Serialize>(data: T) -> Json<ApiSuccess<T>> {
    Json(ApiSuccess::new(data))
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiFailure {
    pub success: bool,
    pub error: String,
}

impl ApiFailure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
