//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod budgets;
pub mod categories;
pub mod insights;
pub mod reports;
pub mod transactions;

// Re-export all handlers for use in router
pub use budgets::*;
pub use categories::*;
pub use insights::*;
pub use reports::*;
pub use transactions::*;

use axum::extract::{
    rejection::{PathRejection, QueryRejection},
    Request,
};
use serde::de::DeserializeOwned;

use crate::{AppError, MAX_BODY_SIZE};

/// Read and decode a JSON request body
pub(crate) async fn read_json<T: DeserializeOwned>(request: Request) -> Result<T, AppError> {
    let bytes = axum::body::to_bytes(request.into_body(), MAX_BODY_SIZE)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;
    serde_json::from_slice(&bytes).map_err(|_| AppError::bad_request("Invalid JSON"))
}

/// Report a malformed path parameter as a JSON 400
pub(crate) fn bad_path(rejection: PathRejection) -> AppError {
    AppError::bad_request(&rejection.body_text())
}

/// Report a malformed query string as a JSON 400
pub(crate) fn bad_query(rejection: QueryRejection) -> AppError {
    AppError::bad_request(&rejection.body_text())
}
