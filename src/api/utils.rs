//! API utility functions
//!
//! Pure helpers for HTTP request processing, extracted from services.rs to
//! enable unit testing.

use serde::de::DeserializeOwned;

use crate::api::error::ApiError;

/// Validates that body size does not exceed the maximum allowed size
pub fn validate_body_size(data: &[u8], max_size: usize) -> Result<(), ApiError> {
    if data.len() > max_size {
        return Err(ApiError::PayloadTooLarge(data.len()));
    }
    Ok(())
}

/// Parses a JSON request body, mapping parse failures to a 400 problem
/// document instead of letting them surface as an unhandled error.
pub fn parse_json_body<T: DeserializeOwned>(data: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(data)
        .map_err(|err| ApiError::InvalidBody(format!("Invalid JSON: {}", err)))
}
