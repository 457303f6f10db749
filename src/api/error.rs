use std::collections::BTreeMap;

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use thiserror::Error;

use super::models::ApiProblem;
use crate::store::StoreError;

pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("validation failed")]
    Validation(BTreeMap<String, String>),
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("payload too large: {0} bytes")]
    PayloadTooLarge(usize),
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            // plain-text 404, not a problem document
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, message).into_response()
            }
            ApiError::Validation(errors) => problem_response(
                StatusCode::BAD_REQUEST,
                ApiProblem::validation_error(errors),
            ),
            ApiError::InvalidBody(detail) => problem_response(
                StatusCode::BAD_REQUEST,
                ApiProblem::invalid_body_format(detail),
            ),
            ApiError::PayloadTooLarge(size) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("payload too large: {} bytes", size),
            )
                .into_response(),
            ApiError::Internal(message) => {
                tracing::error!(%message, "Internal API error");
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}

fn problem_response(status: StatusCode, problem: ApiProblem) -> axum::response::Response {
    (
        status,
        [(header::CONTENT_TYPE, APPLICATION_PROBLEM_JSON)],
        Json(problem),
    )
        .into_response()
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        ApiError::Internal(value.to_string())
    }
}
