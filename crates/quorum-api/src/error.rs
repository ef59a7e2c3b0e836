//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// One or more inputs failed boundary validation.
  #[error("invalid input: {}", .0.join("; "))]
  Invalid(Vec<String>),
}

impl From<quorum_core::Error> for ApiError {
  fn from(e: quorum_core::Error) -> Self { ApiError::Invalid(vec![e.to_string()]) }
}

impl From<Vec<quorum_core::Error>> for ApiError {
  fn from(errors: Vec<quorum_core::Error>) -> Self {
    ApiError::Invalid(errors.iter().map(ToString::to_string).collect())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let body = match &self {
      ApiError::Invalid(details) => {
        tracing::warn!(problems = details.len(), "rejecting invalid input");
        json!({
          "error":   "invalid input",
          "details": details,
        })
      }
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
  }
}
