use std::{
  backtrace::{Backtrace, BacktraceStatus},
  fmt::Display,
};

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
  err: anyhow::Error,
  status_code: StatusCode,
}

impl AppError {
  /// Create with 500 status
  pub fn new<E: Into<anyhow::Error>>(err: E) -> Self {
    Self {
      err: err.into(),
      status_code: StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  /// Create with custom status
  pub fn with_status<E: Into<anyhow::Error>>(status: StatusCode, err: E) -> Self {
    Self {
      err: err.into(),
      status_code: status,
    }
  }

  pub fn not_found(message: impl Display) -> Self {
    Self::with_status(StatusCode::NOT_FOUND, anyhow::anyhow!("{message}"))
  }

  pub fn bad_request(message: impl Display) -> Self {
    Self::with_status(StatusCode::BAD_REQUEST, anyhow::anyhow!("{message}"))
  }

  #[must_use]
  pub const fn status_code(&self) -> StatusCode {
    self.status_code
  }

  #[must_use]
  pub fn is_not_found(&self) -> bool {
    self.status_code == StatusCode::NOT_FOUND
  }

  #[must_use]
  pub fn into_inner(self) -> anyhow::Error {
    self.err
  }

  /// Get backtrace from anyhow (requires `RUST_BACKTRACE=1` to capture)
  pub fn backtrace(&self) -> &Backtrace {
    self.err.backtrace()
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    // client errors carry their message only
    let body = if cfg!(debug_assertions) && self.status_code.is_server_error() {
      let bt = self.err.backtrace();
      if bt.status() == BacktraceStatus::Captured {
        json!({ "error": self.err.to_string(), "backtrace": bt.to_string() })
      } else {
        json!({
          "error": self.err.to_string(),
          "hint": "set RUST_BACKTRACE=1 to enable backtrace",
        })
      }
    } else {
      json!({ "error": self.err.to_string() })
    };
    (self.status_code, Json(body)).into_response()
  }
}

impl Display for AppError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "[{}] {}", self.status_code, self.err)
  }
}

impl<E> From<E> for AppError
where
  E: Into<anyhow::Error>,
{
  fn from(err: E) -> Self {
    Self::new(err)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn not_found_carries_status_and_message() {
    let err = AppError::not_found("chat 7 not found");
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "[404 Not Found] chat 7 not found");
  }

  #[test]
  fn conversions_default_to_internal_error() {
    let err: AppError = anyhow::anyhow!("boom").into();
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[test]
  fn response_uses_the_error_status() {
    let response = AppError::bad_request("text required").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
  }
}
