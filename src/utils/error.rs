use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;

use crate::domains::user::service::UserServiceError;

#[derive(Debug)]
pub struct AppError {
  pub status_code: StatusCode,
  pub message: String,
  /// Adds `"success": false` to the body, as the register and login routes do.
  pub success_flag: bool,
}

impl AppError {
  pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
    Self {
      status_code,
      message: message.into(),
      success_flag: false,
    }
  }

  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_REQUEST, message)
  }

  pub fn unauthorized(message: impl Into<String>) -> Self {
    Self::new(StatusCode::UNAUTHORIZED, message)
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    Self::new(StatusCode::NOT_FOUND, message)
  }

  pub fn internal_server_error(message: impl Into<String>) -> Self {
    Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
  }

  pub fn with_success_flag(mut self) -> Self {
    self.success_flag = true;
    self
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let body = if self.success_flag {
      json!({ "success": false, "message": self.message })
    } else {
      json!({ "message": self.message })
    };

    (self.status_code, Json(body)).into_response()
  }
}

impl From<AppError> for StatusCode {
  fn from(err: AppError) -> Self {
    err.status_code
  }
}

impl From<sqlx::Error> for AppError {
  fn from(error: sqlx::Error) -> Self {
    tracing::error!("Database error: {:?}", error);
    AppError::internal_server_error("Internal server error occurred")
  }
}

impl From<serde_json::Error> for AppError {
  fn from(error: serde_json::Error) -> Self {
    tracing::debug!("JSON error: {:?}", error);
    AppError::bad_request("Invalid JSON format")
  }
}

impl From<UserServiceError> for AppError {
  fn from(error: UserServiceError) -> Self {
    match error {
      UserServiceError::ValidationError(msg) => AppError::bad_request(msg),
      UserServiceError::PersistenceError(msg) => AppError::bad_request(msg),
      UserServiceError::Unauthorized(msg) => AppError::unauthorized(msg),
      UserServiceError::UserNotFound(msg) => AppError::not_found(msg),
      UserServiceError::InternalServerError(msg) => {
        tracing::error!("{}", msg);
        AppError::internal_server_error("Internal server error occurred")
      }
    }
  }
}
