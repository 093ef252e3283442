//! Maps `AppError` onto HTTP responses with a `{ "error": ... }` body.

use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use xo_core::error::AppError;

#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Text safe to show to browsers; internal details stay in the log.
    fn public_message(&self) -> String {
        match &self.0 {
            AppError::ValidationError(msg) | AppError::Unauthorized(msg) => msg.clone(),
            AppError::Internal(_) => "internal server error".to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

/// Port implementations report failures through anyhow.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError(AppError::Internal(format!("{err:#}")))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("{}", self.0);
        }
        HttpResponse::build(self.status_code()).json(json!({ "error": self.public_message() }))
    }
}
