//! Request errors and their HTTP mapping.
//!
//! Every error becomes a JSON body `{"error": "<message>"}`; the message is
//! the error's display text, unchanged.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use flamingo_weather::WeatherError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unknown location: {0}")]
    InvalidLocation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidLocation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Weather(WeatherError::InvalidCoordinates(_)) => StatusCode::BAD_REQUEST,
            ApiError::Weather(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Weather(e) = &self {
            tracing::error!("Request failed: {} ({})", e, e.user_message());
        } else if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Rejected request: {}", self);
        }

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Response for a handler panic, used by the catch-panic layer
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::Internal(detail).into_response()
}
