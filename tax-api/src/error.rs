//! Mapping of calculation and request errors onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tax_core::IncomeTaxError;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("invalid {0} parameter")]
    InvalidParameter(&'static str),

    #[error(transparent)]
    Calculation(#[from] IncomeTaxError),
}

impl ApiError {
    /// Bad client input is a 400; anything wrong with the bracket data or its
    /// provider is a 502.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) | Self::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            Self::Calculation(IncomeTaxError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            Self::Calculation(
                IncomeTaxError::FetchFailure { .. }
                | IncomeTaxError::NoBracketData
                | IncomeTaxError::InvalidBracketData { .. },
            ) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "tax calculation failed");
        } else {
            warn!(status = status.as_u16(), error = %message, "rejected tax calculation request");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
