use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};
use valuation_client::ValuationError;

use crate::core::http::response_envelope::{ApiErrorDetail, ApiResponse};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- IO / server ---
    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),

    /// Failure of the valuation pipeline (including its configuration),
    /// mapped by variant.
    #[error(transparent)]
    Valuation(#[from] ValuationError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Bind { .. } | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Valuation(e) => match e {
                ValuationError::InvalidRepositoryFormat { .. } => StatusCode::BAD_REQUEST,
                ValuationError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                ValuationError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
                ValuationError::Network(_)
                | ValuationError::RemoteService { .. }
                | ValuationError::Normalize(_)
                | ValuationError::ProbeExhausted(_) => StatusCode::BAD_GATEWAY,
            },
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Bind { .. } => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::Valuation(e) => e.code(),
        }
    }

    /// Message for the response body; upstream details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            AppError::Valuation(e) => e.user_message(),
            AppError::Bind { .. } | AppError::Server(_) => "Internal server error.".into(),
        }
    }

    fn details(&self) -> Vec<ApiErrorDetail> {
        match self {
            AppError::Valuation(ValuationError::InvalidRepositoryFormat { .. }) => {
                vec![ApiErrorDetail {
                    path: Some("repository".into()),
                    hint: Some("Use 'owner/repo' or https://github.com/owner/repo.".into()),
                }]
            }
            _ => Vec::new(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.error_code(), %status, error = %self, "request failed");
        } else {
            warn!(code = self.error_code(), %status, error = %self, "request rejected");
        }

        ApiResponse::<()>::error(self.error_code(), self.public_message(), self.details())
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;
